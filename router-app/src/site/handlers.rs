//! Page handlers and router construction
//!
//! Register pages in [`create_router`]. Later pages build on earlier ones by
//! copying a registered route and decorating the copy.

use super::filters::{json_encode, lowercase, replace_ci, uppercase};
use pattern_router::{
    decorator, handler, into_boxed, RouteResult, Router, RouterConfig, TemplateConfig,
    TemplateEngine,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Words served by the JSON pages.
pub const GREETING: [&str; 5] = ["Say", "Hello", "World", "To", "Json"];

/// Options for building the example site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteOptions {
    /// Router configuration
    pub router: RouterConfig,
    /// Serve `/?about` from this template directory when set
    pub templates: Option<TemplateConfig>,
}

// =============================================================================
// Router
// =============================================================================

/// Create the example site router.
pub fn create_router(options: SiteOptions) -> RouteResult<Router> {
    let router = Router::with_config(options.router)?;

    // Plain pages
    router.controller("/", handler(home))?;
    router.controller("/?another", handler(another))?;

    // lowercase(json_encode(greeting))
    router.controller(
        "/?json",
        decorator(lowercase(), decorator(json_encode(), handler(greeting))?)?,
    )?;

    // Uppercased copy of /?json
    router.controller(
        "/?json_ucase",
        decorator(uppercase(), router.find_route("/?json")?.to_route()?)?,
    )?;

    // Copy of /?json_ucase with a curried replace applied
    let goodbye = replace_ci(json!(["HELLO", "JSON"]), json!(["GOODBYE", "PHP"]))?;
    router.controller(
        "/?json_goodbye",
        decorator(
            goodbye.into_post_process(),
            router.find_route("/?json_ucase")?.to_route()?,
        )?,
    )?;

    // Generated pages
    for n in 1u32..=3 {
        router.controller(format!("/?{}", n), handler(move || power_page(n)))?;
    }

    if let Some(config) = options.templates {
        let mut engine = TemplateEngine::new(config);
        engine.add_helper("site", json!("router-app"));
        router.controller("/?about", into_boxed(move || about(&engine)))?;
    }

    let routes = router.len()?;
    tracing::debug!(routes, "Site router created");

    Ok(router)
}

// =============================================================================
// Handlers
// =============================================================================

/// Home page
pub fn home() -> &'static str {
    r#"<a href="./router-app?url=another">Another page</a>"#
}

/// Second page, linking to the JSON page
pub fn another() -> &'static str {
    r#"Try <a href="./router-app?url=json">encoded json</a>."#
}

/// Raw greeting words
pub fn greeting() -> Vec<&'static str> {
    GREETING.to_vec()
}

/// `n * n = n^n`
pub fn power_page(n: u32) -> String {
    format!("{} * {} = {}", n, n, u64::from(n).pow(n))
}

/// Template-backed about page
fn about(engine: &TemplateEngine) -> RouteResult<String> {
    let mut vars = Map::new();
    vars.insert("title".to_string(), Value::from("About"));
    vars.insert("words".to_string(), json!(GREETING));
    engine.render("about", &vars)
}
