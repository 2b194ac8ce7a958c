//! File-based template rendering
//!
//! Templates live in a directory as `<name>.<extension>` files and use
//! `{{ key }}` placeholders. Dotted keys (`{{ user.name }}`) walk nested
//! objects. String values are inserted as-is, other values as compact JSON,
//! and unknown keys render as nothing.
//!
//! # Example
//! ```rust,ignore
//! let mut engine = TemplateEngine::new(TemplateConfig::default());
//! engine.add_helper("site", json!("Example"));
//!
//! let mut vars = serde_json::Map::new();
//! vars.insert("title".into(), json!("Home"));
//! let page = engine.render("index", &vars)?;
//! ```

use crate::{RouteError, RouteResult};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_.]*)\s*\}\}").expect("placeholder regex is valid")
});

/// Where templates are loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Template directory (default: "templates")
    pub dir: PathBuf,
    /// File extension, without the dot (default: "html")
    pub extension: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("templates"),
            extension: "html".to_string(),
        }
    }
}

impl TemplateConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template directory.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Set the template file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// Renders named templates with a variable mapping.
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    config: TemplateConfig,
    helpers: Map<String, Value>,
}

impl TemplateEngine {
    /// Create an engine for the given configuration.
    pub fn new(config: TemplateConfig) -> Self {
        Self {
            config,
            helpers: Map::new(),
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// Register a variable available to every template.
    ///
    /// Variables passed to [`render`](Self::render) take precedence.
    pub fn add_helper(&mut self, name: impl Into<String>, value: Value) -> &mut Self {
        self.helpers.insert(name.into(), value);
        self
    }

    /// Path of the file backing template `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.config
            .dir
            .join(format!("{}.{}", name, self.config.extension))
    }

    /// Render template `name` with `vars`.
    ///
    /// Fails with `TEMPLATE_MISSING` if the file does not exist.
    pub fn render(&self, name: &str, vars: &Map<String, Value>) -> RouteResult<String> {
        let path = self.path_for(name);
        if !path.is_file() {
            tracing::debug!(template = %path.display(), "Template missing");
            return Err(RouteError::template_missing(path.display()));
        }

        let source = std::fs::read_to_string(&path).map_err(|e| {
            RouteError::template(format!("Failed to read template '{}'", path.display()))
                .with_cause(e.to_string())
        })?;

        tracing::trace!(template = %path.display(), vars = vars.len(), "Rendering template");

        Ok(self.render_str(&source, vars))
    }

    /// Substitute placeholders in `source`.
    pub fn render_str(&self, source: &str, vars: &Map<String, Value>) -> String {
        PLACEHOLDER
            .replace_all(source, |caps: &Captures<'_>| {
                self.lookup(&caps[1], vars)
                    .map(placeholder_text)
                    .unwrap_or_default()
            })
            .into_owned()
    }

    fn lookup<'a>(&'a self, key: &str, vars: &'a Map<String, Value>) -> Option<&'a Value> {
        let mut parts = key.split('.');
        let head = parts.next()?;
        let mut value = vars.get(head).or_else(|| self.helpers.get(head))?;
        for part in parts {
            value = value.get(part)?;
        }
        Some(value)
    }
}

fn placeholder_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
