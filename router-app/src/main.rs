//! # router-app
//!
//! Serve one request from the example site and write the page to stdout.
//!
//! ## Usage
//!
//! ```bash
//! # Home page
//! router-app
//!
//! # Dispatch a path directly
//! router-app --url json_goodbye
//!
//! # CGI style: read the request from a query string
//! QUERY_STRING='url=json' router-app
//! router-app --query 'url=2'
//!
//! # Enable the template-backed /?about page
//! router-app --templates ./templates --url about
//!
//! # Show the registered patterns in dispatch order
//! router-app --list
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use pattern_router::{QueryParams, RouterConfig, TemplateConfig};
use router_app_lib::{create_router, SiteOptions};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "router-app")]
#[command(author, version, about = "Dispatch one request through the example site", long_about = None)]
struct Cli {
    /// Path to dispatch, bypassing query parsing
    #[arg(short, long)]
    url: Option<String>,

    /// Query string to read the `url` parameter from (default: $QUERY_STRING)
    #[arg(short, long, env = "QUERY_STRING")]
    query: Option<String>,

    /// Template directory for the /?about page
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Log each route match at info level
    #[arg(long)]
    debug_routes: bool,

    /// List registered patterns instead of dispatching
    #[arg(short, long)]
    list: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "router_app=info,pattern_router=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether a route matched.
fn run(cli: Cli) -> Result<bool> {
    let options = SiteOptions {
        router: RouterConfig::new().with_debug_logging(cli.debug_routes),
        templates: cli
            .templates
            .map(|dir| TemplateConfig::new().with_dir(dir)),
    };
    let router = create_router(options).context("Failed to build site router")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.list {
        for pattern in router.patterns()? {
            writeln!(out, "{}", pattern)?;
        }
        return Ok(true);
    }

    let matched = match cli.url {
        Some(url) => router.dispatch(&url, &mut out),
        None => {
            let params = QueryParams::parse(cli.query.as_deref().unwrap_or(""));
            router.dispatch_request(&params, &mut out)
        }
    }
    .context("Dispatch failed")?;

    if !matched {
        tracing::warn!("No route matched the request");
    }
    Ok(matched)
}
