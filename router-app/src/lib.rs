//! Example site served by pattern-router

pub mod site;

pub use site::{create_router, SiteOptions};
