//! Site routes and post-processors

mod filters;
mod handlers;

pub use filters::*;
pub use handlers::*;
