//! OPenn Resolver Library
//!
//! A Rust library for locating and reading metadata about digitized
//! manuscripts on the OPenn and Digital Walters data repository: page counts
//! from file manifests, primary languages from TEI descriptions and
//! repository dates from the collections index.

pub mod app;
pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
