//! Shared building blocks for the survey workspace.
//! - Logging initialisation (`utils::logging`)
//! - Startup directory checks (`env`)
//! - Small wire types reused by several crates (`types`)

pub mod types;
pub mod utils;
pub mod env;
