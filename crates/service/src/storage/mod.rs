//! Storage abstractions for service layer
//!
//! - `json_map_store`: generic JSON-file-backed map
//! - `kv_store`: string-keyed persistent dictionary used by the survey repository

pub mod json_map_store;
pub mod kv_store;
