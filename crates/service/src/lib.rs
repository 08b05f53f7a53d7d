//! Service layer for the survey API.
//! - Persists surveys in a string-keyed JSON store (`storage`).
//! - Keeps validation and tallying in the survey domain (`survey`).
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod survey;
