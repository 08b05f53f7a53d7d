use thiserror::Error;

/// Errors surfaced by the survey service layer.
///
/// `Display` of `Validation` and `NotFound` is the bare message, since it is
/// returned verbatim to HTTP clients.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("invalid JSON: {0}")]
    Parse(String),
    #[error("storage error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        Self::NotFound(format!("{} not found: {}", entity, id))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Short machine-readable tag, used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Parse(_) => "parse",
            Self::Db(_) => "storage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_client_facing() {
        assert_eq!(ServiceError::validation("Blank questions not allowed.").to_string(), "Blank questions not allowed.");
        assert_eq!(ServiceError::not_found("survey", "abc").to_string(), "survey not found: abc");
        assert!(ServiceError::Parse("EOF".into()).to_string().starts_with("invalid JSON"));
        assert_eq!(ServiceError::Db("disk".into()).kind(), "storage");
    }
}
