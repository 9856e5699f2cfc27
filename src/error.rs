//! Error handling

use std::fmt;

pub type CoreResult<T> = Result<T, CoreError>;

/// Every failure the core can surface. Nothing here is fatal to the
/// process; each error is scoped to a single batch or query call.
#[derive(Debug, Clone)]
pub enum CoreError {
    /// Batch payload absent, not a list, or empty
    InvalidPayload(String),

    /// A record is missing a required field; aborts the whole batch
    MissingField(String),

    /// A timestamp was present but not parseable
    TimestampFormat(String),

    /// A query parameter was outside its grammar
    ParameterFormat(String),

    /// Referenced entity does not exist
    NotFound(String),

    /// Store-level fault; the batch in flight is rolled back
    Storage(String),
}

impl CoreError {
    /// Client-fault errors surface as 4xx-style reports in the calling
    /// layer; storage faults surface as server faults.
    pub fn is_client_fault(&self) -> bool {
        !matches!(self, CoreError::Storage(_))
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPayload(msg) => write!(f, "Invalid data format: {}", msg),
            Self::MissingField(field) => write!(f, "Missing required field: {}", field),
            Self::TimestampFormat(value) => write!(f, "Invalid timestamp format: {}", value),
            Self::ParameterFormat(msg) => write!(f, "Invalid parameter format: {}", msg),
            Self::NotFound(what) => write!(f, "{} not found", what),
            Self::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_names_the_field() {
        let err = CoreError::MissingField("source_ip".to_string());
        assert_eq!(err.to_string(), "Missing required field: source_ip");
    }

    #[test]
    fn test_fault_partition() {
        assert!(CoreError::InvalidPayload("x".to_string()).is_client_fault());
        assert!(CoreError::NotFound("alert 7".to_string()).is_client_fault());
        assert!(!CoreError::Storage("disk full".to_string()).is_client_fault());
    }
}
