use thiserror::Error;

/// Errors from document and list store operations.
///
/// Absence is never an error: a missing key, a corrupt file, an out-of-range
/// index, and an unknown id are all reported through `Option`/`Document::Empty`
/// or a no-op `Ok`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(String),

    #[error("failed to serialize document: {0}")]
    Serialize(String),

    #[error("timed out waiting for lock on key '{key}'")]
    LockTimeout { key: String },
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

/// Errors raised by adapters when a request is missing required input.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Errors from the translation capability.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("no translation provider configured")]
    NotConfigured,

    #[error("translation provider error: {0}")]
    Provider(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::LockTimeout {
            key: "history.txt2img".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "timed out waiting for lock on key 'history.txt2img'"
        );
    }

    #[test]
    fn test_store_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = io.into();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::MissingField("key").to_string(),
            "key is required"
        );
        let err = ValidationError::InvalidField {
            field: "index",
            reason: "must be a number".to_string(),
        };
        assert_eq!(err.to_string(), "invalid index: must be a number");
    }
}
