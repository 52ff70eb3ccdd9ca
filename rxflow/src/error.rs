//! Error types for rxflow

use thiserror::Error;

/// Boxed error that can cross scheduler threads
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for rxflow operations
pub type Result<T> = std::result::Result<T, RxError>;

/// rxflow error types
#[derive(Error, Debug)]
pub enum RxError {
    /// Error raised by a producer through `Emitter::error`
    #[error("Source error: {0}")]
    Source(BoxError),

    /// A fallible operator closure returned an error
    #[error("Operator error: {0}")]
    Operator(BoxError),

    /// A subscription procedure panicked
    #[error("Subscription procedure panicked: {0}")]
    Panicked(String),

    /// Invalid scheduler configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RxError {
    /// Wrap any error (or message) raised by a producer
    pub fn source_error(err: impl Into<BoxError>) -> Self {
        Self::Source(err.into())
    }

    /// Wrap an error returned by an operator closure
    pub(crate) fn operator(err: impl Into<BoxError>) -> Self {
        Self::Operator(err.into())
    }

    /// Render a panic payload caught with `catch_unwind`
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };

        Self::Panicked(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_from_str() {
        let err = RxError::source_error("boom");
        assert_eq!(err.to_string(), "Source error: boom");
    }

    #[test]
    fn test_panic_payload_rendering() {
        let err = RxError::from_panic(Box::new("static message"));
        assert!(matches!(err, RxError::Panicked(ref m) if m == "static message"));

        let err = RxError::from_panic(Box::new(String::from("owned message")));
        assert!(matches!(err, RxError::Panicked(ref m) if m == "owned message"));

        let err = RxError::from_panic(Box::new(42_u32));
        assert!(matches!(err, RxError::Panicked(ref m) if m == "unknown panic payload"));
    }
}
