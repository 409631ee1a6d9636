//! Error types for configuration loading and validation

use thiserror::Error;

/// Error produced while loading or validating a configuration document.
///
/// Every variant carries the dotted path of the offending field so the
/// caller can report exactly which part of the document is broken. Loading
/// is fail-fast: the first error encountered is returned and no partial
/// configuration is ever produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required field `{path}`")]
    MissingField { path: String },

    #[error("unknown field `{path}`")]
    UnknownField { path: String },

    #[error("type mismatch at `{path}`: expected {expected}, got {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
    },

    #[error("invalid expression at `{path}`: {message}")]
    Expression { path: String, message: String },

    #[error("invariant {invariant} violated: {message}")]
    InvariantViolation { invariant: u8, message: String },

    #[error("failed to read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub fn missing_field<S: Into<String>>(path: S) -> Self {
        Self::MissingField { path: path.into() }
    }

    pub fn unknown_field<S: Into<String>>(path: S) -> Self {
        Self::UnknownField { path: path.into() }
    }

    pub fn type_mismatch<P, E, F>(path: P, expected: E, found: F) -> Self
    where
        P: Into<String>,
        E: Into<String>,
        F: Into<String>,
    {
        Self::TypeMismatch {
            path: path.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn expression<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::Expression { path: path.into(), message: message.into() }
    }

    pub fn invariant<M: Into<String>>(invariant: u8, message: M) -> Self {
        Self::InvariantViolation { invariant, message: message.into() }
    }

    pub fn io<P: Into<String>>(path: P, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// The dotted field path this error refers to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::MissingField { path }
            | Self::UnknownField { path }
            | Self::TypeMismatch { path, .. }
            | Self::Expression { path, .. }
            | Self::Io { path, .. } => Some(path),
            Self::InvariantViolation { .. } => None,
        }
    }
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_field() {
        let err = ConfigError::missing_field("head.num_classes");
        assert_eq!(err.to_string(), "missing required field `head.num_classes`");
        assert_eq!(err.path(), Some("head.num_classes"));

        let err = ConfigError::type_mismatch("optimizer.lr", "a number", "\"fast\"");
        assert_eq!(
            err.to_string(),
            "type mismatch at `optimizer.lr`: expected a number, got \"fast\""
        );
    }

    #[test]
    fn test_path_covers_field_errors() {
        assert_eq!(
            ConfigError::unknown_field("neck.upsample").path(),
            Some("neck.upsample")
        );
        assert_eq!(
            ConfigError::expression("lr_config.warmup_ratio", "division by zero").path(),
            Some("lr_config.warmup_ratio")
        );

        let io = ConfigError::io(
            "run.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(io.path(), Some("run.json"));
    }

    #[test]
    fn test_invariant_violation_carries_number() {
        let err = ConfigError::invariant(2, "head.in_channels (256) != neck.out_channels (512)");
        assert!(err.to_string().starts_with("invariant 2 violated"));
        assert_eq!(err.path(), None);
    }
}
