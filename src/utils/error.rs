use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Missing data: {what}")]
    MissingData { what: String },

    #[error("Model not trained")]
    ModelNotTrained,

    #[error("Model persistence failed: {message}")]
    ModelPersistenceError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Model encoding error: {0}")]
    EncodingError(#[from] bincode::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Model,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScoringError {
    pub fn missing_data(what: impl Into<String>) -> Self {
        Self::MissingData { what: what.into() }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingData { .. } => ErrorCategory::Input,
            Self::ModelNotTrained => ErrorCategory::Model,
            Self::ModelPersistenceError { .. }
            | Self::IoError(_)
            | Self::SerializationError(_)
            | Self::EncodingError(_) => ErrorCategory::Storage,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Model => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingData { .. } => "Ingest at least one lead and one company before retrying",
            Self::ModelNotTrained => "Run the train command before scoring",
            Self::ModelPersistenceError { .. } | Self::IoError(_) => {
                "Check that the model path is writable and the disk is not full"
            }
            Self::SerializationError(_) => "Make sure the input files contain valid JSON records",
            Self::EncodingError(_) => "Delete the stored model file and retrain",
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Check the configuration file syntax"
            }
            Self::InvalidConfigValueError { .. } => "Fix the reported configuration value",
            Self::MissingConfigError { .. } => "Check the --config path or omit it to use defaults",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingData { what } => format!("Nothing to work with: {}", what),
            Self::ModelNotTrained => "The scoring model has not been trained yet".to_string(),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_is_low_severity_input_error() {
        let err = ScoringError::missing_data("no leads provided");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.to_string(), "Missing data: no leads provided");
    }

    #[test]
    fn test_io_error_converts_and_is_critical() {
        let err: ScoringError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_user_friendly_message_for_untrained_model() {
        let err = ScoringError::ModelNotTrained;
        assert!(err.user_friendly_message().contains("not been trained"));
        assert!(err.recovery_suggestion().contains("train"));
    }
}
