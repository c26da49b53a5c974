use crate::core::form::FormErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BankError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("{method} {url} returned HTTP {status}")]
    HttpStatusError {
        method: String,
        url: String,
        status: u16,
    },

    #[error("{resource} with id {id} not found")]
    NotFoundError { resource: String, id: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

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

    #[error("Form validation failed: {0}")]
    ValidationError(FormErrors),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Server,
    Data,
    Configuration,
    Validation,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BankError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BankError::ApiError(_) => ErrorCategory::Network,
            BankError::HttpStatusError { .. } | BankError::NotFoundError { .. } => {
                ErrorCategory::Server
            }
            BankError::CsvError(_) | BankError::SerializationError(_) => ErrorCategory::Data,
            BankError::UrlError(_)
            | BankError::ConfigError { .. }
            | BankError::ConfigValidationError { .. }
            | BankError::InvalidConfigValueError { .. }
            | BankError::MissingConfigError { .. } => ErrorCategory::Configuration,
            BankError::ValidationError(_) => ErrorCategory::Validation,
            BankError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BankError::ValidationError(_) | BankError::NotFoundError { .. } => ErrorSeverity::Low,
            BankError::ApiError(_) => ErrorSeverity::Medium,
            BankError::HttpStatusError { status, .. } if *status < 500 => ErrorSeverity::Medium,
            BankError::HttpStatusError { .. }
            | BankError::CsvError(_)
            | BankError::SerializationError(_) => ErrorSeverity::High,
            BankError::UrlError(_)
            | BankError::ConfigError { .. }
            | BankError::ConfigValidationError { .. }
            | BankError::InvalidConfigValueError { .. }
            | BankError::MissingConfigError { .. }
            | BankError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息，不含內部細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            BankError::ApiError(_) => "Could not reach the banking API".to_string(),
            BankError::HttpStatusError { status, .. } => {
                format!("The banking API rejected the request (HTTP {})", status)
            }
            BankError::NotFoundError { resource, id } => {
                format!("No {} exists with id {}", resource, id)
            }
            BankError::CsvError(_) => "Could not write the CSV export".to_string(),
            BankError::IoError(e) => format!("File system error: {}", e),
            BankError::SerializationError(_) => {
                "The data could not be read or written as JSON".to_string()
            }
            BankError::UrlError(e) => format!("Invalid URL: {}", e),
            BankError::ConfigError { message } => format!("Configuration problem: {}", message),
            BankError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            BankError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            BankError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            BankError::ValidationError(errors) => {
                format!("Please fix the highlighted fields: {}", errors)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the API server is running and the base URL is correct",
            ErrorCategory::Server => "Verify the record id and try again, or inspect the server logs",
            ErrorCategory::Data => "Check that the server response matches the expected record shape",
            ErrorCategory::Configuration => "Review the configuration file and command line flags",
            ErrorCategory::Validation => "Correct the reported fields and submit again",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, BankError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_severity_depends_on_code() {
        let client_side = BankError::HttpStatusError {
            method: "GET".to_string(),
            url: "http://localhost/api/users".to_string(),
            status: 404,
        };
        let server_side = BankError::HttpStatusError {
            method: "GET".to_string(),
            url: "http://localhost/api/users".to_string(),
            status: 503,
        };

        assert_eq!(client_side.severity(), ErrorSeverity::Medium);
        assert_eq!(server_side.severity(), ErrorSeverity::High);
        assert_eq!(server_side.category(), ErrorCategory::Server);
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = BankError::MissingConfigError {
            field: "api.base_url".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("api.base_url"));
    }
}
