use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// 目錄查找失敗（房型或等級不存在），屬於資料/程式錯誤
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

    /// 聯絡表單不完整，使用者可修正後重新送出
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Contact submission failed: {message}")]
    SubmissionError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Io,
    Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QuoteError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            QuoteError::ConfigError { .. }
            | QuoteError::ConfigValidationError { .. }
            | QuoteError::InvalidConfigValueError { .. }
            | QuoteError::MissingConfigError { .. } => ErrorCategory::Configuration,
            QuoteError::ValidationError { .. } => ErrorCategory::Validation,
            QuoteError::IoError(_) | QuoteError::SerializationError(_) => ErrorCategory::Io,
            QuoteError::SubmissionError { .. } => ErrorCategory::Transport,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            QuoteError::ValidationError { .. } => ErrorSeverity::Low,
            QuoteError::SubmissionError { .. } => ErrorSeverity::Medium,
            QuoteError::ConfigValidationError { .. }
            | QuoteError::InvalidConfigValueError { .. }
            | QuoteError::MissingConfigError { .. }
            | QuoteError::IoError(_)
            | QuoteError::SerializationError(_) => ErrorSeverity::High,
            // 目錄查找失敗代表資料本身有誤，不應發生
            QuoteError::ConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.severity() <= ErrorSeverity::Medium
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QuoteError::ValidationError { message } => message.clone(),
            QuoteError::SubmissionError { .. } => {
                "Запитването не беше изпратено. Моля, опитайте отново.".to_string()
            }
            QuoteError::IoError(e) => format!("Could not write or read a file: {}", e),
            QuoteError::SerializationError(e) => format!("Could not serialize output: {}", e),
            QuoteError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            QuoteError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' has an invalid value '{}': {}", field, value, reason),
            QuoteError::MissingConfigError { field } => {
                format!("Required setting '{}' is missing", field)
            }
            QuoteError::ConfigError { message } => {
                format!("Catalog data is inconsistent: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Fill in name, phone and email, then submit again",
            ErrorCategory::Transport => "Retry the submission later",
            ErrorCategory::Io => "Check that the output directory exists and is writable",
            ErrorCategory::Configuration => {
                "Check the catalog TOML file and the --room/--tier ids against it"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;
