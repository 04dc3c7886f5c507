use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeoBlogError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Insufficient keywords: need at least 3, got {found}")]
    InsufficientKeywords { found: usize },

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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

/// 關鍵字查詢的錯誤，一律在 KeywordSource 邊界轉為備援關鍵字，不會往外傳。
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("keyword request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("keyword endpoint returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("only {found} usable keywords found in response")]
    TooFewKeywords { found: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Generation,
    Configuration,
    Network,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a failed run.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl SeoBlogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SeoBlogError::InvalidInput { .. } => ErrorCategory::Input,
            SeoBlogError::InsufficientKeywords { .. } => ErrorCategory::Generation,
            SeoBlogError::HttpClientError(_) => ErrorCategory::Network,
            SeoBlogError::CsvError(_)
            | SeoBlogError::IoError(_)
            | SeoBlogError::SerializationError(_) => ErrorCategory::Storage,
            SeoBlogError::ConfigValidationError { .. }
            | SeoBlogError::InvalidConfigValueError { .. }
            | SeoBlogError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Generation => ErrorSeverity::High,
            ErrorCategory::Network | ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SeoBlogError::InvalidInput { message } => message.clone(),
            SeoBlogError::InsufficientKeywords { found } => format!(
                "Could not build the blog post: only {} keywords were available",
                found
            ),
            SeoBlogError::HttpClientError(_) => {
                "Could not set up the HTTP client for keyword lookup".to_string()
            }
            SeoBlogError::IoError(e) => format!("Could not write output files: {}", e),
            SeoBlogError::CsvError(_) => "Could not write the CSV summary".to_string(),
            SeoBlogError::SerializationError(_) => {
                "Could not serialize the blog post to JSON".to_string()
            }
            SeoBlogError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            SeoBlogError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            SeoBlogError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Provide a non-empty product name",
            ErrorCategory::Generation => "Supply at least 3 keywords per product",
            ErrorCategory::Configuration => "Check the command line flags or the TOML config file",
            ErrorCategory::Network => "Check the user agent and header values in the configuration",
            ErrorCategory::Storage => "Check that the output path exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, SeoBlogError>;
