use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP source {url} answered with status {status}")]
    HttpStatusError { url: String, status: u16 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration field '{field}' is invalid: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data format error: {message}")]
    DataFormatError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DashError {
    pub fn data_format(message: impl Into<String>) -> Self {
        DashError::DataFormatError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DashError::HttpError(_) | DashError::HttpStatusError { .. } => ErrorCategory::Network,
            DashError::CsvError(_)
            | DashError::SerializationError(_)
            | DashError::DataFormatError { .. } => ErrorCategory::Data,
            DashError::IoError(_) => ErrorCategory::Io,
            DashError::ConfigError { .. }
            | DashError::ConfigValidationError { .. }
            | DashError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Data | ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DashError::HttpError(_) | DashError::HttpStatusError { .. } => {
                "Check the data URL and your network connection, then try again"
            }
            DashError::IoError(_) => "Make sure the data file exists and is readable",
            DashError::CsvError(_) | DashError::DataFormatError { .. } => {
                "The data file must be a CSV with 'Country Name', 'Country Code' and one column per year"
            }
            DashError::SerializationError(_) => "Try the text output format instead",
            DashError::ConfigError { .. } | DashError::ConfigValidationError { .. } => {
                "Check the TOML configuration file syntax"
            }
            DashError::InvalidConfigValueError { .. } => {
                "Fix the offending option or configuration value"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DashError::IoError(e) => format!("Could not read the data file: {}", e),
            DashError::HttpError(_) | DashError::HttpStatusError { .. } => {
                format!("Could not download the data: {}", self)
            }
            DashError::CsvError(_) | DashError::DataFormatError { .. } => {
                format!("The GDP data is malformed: {}", self)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
