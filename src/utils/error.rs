use reqwest::StatusCode;
use thiserror::Error;

/// Reasons a fetched body is rejected as markup.
#[derive(Error, Debug)]
pub enum MarkupError {
    #[error("document contains no markup")]
    NoMarkup,
}

#[derive(Error, Debug)]
pub enum WebmentionError {
    #[error("Failed to fetch discovery document {url} [Status {status}]")]
    FetchFailure { url: String, status: StatusCode },

    #[error("Failed to parse HTML: {0}")]
    MarkupParse(#[from] MarkupError),

    #[error("Failed to extract URL for webmention endpoint: element has no href")]
    MissingReference,

    #[error("Webmention URL cannot be parsed: {url}: {reason}")]
    InvalidEndpointUrl { url: String, reason: String },

    #[error("Source URL cannot be parsed: {url}: {source}")]
    InvalidSourceUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Destination URL cannot be parsed: {url}: {source}")]
    InvalidDestinationUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Document URL cannot be parsed: {url}: {source}")]
    InvalidDocumentUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Failed to dispatch webmention to {endpoint} [Status {status}]")]
    DeliveryFailure { endpoint: String, status: StatusCode },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Discovery,
    Input,
    Delivery,
    Transport,
    Configuration,
}

impl WebmentionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FetchFailure { .. } | Self::MarkupParse(_) | Self::MissingReference => {
                ErrorCategory::Discovery
            }
            Self::InvalidEndpointUrl { .. }
            | Self::InvalidDocumentUrl { .. }
            | Self::InvalidSourceUrl { .. }
            | Self::InvalidDestinationUrl { .. } => ErrorCategory::Input,
            Self::DeliveryFailure { .. } => ErrorCategory::Delivery,
            Self::Transport(_) => ErrorCategory::Transport,
            Self::IoError(_) | Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    /// HTTP status observed by the remote side, if the error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::FetchFailure { status, .. } | Self::DeliveryFailure { status, .. } => {
                Some(*status)
            }
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Process exit code used by the command line front end.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => 1,
            ErrorCategory::Discovery | ErrorCategory::Delivery => 2,
            ErrorCategory::Transport => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, WebmentionError>;
