#[derive(thiserror::Error, Debug)]
pub enum MarketDataError {
    #[error("Health check failed")]
    HealthCheckFailed,

    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    /// Non-2xx answer. `body` is truncated to the first 500 characters.
    #[error("HTTP {status} from {endpoint}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        endpoint: String,
        body: String,
    },

    /// A 2xx answer that does not contain what was asked for.
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Coarse failure class of a [`MarketDataError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request did not complete or the server answered with a non-2xx status.
    Transport,
    /// The body was not the JSON shape expected for the query.
    Parse,
    InvalidArgument,
    Config,
}

impl MarketDataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TransportError(_) | Self::HttpStatus { .. } | Self::HealthCheckFailed => {
                ErrorKind::Transport
            }
            Self::ParseError(_) | Self::ApiError(_) => ErrorKind::Parse,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::ConfigError(_) => ErrorKind::Config,
        }
    }

    /// HTTP status of a non-2xx answer, if that is what failed.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::TransportError(e) => e.status(),
            _ => None,
        }
    }
}
