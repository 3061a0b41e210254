use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid response body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("token store error: {0}")]
    Store(#[from] std::io::Error),
}

/// Coarse cause of a failed call. Only used for logging; every login failure
/// is shown to the user with the same message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Credentials,
    Server,
    Protocol,
    Local,
}

impl ClientError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Http(err) if err.is_timeout() || err.is_connect() => {
                FailureKind::Network
            }
            ClientError::Http(err) if err.is_decode() => FailureKind::Protocol,
            ClientError::Http(_) => FailureKind::Network,
            ClientError::Status { status, .. } if *status >= 500 => FailureKind::Server,
            ClientError::Status { .. } => FailureKind::Credentials,
            ClientError::Serialization(_) | ClientError::MalformedToken(_) => {
                FailureKind::Protocol
            }
            ClientError::InvalidBaseUrl { .. } | ClientError::Store(_) => FailureKind::Local,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
