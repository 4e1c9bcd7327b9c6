use reqwest::StatusCode;

/// The ways a request to the bank backend, or the input for one, can fail.
///
/// Every variant displays as the message shown to the user.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ClientError {
    /// The form input was rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The backend answered with a non-2xx status, or could not be reached.
    ///
    /// `status` is `None` for transport failures. `message` is the backend's own message
    /// when it sent one.
    #[error("{message}")]
    Network {
        status: Option<StatusCode>,
        message: String,
    },

    /// The backend did not answer within the configured request timeout.
    #[error("{0}")]
    Timeout(String),

    /// The backend answered with JSON that does not have the expected shape.
    #[error("{0}")]
    Parse(String),
}

/// The kind of a [ClientError], without its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    Timeout,
    Parse,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::Network { .. } => ErrorKind::Network,
            ClientError::Timeout(_) => ErrorKind::Timeout,
            ClientError::Parse(_) => ErrorKind::Parse,
        }
    }

    /// The message displayed to the user.
    pub fn message(&self) -> String {
        self.to_string()
    }
}
