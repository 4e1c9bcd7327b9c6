//! Defines the app level error type.

/// The errors that may occur while setting up the application.
///
/// Failures talking to the bank backend are [crate::client::ClientError]s and end up as a
/// message on the page instead.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The configured timezone is not a canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The HTTP client for the bank backend could not be created.
    #[error("could not create the HTTP client: {0}")]
    HttpClient(String),
}
