use std::fmt::{Display, Formatter};

use color_eyre::{Report, Section};
pub use color_eyre::Result;

/// Errors raised while talking to Spotify, the webhook, or the token file.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The access token was rejected (`401`)
    InvalidToken,
    /// The token lacks a scope required by the endpoint (`403`)
    Forbidden,
    RateLimited,
    /// Any other non-success status with the message the server sent back
    Failed { code: u16, message: String },
    Request(String),
    Json(String),
    Io(String),
    Config(String),
    Custom(String),
}

impl Error {
    pub fn custom<D: Display>(message: D) -> Self {
        Error::Custom(message.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidToken => write!(f, "invalid or expired access token"),
            Error::Forbidden => write!(f, "access token is missing a required scope"),
            Error::RateLimited => write!(f, "exceeded spotify rate limit"),
            Error::Failed { code, message } => write!(f, "[{code}] {message}"),
            Error::Request(e) => write!(f, "request failed: {e}"),
            Error::Json(e) => write!(f, "failed to parse response: {e}"),
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Config(e) => write!(f, "invalid configuration: {e}"),
            Error::Custom(e) => write!(f, "{e}"),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::Request(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Json(value.to_string())
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for Error {
    fn from(value: serde_path_to_error::Error<serde_json::Error>) -> Self {
        Error::Json(value.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(value: serde_urlencoded::ser::Error) -> Self {
        Error::Custom(value.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}

impl From<envy::Error> for Error {
    fn from(value: envy::Error) -> Self {
        Error::Config(value.to_string())
    }
}

impl From<Error> for Report {
    fn from(value: Error) -> Self {
        let message = value.to_string();
        match value {
            Error::InvalidToken => Report::msg(message)
                .suggestion("The token is invalid or expired, try logging in again at /login"),
            Error::Forbidden => Report::msg(message)
                .suggestion("Re-authorize so the token carries the playback scopes"),
            Error::RateLimited => Report::msg(message).suggestion("Try again later"),
            Error::Config(_) => Report::msg(message)
                .suggestion("Check the environment variables or the .env file"),
            _ => Report::msg(message),
        }
    }
}
