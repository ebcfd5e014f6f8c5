use serde::Deserialize;

/// `{"error": {"status": 401, "message": "The access token expired"}}`
#[derive(Clone, Debug, Deserialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

/// `{"error": "invalid_grant", "error_description": "Invalid authorization code"}`
#[derive(Clone, Debug, Deserialize)]
pub struct AuthError {
    pub error: String,
    pub error_description: Option<String>,
}

/// Error bodies returned by the Web API and the accounts service respectively.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Api { error: ApiError },
    Auth(AuthError),
}

impl ErrorBody {
    pub fn message(&self) -> String {
        match self {
            ErrorBody::Api { error } => error.message.clone(),
            ErrorBody::Auth(AuthError {
                error,
                error_description: Some(description),
            }) => format!("{error}: {description}"),
            ErrorBody::Auth(AuthError { error, .. }) => error.clone(),
        }
    }
}
