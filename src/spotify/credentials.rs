use std::fmt::Display;

use base64::Engine;

/// Spotify application client id and secret.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub(crate) id: String,
    pub(crate) secret: String,
}

impl Credentials {
    /// Create credentials from a client ID and a client secret
    pub fn new(client_id: &str, client_secret: &str) -> Self {
        Self {
            id: client_id.to_string(),
            secret: client_secret.to_string(),
        }
    }
}

/// Base64 encoded `id:secret`, the value of a `Basic` authorization header
impl Display for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let auth = format!("{}:{}", self.id, self.secret);
        write!(f, "{}", base64::engine::general_purpose::STANDARD.encode(auth.as_bytes()))
    }
}
