use serde::Deserialize;

/// `POST /api/token`
///
/// ```json
/// {
///     "access_token": "NgCXRK...MzYjw",
///     "token_type": "Bearer",
///     "scope": "user-read-playback-state user-read-currently-playing",
///     "expires_in": 3600,
///     "refresh_token": "NgAagA...Um_SHo"
/// }
/// ```
///
/// A refresh response may leave out `refresh_token`, in which case the previous one
/// stays valid.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
}
