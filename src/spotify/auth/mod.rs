use uuid::Uuid;

use super::api::response::TokenResponse;
use super::api::SpotifyResponse;
use super::Credentials;
use crate::config::Config;
use crate::token::TokenPair;
use crate::Error;

/// Permissions requested during the handshake
pub const SCOPES: [&str; 2] = ["user-read-playback-state", "user-read-currently-playing"];

/// Spotify authorization code flow: building the consent url, exchanging the returned
/// code and refreshing access tokens.
#[derive(Debug, Clone)]
pub struct OAuth {
    credentials: Credentials,
    redirect: String,
    state: String,
    accounts_url: String,
    client: reqwest::Client,
}

impl OAuth {
    pub fn new<S: Into<String>>(credentials: Credentials, redirect: S, accounts_url: S) -> Self {
        Self {
            credentials,
            redirect: redirect.into(),
            state: Uuid::new_v4().to_string(),
            accounts_url: accounts_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Credentials::new(&config.spotify_client_id, &config.spotify_client_secret),
            config.spotify_redirect_uri.clone(),
            config.spotify_accounts_url.clone(),
        )
    }

    /// Opaque value sent with the consent request and echoed back on the callback
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn authorization_url(&self) -> Result<String, Error> {
        Ok(format!(
            "{}/authorize?{}",
            self.accounts_url,
            serde_urlencoded::to_string([
                ("response_type", "code".to_string()),
                ("client_id", self.credentials.id.clone()),
                ("scope", SCOPES.join(" ")),
                ("redirect_uri", self.redirect.clone()),
                ("state", self.state.clone()),
            ])?
        ))
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse, Error> {
        self.client
            .post(format!("{}/api/token", self.accounts_url))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Authorization", format!("Basic {}", self.credentials))
            .body(serde_urlencoded::to_string(form)?)
            .send()
            .to_spotify_response()
            .await
    }

    /// Exchange the code from the consent redirect for the initial token pair.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenPair, Error> {
        let token = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect.as_str()),
            ])
            .await?;

        match token.refresh_token {
            Some(refresh_token) => Ok(TokenPair::new(token.access_token, refresh_token)),
            None => Err(Error::custom(
                "failed to parse token response: missing refresh_token",
            )),
        }
    }

    /// Request a new access token. The response only carries a refresh token when
    /// spotify decided to rotate it.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, Error> {
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.credentials.id.as_str()),
        ])
        .await
    }
}
