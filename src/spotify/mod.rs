pub use auth::OAuth;
pub use credentials::Credentials;

pub use crate::spotify::api::response;
use crate::spotify::api::SpotifyResponse;
use crate::token::TokenPair;
use crate::Error;

pub mod api;
pub mod auth;
mod credentials;

/// Spotify Web API client for the endpoints the service reads.
#[derive(Debug, Clone)]
pub struct Spotify {
    api_url: String,
    client: reqwest::Client,
}

impl Spotify {
    pub fn new<S: AsRef<str>>(api_url: S) -> Self {
        Self {
            api_url: api_url.as_ref().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Get the object currently being played on the user's account
    ///
    /// `None` when nothing is playing (`204 No Content`).
    pub async fn currently_playing(
        &self,
        token: &TokenPair,
    ) -> Result<Option<response::CurrentlyPlaying>, Error> {
        self.client
            .get(format!("{}/me/player/currently-playing", self.api_url))
            .query(&[("additional_types", "track,episode")])
            .header("Authorization", token.to_header())
            .send()
            .to_spotify_response()
            .await
    }
}
