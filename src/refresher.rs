use crate::errors::LogError;
use crate::session::Session;
use crate::spotify::OAuth;
use crate::{Error, Shared};

/// Keeps the session's access token fresh by trading in the refresh token.
#[derive(Debug, Clone)]
pub struct Refresher {
    oauth: Shared<OAuth>,
}

impl Refresher {
    pub fn new(oauth: Shared<OAuth>) -> Self {
        Self { oauth }
    }

    /// Refresh the access token, returning `Ok(false)` when there is no token pair to
    /// refresh yet or a handshake replaced it while the request was in flight.
    ///
    /// On error the session is left untouched.
    pub async fn try_refresh(&self, session: &Session) -> Result<bool, Error> {
        let Some(tokens) = session.tokens() else {
            log::debug!("Not authenticated, skipping token refresh");
            return Ok(false);
        };

        log::info!("Refreshing access token");
        let response = self.oauth.refresh(&tokens.refresh_token).await?;
        Ok(session.apply_refresh(&tokens.refresh_token, response))
    }

    /// Scheduled refresh. Failures are logged and the next tick tries again.
    pub async fn refresh(&self, session: &Session) {
        if let Some(true) = self.try_refresh(session).await.log_error_ok("Token refresh failed") {
            log::info!("Access token refreshed");
        }
    }
}
