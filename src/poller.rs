use std::future::Future;

use crate::errors::LogError;
use crate::notifier::Notify;
use crate::session::Session;
use crate::spotify::response::Track;
use crate::spotify::Spotify;
use crate::token::TokenPair;
use crate::Error;

/// Source of the item currently playing on the user's account
pub trait Playback {
    fn now_playing(&self, token: &TokenPair) -> impl Future<Output = Result<Option<Track>, Error>> + Send;
}

impl Playback for Spotify {
    async fn now_playing(&self, token: &TokenPair) -> Result<Option<Track>, Error> {
        Ok(self.currently_playing(token).await?.and_then(|playing| playing.item))
    }
}

/// What a single poll cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// No token yet, nothing was requested
    Unauthenticated,
    NothingPlaying,
    /// Same item as the previous cycle
    Unchanged,
    /// A new item started and the notifier was called
    Changed(String),
    Failed,
}

#[derive(Debug, Clone)]
pub struct Poller<P, N> {
    playback: P,
    notifier: N,
}

impl<P: Playback, N: Notify> Poller<P, N> {
    pub fn new(playback: P, notifier: N) -> Self {
        Self { playback, notifier }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Check what is playing and notify when the track changed.
    ///
    /// Errors end the cycle after being logged; the recorded track is left as is.
    pub async fn poll(&self, session: &Session) -> PollOutcome {
        let tokens = match session.tokens() {
            Some(tokens) if session.is_authenticated() => tokens,
            _ => {
                log::debug!("Not authenticated, skipping poll");
                return PollOutcome::Unauthenticated;
            }
        };

        let track = match self
            .playback
            .now_playing(&tokens)
            .await
            .log_error_ok("Failed to fetch currently playing track")
        {
            Some(Some(track)) => track,
            Some(None) => {
                log::debug!("No track currently playing");
                return PollOutcome::NothingPlaying;
            }
            None => return PollOutcome::Failed,
        };

        let identity = track.identity().to_string();
        if !session.observe_track(&identity) {
            return PollOutcome::Unchanged;
        }

        log::info!("Now playing {} ({identity})", track.name);
        self.notifier.notify(&track).await;
        PollOutcome::Changed(identity)
    }
}
