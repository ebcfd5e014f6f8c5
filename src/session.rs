use std::sync::{MutexGuard, PoisonError};

use crate::errors::LogError;
use crate::spotify::response::TokenResponse;
use crate::token::{TokenPair, TokenStore};
use crate::Locked;

#[derive(Debug, Default)]
struct State {
    tokens: Option<TokenPair>,
    authenticated: bool,
    current_track: Option<String>,
}

/// Process state shared by the refresher, the poller and the handshake routes.
///
/// The lock is only taken for short synchronous reads and writes, never across an
/// `.await`. Every change to the token pair is written through to the [`TokenStore`].
#[derive(Debug)]
pub struct Session {
    state: Locked<State>,
    store: TokenStore,
}

impl Session {
    /// Unauthenticated session backed by `store`
    pub fn new(store: TokenStore) -> Self {
        Self {
            state: Locked::new(State::default()),
            store,
        }
    }

    /// Session seeded with the token pair cached in `store`, if it can be read
    pub fn restore(store: TokenStore) -> Self {
        let tokens = store.load();
        let session = Self::new(store);
        if let Some(tokens) = tokens {
            log::info!("Loaded cached token from {}", session.store.path().display());
            let mut state = session.lock();
            state.tokens = Some(tokens);
            state.authenticated = true;
        }
        session
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().authenticated
    }

    pub fn tokens(&self) -> Option<TokenPair> {
        self.lock().tokens.clone()
    }

    pub fn current_track(&self) -> Option<String> {
        self.lock().current_track.clone()
    }

    /// Install the token pair from a completed handshake.
    ///
    /// A new handshake may belong to another account so the last seen track is
    /// forgotten as well.
    pub fn authenticate(&self, tokens: TokenPair) {
        {
            let mut state = self.lock();
            state.tokens = Some(tokens.clone());
            state.authenticated = true;
            state.current_track = None;
        }
        self.store.save(&tokens).log_error("Failed to persist token");
    }

    /// Apply a refresh response obtained with `used_refresh_token`.
    ///
    /// The refresh token is only replaced when spotify issued a new one. A response
    /// for a pair that a handshake replaced while the request was in flight is
    /// dropped. Returns `false` when nothing was updated.
    pub fn apply_refresh(&self, used_refresh_token: &str, response: TokenResponse) -> bool {
        let updated = {
            let mut state = self.lock();
            match state.tokens.as_mut() {
                Some(tokens) if tokens.refresh_token == used_refresh_token => {
                    tokens.access_token = response.access_token;
                    if let Some(refresh_token) = response.refresh_token {
                        tokens.refresh_token = refresh_token;
                    }
                    Some(tokens.clone())
                }
                Some(_) => {
                    log::info!("Token pair changed during refresh, dropping stale response");
                    None
                }
                None => None,
            }
        };

        match updated {
            Some(tokens) => {
                self.store.save(&tokens).log_error("Failed to persist token");
                true
            }
            None => false,
        }
    }

    /// Record `identity` as the latest track. Returns `true` when it differs from the
    /// previously recorded one.
    pub fn observe_track(&self, identity: &str) -> bool {
        let mut state = self.lock();
        if state.current_track.as_deref() == Some(identity) {
            return false;
        }
        state.current_track = Some(identity.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refresh_response(access: &str, refresh: Option<&str>) -> TokenResponse {
        TokenResponse {
            access_token: access.to_string(),
            token_type: "Bearer".to_string(),
            scope: None,
            expires_in: Some(3600),
            refresh_token: refresh.map(str::to_string),
        }
    }

    #[test]
    fn starts_unauthenticated_without_cache() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::restore(TokenStore::new(dir.path().join("tokens.json")));
        assert!(!session.is_authenticated());
        assert_eq!(session.tokens(), None);
    }

    #[test]
    fn restores_cached_pair() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("tokens.json"));
        store.save(&TokenPair::new("a", "r")).unwrap();

        let session = Session::restore(store);
        assert!(session.is_authenticated());
        assert_eq!(session.tokens(), Some(TokenPair::new("a", "r")));
    }

    #[test]
    fn authenticate_persists_and_resets_track() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(TokenStore::new(dir.path().join("tokens.json")));
        session.observe_track("old");

        session.authenticate(TokenPair::new("a", "r"));

        assert!(session.is_authenticated());
        assert_eq!(session.current_track(), None);
        assert_eq!(session.store().load(), Some(TokenPair::new("a", "r")));
    }

    #[test]
    fn refresh_keeps_refresh_token_when_not_reissued() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(TokenStore::new(dir.path().join("tokens.json")));
        session.authenticate(TokenPair::new("a1", "r1"));

        assert!(session.apply_refresh("r1", refresh_response("a2", None)));
        assert_eq!(session.tokens(), Some(TokenPair::new("a2", "r1")));
        assert_eq!(session.store().load(), Some(TokenPair::new("a2", "r1")));
    }

    #[test]
    fn refresh_replaces_reissued_refresh_token() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(TokenStore::new(dir.path().join("tokens.json")));
        session.authenticate(TokenPair::new("a1", "r1"));

        assert!(session.apply_refresh("r1", refresh_response("a2", Some("r2"))));
        assert_eq!(session.tokens(), Some(TokenPair::new("a2", "r2")));
    }

    #[test]
    fn refresh_without_tokens_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(TokenStore::new(dir.path().join("tokens.json")));

        assert!(!session.apply_refresh("r", refresh_response("a", Some("r"))));
        assert_eq!(session.tokens(), None);
        assert!(!session.store().path().exists());
    }

    #[test]
    fn refresh_for_a_replaced_pair_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(TokenStore::new(dir.path().join("tokens.json")));
        session.authenticate(TokenPair::new("old-access", "old-refresh"));
        let used = session.tokens().unwrap().refresh_token;

        session.authenticate(TokenPair::new("new-access", "new-refresh"));

        assert!(!session.apply_refresh(&used, refresh_response("old-access-2", Some("old-refresh-2"))));
        assert_eq!(session.tokens(), Some(TokenPair::new("new-access", "new-refresh")));
        assert_eq!(session.store().load(), Some(TokenPair::new("new-access", "new-refresh")));
    }

    #[test]
    fn observe_track_detects_changes_only() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(TokenStore::new(dir.path().join("tokens.json")));

        assert!(session.observe_track("a"));
        assert!(!session.observe_track("a"));
        assert!(session.observe_track("b"));
        assert!(session.observe_track("a"));
        assert_eq!(session.current_track().as_deref(), Some("a"));
    }
}
