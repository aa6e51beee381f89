//! Session manager
//!
//! Owns the bearer token and nothing else. The token store is injected so the
//! TUI, the CLI and the tests all go through the same login/logout lifecycle
//! instead of touching the token file directly.

use tracing::{info, warn};

use crate::client::{ClientResult, TaskApi};
use crate::error::{AppError, Result};
use crate::storage::session::{FileTokenStore, TokenStore};

/// Explicit session context passed to every component that needs auth
pub struct SessionContext {
    store: Box<dyn TokenStore>,
}

impl SessionContext {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Session backed by ~/.taskpad/session.toml
    pub fn file_backed() -> Self {
        Self::new(FileTokenStore::default_location())
    }

    /// Exchange credentials for a token and persist it.
    ///
    /// Nothing is stored unless the server accepted the credentials and
    /// returned a token.
    pub fn login(&self, api: &dyn TaskApi, username: &str, password: &str) -> Result<String> {
        self.accept_login(username, api.login(username, password))
    }

    /// Second half of [`login`](Self::login): persist the token from a login
    /// call that already ran elsewhere (the TUI runs it on a worker thread).
    pub fn accept_login(&self, username: &str, result: ClientResult<String>) -> Result<String> {
        let token = result.map_err(|e| {
            warn!(%username, error = %e, "login rejected");
            AppError::AuthFailure(e)
        })?;
        self.store.save(&token)?;
        info!(%username, "logged in");
        Ok(token)
    }

    /// Stored token, if any. Not validated: an expired token only shows up as
    /// a failed request later.
    pub fn token(&self) -> Option<String> {
        match self.store.load() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "cannot read stored token");
                None
            }
        }
    }

    /// Presence check run on every protected entry and every protected call
    pub fn require_session(&self) -> Result<String> {
        self.token().ok_or(AppError::SessionRequired)
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Forget the token. No confirmation, no server call.
    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        info!("logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::{FakeApi, GOOD_TOKEN};
    use crate::storage::session::MemoryTokenStore;

    #[test]
    fn test_login_stores_token() {
        let api = FakeApi::default();
        let session = SessionContext::new(MemoryTokenStore::default());
        assert!(!session.is_logged_in());

        let token = session.login(&api, "alice", "secret").unwrap();
        assert_eq!(token, GOOD_TOKEN);
        assert_eq!(session.token().as_deref(), Some(GOOD_TOKEN));
        assert_eq!(session.require_session().unwrap(), GOOD_TOKEN);
    }

    #[test]
    fn test_rejected_login_stores_nothing() {
        let api = FakeApi::default();
        let session = SessionContext::new(MemoryTokenStore::default());

        let err = session.login(&api, "alice", "nope").unwrap_err();
        assert!(matches!(err, AppError::AuthFailure(_)));
        assert_eq!(err.to_string(), "login failed");
        assert!(session.token().is_none());
    }

    #[test]
    fn test_failed_login_keeps_previous_token() {
        let api = FakeApi::default();
        let session = SessionContext::new(MemoryTokenStore::with_token("old"));
        assert!(session.login(&api, "bob", "x").is_err());
        assert_eq!(session.token().as_deref(), Some("old"));
    }

    #[test]
    fn test_accept_login_result() {
        use crate::client::ClientError;

        let session = SessionContext::new(MemoryTokenStore::default());
        let err = session
            .accept_login("alice", Err(ClientError::Transport("refused".into())))
            .unwrap_err();
        assert!(matches!(err, AppError::AuthFailure(_)));
        assert!(session.token().is_none());

        session.accept_login("alice", Ok("t-1".to_string())).unwrap();
        assert_eq!(session.token().as_deref(), Some("t-1"));
    }

    #[test]
    fn test_logout_clears_token() {
        let session = SessionContext::new(MemoryTokenStore::with_token("abc"));
        session.logout().unwrap();
        assert!(session.token().is_none());
        assert!(matches!(
            session.require_session(),
            Err(AppError::SessionRequired)
        ));
        // 重复 logout 不报错
        session.logout().unwrap();
    }

    #[test]
    fn test_file_backed_session_survives_restart() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("session.toml");
        let api = FakeApi::default();

        SessionContext::new(FileTokenStore::new(&path))
            .login(&api, "alice", "secret")
            .unwrap();

        let reopened = SessionContext::new(FileTokenStore::new(&path));
        assert_eq!(reopened.token().as_deref(), Some(GOOD_TOKEN));
    }
}
