use crate::error::{AppError, Result};
use crate::gateway::client::ApiClient;
use crate::models::session::Session;
use crate::models::user::{Credentials, SessionUser};
use crate::storage::{DurableStorage, TOKEN_KEY, USER_KEY};

/// Holds the active session and mirrors it into durable storage.
pub struct SessionStore {
    storage: Box<dyn DurableStorage>,
    session: Option<Session>,
}

impl SessionStore {
    /// Creates an empty store. Call [`SessionStore::restore`] to pick up a saved session.
    pub fn new(storage: Box<dyn DurableStorage>) -> Self {
        Self {
            storage,
            session: None,
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// Authenticates against the backend and persists the resulting session.
    ///
    /// # Arguments
    ///
    /// * `gateway` - The API client.
    /// * `credentials` - Username and password.
    ///
    /// # Returns
    ///
    /// A `Result` containing the new `Session`. A rejected sign-in leaves any
    /// previous session in place. If the new session cannot be stored, both
    /// keys are removed and no session is active.
    pub async fn sign_in(
        &mut self,
        gateway: &ApiClient,
        credentials: &Credentials,
    ) -> Result<&Session> {
        tracing::debug!("🔐 Signing in: {}", credentials.username);

        let response = gateway.sign_in(credentials).await?;
        let (token, user) = response.into_parts();
        let session = Session { token, user };

        if let Err(e) = self.persist(&session) {
            tracing::error!("❌ Failed to store session: {}", e);
            self.session = None;
            if let Err(cleanup) = self.clear_storage() {
                tracing::error!("❌ Failed to clear partial session: {}", cleanup);
            }
            return Err(e);
        }
        tracing::info!("✅ Signed in as user {}", session.user.id);

        let session: &Session = self.session.insert(session);
        Ok(session)
    }

    /// Clears the session and both storage keys.
    pub fn sign_out(&mut self) -> Result<()> {
        if let Some(session) = self.session.take() {
            tracing::info!("👋 Signing out user {}", session.user.id);
        }
        self.clear_storage()
    }

    fn clear_storage(&self) -> Result<()> {
        // Attempt both removals even if the first fails.
        let token = self.storage.remove(TOKEN_KEY);
        let user = self.storage.remove(USER_KEY);
        token.and(user)
    }

    /// Rebuilds the session from durable storage.
    ///
    /// A stored user that does not parse is treated as no session and both
    /// keys are removed.
    pub fn restore(&mut self) -> Option<&Session> {
        let (token, raw_user) = match (self.storage.get(TOKEN_KEY), self.storage.get(USER_KEY)) {
            (Ok(Some(token)), Ok(Some(user))) if !token.is_empty() => (token, user),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("❌ Could not read saved session: {}", e);
                return None;
            }
            _ => {
                tracing::debug!("No saved session");
                return None;
            }
        };

        match sonic_rs::from_str::<SessionUser>(&raw_user) {
            Ok(user) => {
                tracing::info!("✅ Restored session for user {}", user.id);
                let session: &Session = self.session.insert(Session { token, user });
                Some(session)
            }
            Err(e) => {
                tracing::warn!("❌ Saved user is malformed, signing out: {}", e);
                if let Err(e) = self.sign_out() {
                    tracing::error!("❌ Failed to clear malformed session: {}", e);
                }
                None
            }
        }
    }

    fn persist(&self, session: &Session) -> Result<()> {
        let user_json = sonic_rs::to_string(&session.user)
            .map_err(|e| AppError::Serialization(format!("Session serialization failed: {}", e)))?;

        self.storage.set(TOKEN_KEY, &session.token)?;
        self.storage.set(USER_KEY, &user_json)?;
        Ok(())
    }
}
