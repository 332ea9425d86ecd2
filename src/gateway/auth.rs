use http::Method;

use crate::error::{AppError, Result};
use crate::gateway::client::ApiClient;
use crate::models::user::{Credentials, RegisterRequest, SignInResponse};

/// Turns a rejected auth request into an authentication error carrying the server's text.
fn into_auth_error(e: AppError) -> AppError {
    match e {
        AppError::Application { message, .. } => AppError::Authentication(message),
        other => other,
    }
}

impl ApiClient {
    /// POST /auth/signin
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<SignInResponse> {
        let raw = self
            .send_json(Method::POST, "/auth/signin", None, credentials, "Login failed")
            .await
            .map_err(into_auth_error)?;

        Ok(sonic_rs::from_str(&raw)?)
    }

    /// POST /auth/signup
    ///
    /// Returns the server's confirmation text.
    pub async fn sign_up(&self, request: &RegisterRequest) -> Result<String> {
        self.send_json(Method::POST, "/auth/signup", None, request, "Registration failed")
            .await
            .map_err(into_auth_error)
    }

    /// GET /auth/health
    pub async fn health(&self) -> Result<String> {
        self.get_text("/auth/health", None, "Backend server error")
            .await
    }
}
