use thiserror::Error;

/// Message shown whenever the backend cannot be reached at all.
pub const UNREACHABLE_MESSAGE: &str =
    "Cannot connect to server. Please check if backend is running.";

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad credentials or a server-side validation failure during sign-in or sign-up.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The backend could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// A client-side validation error, raised before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A non-2xx response. `message` is the response body, or a fallback when it is empty.
    #[error("Request failed with status {status}: {message}")]
    Application { status: u16, message: String },

    /// The durable session storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A payload could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The action requires an active session.
    #[error("Not signed in")]
    Unauthorized,
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// The text shown to the user when this error ends a flow.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Authentication(msg) => {
                tracing::warn!("Authentication failed: {}", msg);
                msg.clone()
            }

            AppError::Network(detail) => {
                tracing::error!("Backend unreachable: {}", detail);
                UNREACHABLE_MESSAGE.to_string()
            }

            AppError::Validation(msg) => {
                tracing::debug!("Validation error: {}", msg);
                msg.clone()
            }

            AppError::Application { status, message } => {
                tracing::warn!("Request failed ({}): {}", status, message);
                message.clone()
            }

            AppError::Storage(detail) => {
                tracing::error!("Storage error: {}", detail);
                "Could not access saved session".to_string()
            }

            AppError::Serialization(detail) => {
                tracing::error!("Serialization error: {}", detail);
                "Unexpected response from server".to_string()
            }

            AppError::Unauthorized => {
                tracing::debug!("Action requires sign-in");
                "Please login to continue".to_string()
            }
        }
    }

    /// Whether the error came from the transport rather than the server.
    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Network(_))
    }
}

impl From<sonic_rs::Error> for AppError {
    fn from(e: sonic_rs::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::Serialization(e.to_string())
        } else {
            AppError::Network(e.to_string())
        }
    }
}
