use serde::{Deserialize, Serialize};

use crate::models::user::SessionUser;

/// Represents the signed-in user's session.
///
/// The token is opaque to the client; it is only echoed back as a bearer
/// credential on authenticated requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The bearer token issued at sign-in.
    pub token: String,
    /// The identity the token was issued for.
    pub user: SessionUser,
}
