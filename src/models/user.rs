use garde::Validate;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Role assigned to every account created through registration.
pub const PATIENT_ROLE: &str = "PATIENT";

/// The identity stored alongside the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// The user's id; doubles as the patient id for appointment lookups.
    pub id: i64,
    /// The user's username.
    pub username: String,
    /// The user's email address.
    #[serde(default)]
    pub email: Option<String>,
    /// The user's roles, as granted by the backend.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Credentials for sign-in. The password is wiped when dropped.
#[derive(Serialize, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The sign-in response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub token: String,
    #[serde(rename = "type", default)]
    pub token_type: Option<String>,
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl SignInResponse {
    /// Splits the response into the stored token and user.
    pub fn into_parts(self) -> (String, SessionUser) {
        let user = SessionUser {
            id: self.id,
            username: self.username,
            email: self.email,
            roles: self.roles,
        };
        (self.token, user)
    }
}

/// The request payload for account registration.
#[derive(Debug, Clone, Serialize, Validate, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[garde(length(min = 1))]
    pub username: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(chars, min = 6))]
    pub password: String,
    #[garde(length(min = 1))]
    pub first_name: String,
    #[garde(length(min = 1))]
    pub last_name: String,
    #[garde(skip)]
    pub phone: Option<String>,
    #[garde(skip)]
    pub roles: Vec<String>,
}

impl RegisterRequest {
    /// A patient registration; `phone` is optional and left empty.
    pub fn patient(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: None,
            roles: vec![PATIENT_ROLE.to_string()],
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}
