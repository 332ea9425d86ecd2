use garde::Validate;

use crate::error::{AppError, Result};
use crate::models::user::{Credentials, RegisterRequest};

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validates sign-in credentials.
///
/// Only presence is checked; the backend decides whether they are correct.
pub fn validate_credentials(credentials: &Credentials) -> Result<()> {
    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        return Err(AppError::Validation(
            "Please enter your username and password".to_string(),
        ));
    }

    Ok(())
}

/// Validates a registration form before it is sent.
///
/// # Arguments
///
/// * `request` - The registration payload.
///
/// # Returns
///
/// A `Result<()>` indicating whether the payload may be submitted.
pub fn validate_registration(request: &RegisterRequest) -> Result<()> {
    let required = [
        &request.username,
        &request.email,
        &request.password,
        &request.first_name,
        &request.last_name,
    ];

    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(AppError::Validation(
            "Please fill in all required fields".to_string(),
        ));
    }

    if let Err(report) = request.validate() {
        let password_too_short = report
            .iter()
            .any(|(path, _)| path.to_string() == "password");

        if password_too_short {
            return Err(AppError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let email_invalid = report.iter().any(|(path, _)| path.to_string() == "email");
        if email_invalid {
            return Err(AppError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }

        return Err(AppError::Validation(report.to_string()));
    }

    Ok(())
}
