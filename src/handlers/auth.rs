use crate::{
    error::{AppError, Result},
    models::user::{Credentials, RegisterRequest},
    notification::Severity,
    router::{Modal, Section},
    state::{App, DashboardCounts, PendingAction},
    validation::auth::*,
};

/// Demo account offered on the landing page.
pub const DEMO_USERNAME: &str = "patient1";
pub const DEMO_PASSWORD: &str = "password123";

impl App {
    /// Restores a saved session, shows the dashboard if there is one, then
    /// checks that the backend is reachable.
    pub async fn startup(&mut self) -> bool {
        if self.session.restore().is_some() {
            self.navigate(Section::Dashboard).await;
        } else {
            self.router.reset();
        }

        self.test_backend().await
    }

    /// Opens the sign-in form.
    pub fn show_login(&mut self) {
        self.router.open_modal(Modal::SignIn, self.session.is_active());
    }

    /// Opens the registration form.
    pub fn show_register(&mut self) {
        self.router.open_modal(Modal::Register, self.session.is_active());
    }

    pub fn close_modal(&mut self, modal: Modal) {
        self.router.close_modal(modal);
    }

    /// Handles the sign-in form.
    pub async fn handle_login(&mut self, credentials: Credentials) -> Result<()> {
        tracing::info!("🔐 Login attempt for: {}", credentials.username);
        if let Err(e) = validate_credentials(&credentials) {
            return Err(self.report(e));
        }

        self.pending.insert(PendingAction::Login);
        let result = self
            .session
            .sign_in(&self.gateway, &credentials)
            .await
            .map(|session| session.user.id);
        self.pending.remove(&PendingAction::Login);

        match result {
            Ok(user_id) => {
                tracing::info!("✅ User logged in: {}", user_id);
                self.router.close_modal(Modal::SignIn);
                self.navigate(Section::Dashboard).await;
                self.notify("Login successful!", Severity::Success);
                Ok(())
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Signs in with the demo account.
    pub async fn handle_demo_login(&mut self) -> Result<()> {
        self.handle_login(Credentials::new(DEMO_USERNAME, DEMO_PASSWORD))
            .await
    }

    /// Handles the registration form. Validation runs before any request is made.
    pub async fn handle_register(&mut self, request: RegisterRequest) -> Result<()> {
        tracing::info!("📝 Register attempt for: {}", request.username);
        if let Err(e) = validate_registration(&request) {
            return Err(self.report(e));
        }

        self.pending.insert(PendingAction::Register);
        let result = self.gateway.sign_up(&request).await;
        self.pending.remove(&PendingAction::Register);

        match result {
            Ok(confirmation) => {
                tracing::info!("✅ User registered: {} ({})", request.username, confirmation.trim());
                self.router.close_modal(Modal::Register);
                self.router.open_modal(Modal::SignIn, self.session.is_active());
                self.notify("Registration successful! Please login.", Severity::Success);
                Ok(())
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Signs out and returns to the landing page.
    pub fn logout(&mut self) -> Result<()> {
        let cleared = self.session.sign_out();

        self.projector.clear();
        self.dashboard = DashboardCounts::default();
        self.booking_doctor = None;
        self.router.reset();

        if let Err(e) = cleared {
            return Err(self.report(e));
        }

        self.notify("Logged out successfully", Severity::Success);
        Ok(())
    }

    /// Pings the health endpoint and reports the outcome.
    pub async fn test_backend(&mut self) -> bool {
        match self.gateway.health().await {
            Ok(_) => {
                tracing::info!("Backend connection: OK");
                self.notify("Backend connected successfully!", Severity::Success);
                true
            }
            Err(AppError::Network(e)) => {
                tracing::warn!("Backend connection: FAILED - Network error: {}", e);
                self.notify(
                    "Cannot connect to backend server. Make sure it's running.",
                    Severity::Error,
                );
                false
            }
            Err(e) => {
                tracing::warn!("Backend connection: FAILED - Server error: {}", e);
                self.notify("Backend server error", Severity::Error);
                false
            }
        }
    }
}
