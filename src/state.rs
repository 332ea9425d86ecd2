use std::collections::BTreeSet;

use chrono::{Local, NaiveDateTime};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::gateway::client::ApiClient;
use crate::notification::{NotificationPresenter, Severity};
use crate::projector::AppointmentProjector;
use crate::router::ViewRouter;
use crate::services::session::SessionStore;
use crate::storage::DurableStorage;

/// Form submissions that show a busy state while their request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PendingAction {
    Login,
    Register,
    Booking,
}

/// Record counts on the dashboard. `None` until the first successful load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub patients: Option<usize>,
    pub doctors: Option<usize>,
    pub appointments: Option<usize>,
}

/// The client's entire view state.
///
/// Event handlers live in `crate::handlers` as `impl App` blocks; they are the
/// only code that mutates this.
pub struct App {
    pub(crate) config: Config,
    pub(crate) gateway: ApiClient,
    pub(crate) session: SessionStore,
    pub(crate) projector: AppointmentProjector,
    pub(crate) router: ViewRouter,
    pub(crate) notifications: NotificationPresenter,
    pub(crate) dashboard: DashboardCounts,
    pub(crate) booking_doctor: Option<i64>,
    pub(crate) pending: BTreeSet<PendingAction>,
}

impl App {
    /// Creates a new `App`. No session is active until `startup` or a sign-in.
    ///
    /// # Arguments
    ///
    /// * `config` - The client's configuration.
    /// * `storage` - Where the session is persisted.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `App`.
    pub fn new(config: Config, storage: Box<dyn DurableStorage>) -> Result<Self> {
        let gateway = ApiClient::new(config.api_base_url.clone())?;
        tracing::info!("✅ API client ready for {}", gateway.base_url());

        let projector = AppointmentProjector::new(config.doctor_fallback);
        let notifications = NotificationPresenter::new(config.notification_ttl);

        Ok(Self {
            config,
            gateway,
            session: SessionStore::new(storage),
            projector,
            router: ViewRouter::new(),
            notifications,
            dashboard: DashboardCounts::default(),
            booking_doctor: None,
            pending: BTreeSet::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn gateway(&self) -> &ApiClient {
        &self.gateway
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn projector(&self) -> &AppointmentProjector {
        &self.projector
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    pub fn notifications(&self) -> &NotificationPresenter {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationPresenter {
        &mut self.notifications
    }

    pub fn dashboard(&self) -> DashboardCounts {
        self.dashboard
    }

    /// Doctor preselected on the booking form, if the form was opened from a doctor card.
    pub fn booking_doctor(&self) -> Option<i64> {
        self.booking_doctor
    }

    pub fn is_pending(&self, action: PendingAction) -> bool {
        self.pending.contains(&action)
    }

    pub(crate) fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notifications.notify(message, severity);
    }

    /// Reports `e` through the notification presenter and hands it back.
    pub(crate) fn report(&mut self, e: AppError) -> AppError {
        let message = e.user_message();
        self.notify(message, Severity::Error);
        e
    }

    /// Token and patient id of the active session.
    pub(crate) fn credentials(&self) -> Result<(String, i64)> {
        let session = self.session.current().ok_or(AppError::Unauthorized)?;
        Ok((session.token.clone(), session.user.id))
    }
}

/// The local wall-clock time; appointment times carry no zone.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
