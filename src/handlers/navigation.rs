use crate::{
    error::Result,
    notification::Severity,
    router::{Navigation, Section},
    state::{App, DashboardCounts},
};

impl App {
    /// Switches to `section` and loads its data.
    ///
    /// Gated sections open the sign-in form instead when nobody is signed in.
    /// Load failures are reported and leave the section showing its previous data.
    pub async fn navigate(&mut self, section: Section) -> Navigation {
        let navigation = self.router.navigate(section, self.session.is_active());

        match navigation {
            Navigation::Shown(Section::Dashboard) => {
                self.load_dashboard().await;
            }
            Navigation::Shown(Section::Appointments) => {
                if let Err(e) = self.load_appointments().await {
                    self.report(e);
                }
            }
            Navigation::Shown(Section::Doctors) => {
                if let Err(e) = self.load_doctors().await {
                    self.report(e);
                }
            }
            Navigation::Shown(Section::Patients) | Navigation::ComingSoon => {
                self.notify("Patient management feature is coming soon!", Severity::Info);
            }
            Navigation::SignInRequired => {}
        }

        navigation
    }

    /// Fetches the dashboard counts concurrently.
    ///
    /// Each count updates on its own; a failed request keeps the previous value.
    /// Does nothing without a session.
    pub async fn load_dashboard(&mut self) -> DashboardCounts {
        let Some(owned) = self.session.token().map(str::to_owned) else {
            return self.dashboard;
        };
        let token = Some(owned.as_str());

        let (patients, doctors, appointments) = futures::join!(
            self.gateway.list_patients(token),
            self.gateway.list_doctors(token),
            self.gateway.list_appointments(token),
        );

        match patients {
            Ok(list) => self.dashboard.patients = Some(list.len()),
            Err(e) => tracing::warn!("❌ Patient count unavailable: {}", e),
        }
        match doctors {
            Ok(list) => self.dashboard.doctors = Some(list.len()),
            Err(e) => tracing::warn!("❌ Doctor count unavailable: {}", e),
        }
        match appointments {
            Ok(list) => self.dashboard.appointments = Some(list.len()),
            Err(e) => tracing::warn!("❌ Appointment count unavailable: {}", e),
        }

        self.dashboard
    }

    /// Refreshes the cached doctor list.
    pub async fn load_doctors(&mut self) -> Result<usize> {
        let token = self.session.token().map(str::to_owned);
        let doctors = self.gateway.list_doctors(token.as_deref()).await?;

        tracing::debug!("🩺 Loaded {} doctors", doctors.len());
        let count = doctors.len();
        self.projector.set_doctors(doctors);
        Ok(count)
    }
}
