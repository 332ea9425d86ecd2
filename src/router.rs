use std::fmt;
use std::str::FromStr;

/// Top-level sections of the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Dashboard,
    Appointments,
    Doctors,
    /// Navigation entry only; there is no patients section yet.
    Patients,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Appointments => "appointments",
            Section::Doctors => "doctors",
            Section::Patients => "patients",
        }
    }

    /// Whether entering the section needs a signed-in user.
    pub fn requires_session(&self) -> bool {
        !matches!(self, Section::Dashboard)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('#').to_ascii_lowercase().as_str() {
            "dashboard" => Ok(Section::Dashboard),
            "appointments" => Ok(Section::Appointments),
            "doctors" => Ok(Section::Doctors),
            "patients" => Ok(Section::Patients),
            other => Err(format!("unknown section: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    SignIn,
    Register,
    BookAppointment,
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The section is now visible and its data should be loaded.
    Shown(Section),
    /// The entry exists but has nothing to show yet.
    ComingSoon,
    /// No session; the sign-in modal was opened instead.
    SignInRequired,
}

/// Visibility of sections, navigation highlight and modals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRouter {
    visible: Option<Section>,
    active_nav: Section,
    modal: Option<Modal>,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRouter {
    /// Starts on the landing page: no section visible, dashboard highlighted.
    pub fn new() -> Self {
        Self {
            visible: None,
            active_nav: Section::Dashboard,
            modal: None,
        }
    }

    /// The visible section, or `None` while the landing page shows.
    pub fn visible(&self) -> Option<Section> {
        self.visible
    }

    pub fn active_nav(&self) -> Section {
        self.active_nav
    }

    pub fn modal(&self) -> Option<Modal> {
        self.modal
    }

    pub fn is_landing(&self) -> bool {
        self.visible.is_none()
    }

    /// Shows `section` and hides every other one.
    ///
    /// Gated sections redirect to sign-in when `signed_in` is false.
    pub fn navigate(&mut self, section: Section, signed_in: bool) -> Navigation {
        if section.requires_session() && !signed_in {
            tracing::debug!("🔒 {} requires sign-in", section);
            self.modal = Some(Modal::SignIn);
            return Navigation::SignInRequired;
        }

        if section == Section::Patients {
            return Navigation::ComingSoon;
        }

        self.visible = Some(section);
        self.active_nav = section;
        tracing::debug!("🧭 Showing {}", section);
        Navigation::Shown(section)
    }

    /// Opens `modal`; booking without a session opens sign-in instead.
    pub fn open_modal(&mut self, modal: Modal, signed_in: bool) -> Modal {
        let opened = match modal {
            Modal::BookAppointment if !signed_in => Modal::SignIn,
            other => other,
        };
        self.modal = Some(opened);
        opened
    }

    pub fn close_modal(&mut self, modal: Modal) {
        if self.modal == Some(modal) {
            self.modal = None;
        }
    }

    /// Back to the landing page, as after sign-out.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
