use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::models::appointment::{Appointment, AppointmentStatus};
use crate::models::doctor::{format_fee, Doctor};

/// Reason shown when an appointment has none.
pub const DEFAULT_REASON: &str = "General Checkup";

/// What to do when an appointment's doctor is not in the cached list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoctorFallback {
    /// Use the snapshot embedded in the appointment.
    #[default]
    Embedded,
    /// Only trust the cached list; report the doctor as missing.
    CacheOnly,
}

impl FromStr for DoctorFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "embedded" => Ok(DoctorFallback::Embedded),
            "cache-only" | "cache_only" => Ok(DoctorFallback::CacheOnly),
            other => Err(format!("expected `embedded` or `cache-only`, got `{other}`")),
        }
    }
}

/// Status filter applied to the appointment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Status(AppointmentStatus),
}

impl StatusFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Status(status) => appointment.status_is(*status),
        }
    }

    /// Lowercase label, as used on the filter tabs.
    pub fn label(&self) -> String {
        match self {
            StatusFilter::All => "all".to_string(),
            StatusFilter::Status(status) => status.as_str().to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Status)
    }
}

/// Where an appointment's doctor details came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DoctorResolution<'a> {
    /// Found in the cached doctor list.
    Resolved(&'a Doctor),
    /// Not cached; the appointment's embedded snapshot is used as-is.
    Fallback(&'a Doctor),
    /// Neither source is available.
    Missing,
}

impl<'a> DoctorResolution<'a> {
    pub fn doctor(&self) -> Option<&'a Doctor> {
        match self {
            DoctorResolution::Resolved(d) | DoctorResolution::Fallback(d) => Some(d),
            DoctorResolution::Missing => None,
        }
    }

    pub fn source(&self) -> DoctorSource {
        match self {
            DoctorResolution::Resolved(_) => DoctorSource::Cache,
            DoctorResolution::Fallback(_) => DoctorSource::Embedded,
            DoctorResolution::Missing => DoctorSource::Missing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoctorSource {
    Cache,
    Embedded,
    Missing,
}

/// One renderable appointment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentRow {
    pub id: i64,
    pub doctor_id: Option<i64>,
    pub doctor_source: DoctorSource,
    pub doctor_name: String,
    pub specialization: Option<String>,
    pub date: String,
    pub time: String,
    pub reason: String,
    pub fee: Option<String>,
    pub notes: Option<String>,
    /// Status text as the backend sent it.
    pub status: String,
    /// Lowercase status, for styling.
    pub status_class: String,
    pub can_cancel: bool,
    pub has_availability: bool,
}

/// An entry of the doctor picker on the booking form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorOption {
    pub id: i64,
    pub label: String,
}

/// A doctor card for the doctors section.
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorCard {
    pub id: i64,
    pub initials: String,
    pub name: String,
    pub specialization: String,
    pub qualifications: Option<String>,
    pub experience: Option<String>,
    pub fee: Option<String>,
    pub department: Option<String>,
    pub availability: Option<String>,
    pub bio: Option<String>,
}

/// Cached appointments and doctors plus the current filter.
#[derive(Debug, Clone, Default)]
pub struct AppointmentProjector {
    appointments: Vec<Appointment>,
    doctors: Vec<Doctor>,
    filter: StatusFilter,
    fallback: DoctorFallback,
}

impl AppointmentProjector {
    pub fn new(fallback: DoctorFallback) -> Self {
        Self {
            fallback,
            ..Self::default()
        }
    }

    pub fn set_appointments(&mut self, appointments: Vec<Appointment>) {
        self.appointments = appointments;
    }

    pub fn set_doctors(&mut self, doctors: Vec<Doctor>) {
        self.doctors = doctors;
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn fallback(&self) -> DoctorFallback {
        self.fallback
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Drops both cached collections and resets the filter.
    pub fn clear(&mut self) {
        self.appointments.clear();
        self.doctors.clear();
        self.filter = StatusFilter::All;
    }

    /// Appointments passing the current filter, in backend order.
    pub fn filtered(&self) -> impl Iterator<Item = &Appointment> {
        let filter = self.filter;
        self.appointments.iter().filter(move |a| filter.matches(a))
    }

    pub fn find_appointment(&self, id: i64) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn find_doctor(&self, id: i64) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    /// Resolves the appointment's doctor. The first source found wins entirely.
    pub fn resolve_doctor<'a>(&'a self, appointment: &'a Appointment) -> DoctorResolution<'a> {
        let Some(embedded) = appointment.doctor.as_ref() else {
            return DoctorResolution::Missing;
        };

        if let Some(cached) = self.find_doctor(embedded.id) {
            return DoctorResolution::Resolved(cached);
        }

        match self.fallback {
            DoctorFallback::Embedded => DoctorResolution::Fallback(embedded),
            DoctorFallback::CacheOnly => DoctorResolution::Missing,
        }
    }

    /// Rows for the filtered list, evaluated against `now`.
    pub fn render(&self, now: NaiveDateTime) -> Vec<AppointmentRow> {
        self.filtered().map(|a| self.row(a, now)).collect()
    }

    fn row(&self, appointment: &Appointment, now: NaiveDateTime) -> AppointmentRow {
        let resolution = self.resolve_doctor(appointment);
        let doctor = resolution.doctor();

        AppointmentRow {
            id: appointment.id,
            doctor_id: doctor.map(|d| d.id).or_else(|| appointment.doctor_id()),
            doctor_source: resolution.source(),
            doctor_name: doctor
                .map(Doctor::display_name)
                .unwrap_or_else(|| "Unknown doctor".to_string()),
            specialization: doctor
                .and_then(|d| d.specialization.clone())
                .filter(|s| !s.is_empty()),
            date: appointment.appointment_date_time.format("%Y-%m-%d").to_string(),
            time: appointment.appointment_date_time.format("%H:%M").to_string(),
            reason: appointment
                .reason
                .clone()
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_REASON.to_string()),
            fee: doctor.and_then(Doctor::fee).map(format_fee),
            notes: appointment.notes.clone().filter(|n| !n.is_empty()),
            status: appointment.status.clone(),
            status_class: appointment.status.to_ascii_lowercase(),
            can_cancel: appointment.can_cancel(now),
            has_availability: doctor.is_some_and(Doctor::has_availability),
        }
    }

    /// Text shown when the filtered list is empty.
    pub fn empty_message(&self) -> String {
        match self.filter {
            StatusFilter::All => "You haven't booked any appointments yet.".to_string(),
            filter => format!("No {} appointments.", filter.label()),
        }
    }

    /// Full details of one appointment, or `None` if it is not cached.
    pub fn details(&self, appointment_id: i64) -> Option<String> {
        let appointment = self.find_appointment(appointment_id)?;
        let doctor = self.resolve_doctor(appointment).doctor();
        let mut out = String::from("DOCTOR DETAILS:\n");

        match doctor {
            Some(d) => {
                out.push_str(&format!("{}\n", d.display_name()));
                out.push_str(&format!("Specialization: {}\n", d.specialization_or_default()));
                if let Some(years) = d.experience() {
                    out.push_str(&format!("Experience: {} years\n", years));
                }
                if let Some(q) = d.qualifications.as_deref().filter(|q| !q.is_empty()) {
                    out.push_str(&format!("Qualifications: {}\n", q));
                }
            }
            None => out.push_str("Unknown doctor\n"),
        }

        let at = appointment.appointment_date_time;
        out.push_str("\nAPPOINTMENT DETAILS:\n");
        out.push_str(&format!("Date: {}\n", at.format("%Y-%m-%d")));
        out.push_str(&format!("Time: {}\n", at.format("%H:%M")));
        out.push_str(&format!("Status: {}\n", appointment.status));
        out.push_str(&format!(
            "Reason: {}\n",
            appointment
                .reason
                .as_deref()
                .filter(|r| !r.is_empty())
                .unwrap_or("Not specified")
        ));

        let extras = [
            ("Notes", &appointment.notes),
            ("Diagnosis", &appointment.diagnosis),
            ("Prescription", &appointment.prescription),
        ];
        for (label, value) in extras {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                out.push_str(&format!("{}: {}\n", label, v));
            }
        }

        Some(out)
    }

    /// Availability text for a cached doctor.
    pub fn availability(&self, doctor_id: i64) -> String {
        match self.find_doctor(doctor_id).filter(|d| d.has_availability()) {
            Some(d) => format!(
                "{} is available on:\n\n{}",
                d.display_name(),
                d.available_days.join(", ")
            ),
            None => "Availability information not available for this doctor.".to_string(),
        }
    }

    /// Picker entries for the booking form.
    pub fn doctor_options(&self) -> Vec<DoctorOption> {
        self.doctors.iter().map(doctor_option).collect()
    }
}

pub fn doctor_option(doctor: &Doctor) -> DoctorOption {
    let mut label = format!(
        "{} - {}",
        doctor.display_name(),
        doctor.specialization_or_default()
    );
    if let Some(years) = doctor.experience() {
        label.push_str(&format!(" ({} yrs exp)", years));
    }
    if let Some(fee) = doctor.fee() {
        label.push_str(&format!(" - {}", format_fee(fee)));
    }

    DoctorOption {
        id: doctor.id,
        label,
    }
}

pub fn doctor_card(doctor: &Doctor) -> DoctorCard {
    DoctorCard {
        id: doctor.id,
        initials: doctor.initials(),
        name: doctor.display_name(),
        specialization: doctor.specialization_or_default().to_string(),
        qualifications: doctor.qualifications.clone().filter(|q| !q.is_empty()),
        experience: doctor
            .experience()
            .map(|y| format!("{} years experience", y)),
        fee: doctor
            .fee()
            .map(|f| format!("Consultation Fee: {}", format_fee(f))),
        department: doctor
            .department
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|d| format!("{} Department", d)),
        availability: doctor
            .has_availability()
            .then(|| format!("Available: {}", doctor.available_days.join(", "))),
        bio: doctor.bio.clone().filter(|b| !b.is_empty()),
    }
}
