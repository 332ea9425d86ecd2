use serde::{Deserialize, Serialize};

/// Specialization shown when a doctor has none on record.
pub const DEFAULT_SPECIALIZATION: &str = "General Medicine";

/// Represents a doctor as returned by the backend.
///
/// Appointments embed a snapshot of this record, which may carry only the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub years_of_experience: Option<u32>,
    #[serde(default)]
    pub consultation_fee: Option<f64>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub qualifications: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Weekday names, in the order the backend lists them.
    #[serde(default)]
    pub available_days: Vec<String>,
}

impl Doctor {
    /// A bare reference carrying only the id.
    pub fn reference(id: i64) -> Self {
        Self {
            id,
            first_name: String::new(),
            last_name: String::new(),
            specialization: None,
            years_of_experience: None,
            consultation_fee: None,
            department: None,
            qualifications: None,
            bio: None,
            available_days: Vec::new(),
        }
    }

    /// "Dr. First Last".
    pub fn display_name(&self) -> String {
        format!("Dr. {} {}", self.first_name, self.last_name)
    }

    pub fn specialization_or_default(&self) -> &str {
        self.specialization
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SPECIALIZATION)
    }

    /// Two-letter avatar initials; empty names contribute nothing.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect()
    }

    pub fn has_availability(&self) -> bool {
        !self.available_days.is_empty()
    }

    /// Years of experience, treating zero as unknown.
    pub fn experience(&self) -> Option<u32> {
        self.years_of_experience.filter(|y| *y > 0)
    }

    /// Consultation fee, treating zero as unknown.
    pub fn fee(&self) -> Option<f64> {
        self.consultation_fee.filter(|f| *f > 0.0)
    }
}

/// Formats a fee the way the booking form lists it: `₹800`, `₹800.5`.
pub fn format_fee(fee: f64) -> String {
    // f64's Display prints the shortest form, without trailing zeros.
    format!("₹{}", fee)
}
