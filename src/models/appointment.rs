use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::doctor::Doctor;

/// The statuses this client sends and filters by.
///
/// Appointments read from the backend keep the raw status text instead, since
/// the backend stores it as a free-form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Every status a filter can select, in tab order.
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "SCHEDULED",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown appointment status: {s}"))
    }
}

/// A reference to another record by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
}

/// Represents an appointment as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    #[serde(default)]
    pub patient: Option<EntityRef>,
    /// The doctor snapshot embedded by the backend; may hold only the id.
    #[serde(default)]
    pub doctor: Option<Doctor>,
    #[serde(with = "date_time_format")]
    pub appointment_date_time: NaiveDateTime,
    #[serde(default, with = "optional_date_time_format")]
    pub end_date_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub reason: Option<String>,
    /// Status text exactly as the backend sent it.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub prescription: Option<String>,
}

impl Appointment {
    pub fn doctor_id(&self) -> Option<i64> {
        self.doctor.as_ref().map(|d| d.id)
    }

    /// Whether the status names `status`, ignoring case.
    pub fn status_is(&self, status: AppointmentStatus) -> bool {
        self.status.eq_ignore_ascii_case(status.as_str())
    }

    /// Cancellation is only allowed for `SCHEDULED` appointments that have not started yet.
    /// The status must match exactly.
    pub fn can_cancel(&self, now: NaiveDateTime) -> bool {
        self.status == AppointmentStatus::Scheduled.as_str() && self.appointment_date_time > now
    }
}

/// The request payload for booking an appointment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub patient: EntityRef,
    pub doctor: EntityRef,
    #[serde(with = "date_time_format")]
    pub appointment_date_time: NaiveDateTime,
    pub reason: Option<String>,
    pub status: AppointmentStatus,
}

impl AppointmentRequest {
    pub fn new(
        patient_id: i64,
        doctor_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        reason: Option<String>,
    ) -> Self {
        Self {
            patient: EntityRef { id: patient_id },
            doctor: EntityRef { id: doctor_id },
            appointment_date_time: date.and_time(time),
            reason: reason.filter(|r| !r.trim().is_empty()),
            status: AppointmentStatus::Scheduled,
        }
    }
}

/// The request payload for a status transition.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusUpdate {
    pub status: AppointmentStatus,
}

/// Parses a backend date-time, with or without seconds.
pub fn parse_date_time(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
}

/// Serde adapter for naive `YYYY-MM-DDTHH:MM:SS` date-times.
pub mod date_time_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_date_time(&raw).map_err(serde::de::Error::custom)
    }
}

mod optional_date_time_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => super::date_time_format::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| super::parse_date_time(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}
