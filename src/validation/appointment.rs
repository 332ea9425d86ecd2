use chrono::{NaiveDate, NaiveTime};

use crate::error::{AppError, Result};

/// A booking form as the user filled it in.
#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    pub reason: String,
}

/// A booking form that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBooking {
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub reason: Option<String>,
}

/// Validates a booking form.
///
/// The date may not lie before `today`; same-day bookings are allowed.
pub fn validate_booking(form: &BookingForm, today: NaiveDate) -> Result<ValidBooking> {
    let doctor_id: i64 = form
        .doctor_id
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("Please select a doctor".to_string()))?;

    let date = NaiveDate::parse_from_str(form.date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Please choose a valid date".to_string()))?;

    let time = NaiveTime::parse_from_str(form.time.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(form.time.trim(), "%H:%M:%S"))
        .map_err(|_| AppError::Validation("Please choose a valid time".to_string()))?;

    if date < today {
        return Err(AppError::Validation(
            "Appointment date cannot be in the past".to_string(),
        ));
    }

    let reason = Some(form.reason.trim().to_string()).filter(|r| !r.is_empty());

    Ok(ValidBooking {
        doctor_id,
        date,
        time,
        reason,
    })
}
