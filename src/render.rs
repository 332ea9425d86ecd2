//! Plain-text painter for the terminal adapter.
//!
//! Everything here is presentation only; the data comes from the projector.

use std::fmt::Write;

use crate::notification::{Notification, Severity};
use crate::projector::{AppointmentRow, DoctorCard, DoctorOption, StatusFilter};
use crate::state::DashboardCounts;

pub fn paint_notification(notification: &Notification) -> String {
    let marker = match notification.severity {
        Severity::Success => "✔",
        Severity::Error => "✖",
        Severity::Info => "ℹ",
    };
    format!("{} {}", marker, notification.message)
}

pub fn paint_dashboard(counts: &DashboardCounts) -> String {
    let show = |n: Option<usize>| n.map_or_else(|| "-".to_string(), |n| n.to_string());
    format!(
        "Patients: {}  Doctors: {}  Appointments: {}",
        show(counts.patients),
        show(counts.doctors),
        show(counts.appointments)
    )
}

pub fn paint_filter_tabs(active: StatusFilter) -> String {
    ["all", "scheduled", "confirmed", "completed", "cancelled"]
        .iter()
        .map(|tab| {
            if *tab == active.label() {
                format!("[{}]", tab)
            } else {
                tab.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn paint_appointments(rows: &[AppointmentRow], empty_message: &str) -> String {
    if rows.is_empty() {
        return format!("No appointments found\n{}", empty_message);
    }

    let mut out = String::new();
    for row in rows {
        let _ = write!(out, "#{} {}", row.id, row.doctor_name);
        if let Some(spec) = &row.specialization {
            let _ = write!(out, " - {}", spec);
        }
        let _ = writeln!(out, "  [{}]", row.status);
        let _ = write!(out, "    {} {}  {}", row.date, row.time, row.reason);
        if let Some(fee) = &row.fee {
            let _ = write!(out, "  Fee: {}", fee);
        }
        out.push('\n');
        if let Some(notes) = &row.notes {
            let _ = writeln!(out, "    Notes: {}", notes);
        }

        let mut actions = Vec::new();
        if row.can_cancel {
            actions.push(format!("cancel {}", row.id));
        }
        actions.push(format!("details {}", row.id));
        if let (true, Some(doctor_id)) = (row.has_availability, row.doctor_id) {
            actions.push(format!("availability {}", doctor_id));
        }
        let _ = writeln!(out, "    > {}", actions.join(" | "));
    }
    out
}

pub fn paint_doctor_options(options: &[DoctorOption], selected: Option<i64>) -> String {
    options
        .iter()
        .map(|o| {
            let mark = if selected == Some(o.id) { "*" } else { " " };
            format!("{} {:>4}  {}", mark, o.id, o.label)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn paint_doctors(cards: &[DoctorCard]) -> String {
    let mut out = String::new();
    for card in cards {
        let _ = writeln!(out, "({}) {} - {}", card.initials, card.name, card.specialization);
        let lines = [
            &card.qualifications,
            &card.experience,
            &card.fee,
            &card.department,
            &card.availability,
            &card.bio,
        ];
        for line in lines.into_iter().flatten() {
            let _ = writeln!(out, "    {}", line);
        }
        let _ = writeln!(out, "    > book {}", card.id);
    }
    out
}
