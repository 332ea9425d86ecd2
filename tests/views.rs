use std::time::{Duration, Instant};

use chrono::{NaiveDate, NaiveTime};
use clinic_client::{
    AppError,
    models::user::{Credentials, RegisterRequest},
    notification::{NotificationPresenter, Severity},
    router::{Modal, Navigation, Section, ViewRouter},
    validation::appointment::{BookingForm, validate_booking},
    validation::auth::{validate_credentials, validate_registration},
};

fn form(doctor_id: &str, date: &str, time: &str) -> BookingForm {
    BookingForm {
        doctor_id: doctor_id.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        reason: String::new(),
    }
}

fn validation_message(err: AppError) -> String {
    match err {
        AppError::Validation(message) => message,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_shows_exactly_one_section() {
        let mut router = ViewRouter::new();
        assert!(router.is_landing());
        assert_eq!(router.active_nav(), Section::Dashboard);

        assert_eq!(
            router.navigate(Section::Doctors, true),
            Navigation::Shown(Section::Doctors)
        );
        assert_eq!(router.visible(), Some(Section::Doctors));
        assert_eq!(router.active_nav(), Section::Doctors);

        router.navigate(Section::Dashboard, true);
        assert_eq!(router.visible(), Some(Section::Dashboard));
        assert_eq!(router.active_nav(), Section::Dashboard);
    }

    #[test]
    fn router_gates_sections_without_session() {
        let mut router = ViewRouter::new();

        for section in [Section::Appointments, Section::Doctors, Section::Patients] {
            assert_eq!(router.navigate(section, false), Navigation::SignInRequired);
            assert_eq!(router.modal(), Some(Modal::SignIn));
            assert!(router.is_landing());
        }

        assert_eq!(
            router.navigate(Section::Dashboard, false),
            Navigation::Shown(Section::Dashboard)
        );
    }

    #[test]
    fn patients_entry_keeps_current_section() {
        let mut router = ViewRouter::new();
        router.navigate(Section::Appointments, true);

        assert_eq!(router.navigate(Section::Patients, true), Navigation::ComingSoon);
        assert_eq!(router.visible(), Some(Section::Appointments));
        assert_eq!(router.active_nav(), Section::Appointments);
    }

    #[test]
    fn booking_modal_needs_session() {
        let mut router = ViewRouter::new();
        assert_eq!(router.open_modal(Modal::BookAppointment, false), Modal::SignIn);
        assert_eq!(router.modal(), Some(Modal::SignIn));

        assert_eq!(
            router.open_modal(Modal::BookAppointment, true),
            Modal::BookAppointment
        );

        // Closing a modal that is not open leaves the open one alone.
        router.close_modal(Modal::Register);
        assert_eq!(router.modal(), Some(Modal::BookAppointment));
        router.close_modal(Modal::BookAppointment);
        assert_eq!(router.modal(), None);
    }

    #[test]
    fn reset_returns_to_landing() {
        let mut router = ViewRouter::new();
        router.navigate(Section::Doctors, true);
        router.open_modal(Modal::Register, true);

        router.reset();

        assert_eq!(router, ViewRouter::new());
    }

    #[test]
    fn section_names_parse_from_hash_links() {
        assert_eq!("#appointments".parse::<Section>(), Ok(Section::Appointments));
        assert_eq!("Doctors".parse::<Section>(), Ok(Section::Doctors));
        assert!("#billing".parse::<Section>().is_err());
    }

    #[test]
    fn newer_notification_replaces_older() {
        let mut presenter = NotificationPresenter::new(Duration::from_secs(5));
        let start = Instant::now();

        presenter.notify_at("first", Severity::Info, start);
        presenter.notify_at("second", Severity::Error, start + Duration::from_secs(3));

        let shown = presenter.visible_at(start + Duration::from_secs(6)).unwrap();
        assert_eq!(shown.message, "second");
        assert_eq!(shown.severity, Severity::Error);
    }

    #[test]
    fn notification_expires_after_ttl() {
        let mut presenter = NotificationPresenter::new(Duration::from_secs(5));
        let start = Instant::now();
        presenter.notify_at("saved", Severity::Success, start);

        assert!(presenter.visible_at(start + Duration::from_millis(4_999)).is_some());
        assert!(presenter.visible_at(start + Duration::from_secs(5)).is_none());
        assert!(presenter.last().is_none());
    }

    #[test]
    fn notification_can_be_dismissed() {
        let mut presenter = NotificationPresenter::new(Duration::from_secs(5));
        presenter.notify("hello", Severity::Info);
        presenter.dismiss();
        assert!(presenter.visible().is_none());
    }

    #[test]
    fn booking_form_is_validated_in_order() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

        let cases = [
            (form("", "2025-06-20", "10:00"), "Please select a doctor"),
            (form("3", "20/06/2025", "10:00"), "Please choose a valid date"),
            (form("3", "2025-06-20", "ten"), "Please choose a valid time"),
            (form("3", "2025-06-14", "10:00"), "Appointment date cannot be in the past"),
        ];
        for (form, expected) in cases {
            let err = validate_booking(&form, today).unwrap_err();
            assert_eq!(validation_message(err), expected);
        }
    }

    #[test]
    fn same_day_booking_is_allowed() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let mut same_day = form(" 3 ", "2025-06-15", "08:15:00");
        same_day.reason = "  ".to_string();

        let booking = validate_booking(&same_day, today).unwrap();

        assert_eq!(booking.doctor_id, 3);
        assert_eq!(booking.time, NaiveTime::from_hms_opt(8, 15, 0).unwrap());
        assert_eq!(booking.reason, None);
    }

    #[test]
    fn credentials_need_both_fields() {
        assert!(validate_credentials(&Credentials::new("patient1", "")).is_err());
        assert!(validate_credentials(&Credentials::new("  ", "secret")).is_err());
        assert!(validate_credentials(&Credentials::new("patient1", "secret")).is_ok());
    }

    #[test]
    fn registration_checks_email_and_password_length() {
        let short = RegisterRequest::patient("amy", "amy@clinic.test", "abc", "Amy", "Lee");
        assert_eq!(
            validation_message(validate_registration(&short).unwrap_err()),
            "Password must be at least 6 characters"
        );

        let bad_email = RegisterRequest::patient("amy", "not-an-email", "abcdef", "Amy", "Lee");
        assert_eq!(
            validation_message(validate_registration(&bad_email).unwrap_err()),
            "Please enter a valid email address"
        );

        // Length counts characters, not bytes.
        let unicode = RegisterRequest::patient("amy", "amy@clinic.test", "ééééé", "Amy", "Lee");
        assert!(validate_registration(&unicode).is_err());

        let ok = RegisterRequest::patient("amy", "amy@clinic.test", "abcdef", "Amy", "Lee");
        assert!(validate_registration(&ok).is_ok());
    }

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = Credentials::new("patient1", "password123");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("patient1"));
        assert!(!debug.contains("password123"));
    }
}
