use crate::{
    error::{AppError, Result},
    models::appointment::{Appointment, AppointmentRequest, AppointmentStatus},
    notification::Severity,
    projector::{doctor_card, AppointmentRow, DoctorCard, DoctorOption, StatusFilter},
    router::Modal,
    state::{local_now, App, PendingAction},
    validation::appointment::{validate_booking, BookingForm},
};

impl App {
    /// Opens the booking form, refreshing the doctor picker.
    ///
    /// `doctor_id` preselects a doctor, as when booking from a doctor card.
    /// Without a session the sign-in form opens instead.
    pub async fn show_book_appointment(&mut self, doctor_id: Option<i64>) -> Modal {
        let opened = self
            .router
            .open_modal(Modal::BookAppointment, self.session.is_active());

        if opened == Modal::BookAppointment {
            if let Err(e) = self.load_doctors().await {
                self.report(e);
            }
            self.booking_doctor = doctor_id;
        }

        opened
    }

    /// Picker entries for the booking form.
    pub fn doctor_options(&self) -> Vec<DoctorOption> {
        self.projector.doctor_options()
    }

    /// Cards for the doctors section.
    pub fn doctor_cards(&self) -> Vec<DoctorCard> {
        self.projector.doctors().iter().map(doctor_card).collect()
    }

    /// Handles the booking form.
    pub async fn handle_book_appointment(&mut self, form: &BookingForm) -> Result<Appointment> {
        let Ok((token, patient_id)) = self.credentials() else {
            self.notify("Please login to book an appointment", Severity::Error);
            return Err(AppError::Unauthorized);
        };

        let booking = match validate_booking(form, local_now().date()) {
            Ok(booking) => booking,
            Err(e) => return Err(self.report(e)),
        };

        let request = AppointmentRequest::new(
            patient_id,
            booking.doctor_id,
            booking.date,
            booking.time,
            booking.reason,
        );

        tracing::info!(
            "📅 Booking doctor {} for patient {} at {}",
            request.doctor.id,
            patient_id,
            request.appointment_date_time
        );

        self.pending.insert(PendingAction::Booking);
        let result = self
            .gateway
            .create_appointment(Some(&token), &request)
            .await;
        self.pending.remove(&PendingAction::Booking);

        match result {
            Ok(appointment) => {
                tracing::info!("✅ Appointment booked: {}", appointment.id);
                self.notify("Appointment booked successfully!", Severity::Success);
                self.router.close_modal(Modal::BookAppointment);
                self.booking_doctor = None;
                self.refresh_after_change().await;
                Ok(appointment)
            }
            Err(e @ AppError::Network(_)) => {
                tracing::error!("❌ Appointment booking error: {}", e);
                self.notify(
                    "Failed to book appointment. Please try again.",
                    Severity::Error,
                );
                Err(e)
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Fetches the signed-in patient's appointments into the projector.
    ///
    /// Returns the number fetched; without a session nothing is fetched.
    pub async fn load_appointments(&mut self) -> Result<usize> {
        let Ok((token, patient_id)) = self.credentials() else {
            return Ok(0);
        };

        let appointments = self
            .gateway
            .appointments_for_patient(Some(&token), patient_id)
            .await?;

        tracing::debug!("📋 Loaded {} appointments", appointments.len());
        let count = appointments.len();
        self.projector.set_appointments(appointments);
        Ok(count)
    }

    /// Cancels an appointment, then re-fetches the list and the dashboard.
    ///
    /// A cached appointment that is no longer cancellable is rejected locally.
    pub async fn cancel_appointment(&mut self, appointment_id: i64) -> Result<()> {
        let Ok((token, _)) = self.credentials() else {
            self.notify("Please login to continue", Severity::Error);
            return Err(AppError::Unauthorized);
        };

        let cancellable = self
            .projector
            .find_appointment(appointment_id)
            .map(|a| a.can_cancel(local_now()));
        if cancellable == Some(false) {
            let e = AppError::Validation("This appointment can no longer be cancelled".to_string());
            return Err(self.report(e));
        }

        tracing::info!("🗑️ Cancelling appointment {}", appointment_id);
        let result = self
            .gateway
            .update_appointment_status(Some(&token), appointment_id, AppointmentStatus::Cancelled)
            .await;

        match result {
            Ok(()) => {
                self.notify("Appointment cancelled successfully", Severity::Success);
                self.refresh_after_change().await;
                Ok(())
            }
            Err(e) => {
                tracing::error!("❌ Error cancelling appointment: {}", e);
                self.notify("Failed to cancel appointment", Severity::Error);
                Err(e)
            }
        }
    }

    /// Changes the status filter. Unknown filter names are reported and ignored.
    pub fn set_filter(&mut self, filter: &str) -> Result<StatusFilter> {
        match filter.parse::<StatusFilter>() {
            Ok(parsed) => {
                self.projector.set_filter(parsed);
                Ok(parsed)
            }
            Err(msg) => Err(self.report(AppError::Validation(msg))),
        }
    }

    /// Rows for the appointments section, evaluated now.
    pub fn appointment_rows(&self) -> Vec<AppointmentRow> {
        self.projector.render(local_now())
    }

    pub fn appointment_details(&self, appointment_id: i64) -> Option<String> {
        self.projector.details(appointment_id)
    }

    pub fn doctor_availability(&self, doctor_id: i64) -> String {
        self.projector.availability(doctor_id)
    }

    async fn refresh_after_change(&mut self) {
        if let Err(e) = self.load_appointments().await {
            tracing::warn!("❌ Appointment refresh failed: {}", e);
        }
        self.load_dashboard().await;
    }
}
