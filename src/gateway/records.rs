use http::Method;

use crate::error::Result;
use crate::gateway::client::ApiClient;
use crate::models::appointment::{Appointment, AppointmentRequest, AppointmentStatus, StatusUpdate};
use crate::models::doctor::Doctor;
use crate::models::patient::Patient;

impl ApiClient {
    /// GET /doctor
    pub async fn list_doctors(&self, token: Option<&str>) -> Result<Vec<Doctor>> {
        self.get_json("/doctor", token, "Failed to load doctors").await
    }

    /// GET /patient
    pub async fn list_patients(&self, token: Option<&str>) -> Result<Vec<Patient>> {
        self.get_json("/patient", token, "Failed to load patients").await
    }

    /// GET /appointment
    pub async fn list_appointments(&self, token: Option<&str>) -> Result<Vec<Appointment>> {
        self.get_json("/appointment", token, "Failed to load appointments")
            .await
    }

    /// GET /appointment/patient/{id}
    pub async fn appointments_for_patient(
        &self,
        token: Option<&str>,
        patient_id: i64,
    ) -> Result<Vec<Appointment>> {
        self.get_json(
            &format!("/appointment/patient/{}", patient_id),
            token,
            "Failed to load appointments",
        )
        .await
    }

    /// POST /appointment
    pub async fn create_appointment(
        &self,
        token: Option<&str>,
        request: &AppointmentRequest,
    ) -> Result<Appointment> {
        let raw = self
            .send_json(
                Method::POST,
                "/appointment",
                token,
                request,
                "Failed to book appointment",
            )
            .await?;

        Ok(sonic_rs::from_str(&raw)?)
    }

    /// PUT /appointment/{id} with `{"status": ...}`.
    ///
    /// The updated record in the response is not decoded; callers re-fetch the list.
    pub async fn update_appointment_status(
        &self,
        token: Option<&str>,
        appointment_id: i64,
        status: AppointmentStatus,
    ) -> Result<()> {
        self.send_json(
            Method::PUT,
            &format!("/appointment/{}", appointment_id),
            token,
            &StatusUpdate { status },
            "Failed to update appointment",
        )
        .await?;

        Ok(())
    }
}
