use std::sync::OnceLock;

use regex::Regex;
use serde_json::json;
use tracing::{info, warn};

use doctor_cell::services::availability::CANDIDATE_SLOTS;
use notification_cell::BookingNotice;
use service_cell::models::Service;
use shared_database::StoreClient;

use crate::models::{
    Appointment, AppointmentStatus, BookingError, CreateAppointmentRequest,
};

const APPOINTMENT_EMBED: &str = "select=*,service:services(*),doctor:doctors(*)";

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

fn validate(request: &CreateAppointmentRequest) -> Result<(), BookingError> {
    let mut invalid = Vec::new();

    if request.patient_name.trim().is_empty() {
        invalid.push("patient_name");
    }
    if !email_regex().is_match(request.patient_email.trim()) {
        invalid.push("patient_email");
    }
    if request.patient_phone.trim().is_empty() {
        invalid.push("patient_phone");
    }
    if !CANDIDATE_SLOTS.contains(&request.appointment_time.as_str()) {
        invalid.push("appointment_time");
    }

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(BookingError::Validation(invalid.join(", ")))
    }
}

/// Build the mail payload from an appointment with its embeds. Returns None
/// when the store answered without them, in which case no mail goes out.
pub fn notice_for(appointment: &Appointment) -> Option<BookingNotice> {
    let service = appointment.service.as_ref()?;
    let doctor = appointment.doctor.as_ref()?;
    Some(BookingNotice {
        patient_name: appointment.patient_name.clone(),
        patient_email: appointment.patient_email.clone(),
        service_name: service.name.clone(),
        service_price: service.price,
        doctor_name: doctor.display_name(),
        appointment_date: appointment.appointment_date.to_string(),
        appointment_time: appointment.appointment_time.clone(),
    })
}

pub struct BookingService<'a> {
    store: &'a StoreClient,
}

impl<'a> BookingService<'a> {
    pub fn new(store: &'a StoreClient) -> Self {
        Self { store }
    }

    /// Book a slot. The pre-check catches the common double-booking case
    /// early; the unique index on the appointments table catches the race
    /// the pre-check cannot see, surfacing as [`BookingError::SlotTaken`].
    pub async fn create(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, BookingError> {
        validate(&request)?;

        // Unknown service and retired service are different answers: the
        // first is a bad reference, the second a bookable-no-more state.
        let mut services: Vec<Service> = self
            .store
            .select("services", &format!("id=eq.{}", request.service_id))
            .await?;
        let service = services.pop().ok_or(BookingError::ServiceNotFound)?;
        if !service.is_active {
            return Err(BookingError::ServiceInactive);
        }

        let doctors: Vec<serde_json::Value> = self
            .store
            .select("doctors", &format!("id=eq.{}", request.doctor_id))
            .await?;
        if doctors.is_empty() {
            return Err(BookingError::DoctorNotFound);
        }

        let clashes: Vec<serde_json::Value> = self
            .store
            .select(
                "appointments",
                &format!(
                    "doctor_id=eq.{}&appointment_date=eq.{}&appointment_time=eq.{}&status=neq.cancelled&select=id",
                    request.doctor_id, request.appointment_date, request.appointment_time
                ),
            )
            .await?;
        if !clashes.is_empty() {
            warn!(
                "Rejected booking for doctor {} at {} {}: slot taken",
                request.doctor_id, request.appointment_date, request.appointment_time
            );
            return Err(BookingError::SlotTaken);
        }

        let mut body = json!({
            "patient_name": request.patient_name.trim(),
            "patient_email": request.patient_email.trim(),
            "patient_phone": request.patient_phone.trim(),
            "service_id": request.service_id,
            "doctor_id": request.doctor_id,
            "appointment_date": request.appointment_date,
            "appointment_time": request.appointment_time,
            "status": AppointmentStatus::Pending.to_string(),
        });
        // Absent notes stay absent so the column default applies.
        if let Some(notes) = &request.notes {
            body["notes"] = json!(notes);
        }

        let appointment: Appointment = self
            .store
            .insert("appointments", APPOINTMENT_EMBED, body)
            .await?;

        info!(
            "Booked appointment {} for doctor {} at {} {}",
            appointment.id,
            appointment.doctor_id,
            appointment.appointment_date,
            appointment.appointment_time
        );
        Ok(appointment)
    }

    pub async fn get(&self, appointment_id: &str) -> Result<Appointment, BookingError> {
        let mut rows: Vec<Appointment> = self
            .store
            .select(
                "appointments",
                &format!("id=eq.{}&{}", appointment_id, APPOINTMENT_EMBED),
            )
            .await?;
        if rows.is_empty() {
            return Err(BookingError::AppointmentNotFound);
        }
        Ok(rows.remove(0))
    }

    /// Newest first, the way the admin panel lists them.
    pub async fn list(&self) -> Result<Vec<Appointment>, BookingError> {
        let rows = self
            .store
            .select(
                "appointments",
                &format!(
                    "order=appointment_date.desc,appointment_time.asc&{}",
                    APPOINTMENT_EMBED
                ),
            )
            .await?;
        Ok(rows)
    }

    pub async fn list_for_patient(&self, email: &str) -> Result<Vec<Appointment>, BookingError> {
        // Emails may carry `+`; raw in a query string it decodes to a space
        // and the filter matches nothing.
        let rows = self
            .store
            .select(
                "appointments",
                &format!(
                    "patient_email=eq.{}&order=appointment_date.desc&{}",
                    urlencoding::encode(email),
                    APPOINTMENT_EMBED
                ),
            )
            .await?;
        Ok(rows)
    }

    /// Move an appointment to any of the four statuses. The workflow is not
    /// a one-way graph: staff may re-confirm a cancelled appointment.
    pub async fn set_status(
        &self,
        appointment_id: &str,
        status: &str,
    ) -> Result<(Appointment, AppointmentStatus), BookingError> {
        let status = AppointmentStatus::parse(status)
            .ok_or_else(|| BookingError::InvalidStatus(status.to_string()))?;

        let mut rows: Vec<Appointment> = self
            .store
            .update(
                "appointments",
                &format!("id=eq.{}&{}", appointment_id, APPOINTMENT_EMBED),
                json!({ "status": status.to_string() }),
            )
            .await?;
        if rows.is_empty() {
            return Err(BookingError::AppointmentNotFound);
        }

        let appointment = rows.remove(0);
        info!("Appointment {} moved to {}", appointment.id, status);
        Ok((appointment, status))
    }

    pub async fn delete(&self, appointment_id: &str) -> Result<(), BookingError> {
        let removed: Vec<serde_json::Value> = self
            .store
            .delete("appointments", &format!("id=eq.{}", appointment_id))
            .await?;
        if removed.is_empty() {
            return Err(BookingError::AppointmentNotFound);
        }
        info!("Appointment {} deleted", appointment_id);
        Ok(())
    }
}
