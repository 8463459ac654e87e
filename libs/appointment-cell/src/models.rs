use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use doctor_cell::models::Doctor;
use service_cell::models::Service;
use shared_database::StoreError;
use shared_models::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

/// Row in the `appointments` table, with the service and doctor rows embedded
/// when the query asks for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub service_id: Uuid,
    pub doctor_id: Uuid,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<Service>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<Doctor>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub service_id: Uuid,
    pub doctor_id: Uuid,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Missing or invalid fields: {0}")]
    Validation(String),

    #[error("Service not found")]
    ServiceNotFound,

    #[error("Service is not available")]
    ServiceInactive,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Appointment not found")]
    AppointmentNotFound,

    #[error("This time slot is already booked")]
    SlotTaken,

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        // The partial unique index on (doctor_id, appointment_date,
        // appointment_time) answers 409 when two bookings race past the
        // pre-check. That is a slot conflict, not a server fault.
        match err {
            StoreError::Conflict(_) => BookingError::SlotTaken,
            other => BookingError::Store(other),
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation(msg) => {
                AppError::Validation(format!("Missing or invalid fields: {}", msg))
            }
            BookingError::ServiceNotFound => AppError::NotFound("Service not found".to_string()),
            BookingError::ServiceInactive => {
                AppError::BadRequest("Service is not available".to_string())
            }
            BookingError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
            BookingError::AppointmentNotFound => {
                AppError::NotFound("Appointment not found".to_string())
            }
            BookingError::SlotTaken => {
                AppError::SlotConflict("This time slot is already booked".to_string())
            }
            BookingError::InvalidStatus(s) => AppError::Validation(format!("Invalid status: {}", s)),
            BookingError::Store(e) => AppError::Database(e.to_string()),
        }
    }
}
