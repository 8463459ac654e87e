use serde::Serialize;

/// Everything the mail templates need about a booking, flattened so the
/// dispatcher does not depend on the appointment models.
#[derive(Debug, Clone, Serialize)]
pub struct BookingNotice {
    pub patient_name: String,
    pub patient_email: String,
    pub service_name: String,
    pub service_price: f64,
    pub doctor_name: String,
    pub appointment_date: String,
    pub appointment_time: String,
}
