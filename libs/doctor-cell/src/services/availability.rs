use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use shared_database::StoreClient;

use crate::models::DoctorError;
use crate::services::roster::RosterService;

/// Bookable half-hour starts for every working day, in clinic-local time.
/// The last slot starts at 17:00 so the appointment ends by 17:30.
pub const CANDIDATE_SLOTS: [&str; 17] = [
    "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30", "13:00", "13:30",
    "14:00", "14:30", "15:00", "15:30", "16:00", "16:30", "17:00",
];

#[derive(Debug, Deserialize)]
struct BookedSlot {
    appointment_time: String,
}

/// Remove booked labels from the candidate list, preserving candidate order.
/// Labels not in the candidate grid are ignored.
pub fn subtract_booked(booked: &[String]) -> Vec<String> {
    CANDIDATE_SLOTS
        .iter()
        .filter(|slot| !booked.iter().any(|b| b == *slot))
        .map(|slot| slot.to_string())
        .collect()
}

pub struct AvailabilityService<'a> {
    store: &'a StoreClient,
}

impl<'a> AvailabilityService<'a> {
    pub fn new(store: &'a StoreClient) -> Self {
        Self { store }
    }

    /// Free slots for one doctor on one date. Cancelled appointments do not
    /// block their slot.
    pub async fn available_slots(
        &self,
        doctor_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<String>, DoctorError> {
        RosterService::new(self.store).get(doctor_id).await?;

        let booked: Vec<BookedSlot> = self
            .store
            .select(
                "appointments",
                &format!(
                    "doctor_id=eq.{}&appointment_date=eq.{}&status=neq.cancelled&select=appointment_time",
                    doctor_id, date
                ),
            )
            .await?;

        let booked_times: Vec<String> = booked.into_iter().map(|b| b.appointment_time).collect();
        let available = subtract_booked(&booked_times);
        debug!(
            "Doctor {} on {}: {} booked, {} available",
            doctor_id,
            date,
            booked_times.len(),
            available.len()
        );
        Ok(available)
    }
}
