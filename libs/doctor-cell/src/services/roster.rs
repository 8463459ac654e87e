use shared_database::StoreClient;

use crate::models::{Doctor, DoctorError};

pub struct RosterService<'a> {
    store: &'a StoreClient,
}

impl<'a> RosterService<'a> {
    pub fn new(store: &'a StoreClient) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Doctor>, DoctorError> {
        let doctors = self
            .store
            .select::<Doctor>("doctors", "order=last_name.asc")
            .await?;
        Ok(doctors)
    }

    pub async fn get(&self, doctor_id: &str) -> Result<Doctor, DoctorError> {
        let mut rows = self
            .store
            .select::<Doctor>("doctors", &format!("id=eq.{}", doctor_id))
            .await?;
        if rows.is_empty() {
            return Err(DoctorError::NotFound);
        }
        Ok(rows.remove(0))
    }
}
