use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_database::StoreError;
use shared_models::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub years_of_experience: Option<i32>,
    pub rating: Option<f32>,
}

impl Doctor {
    pub fn display_name(&self) -> String {
        format!("Dr. {} {}", self.first_name, self.last_name)
    }
}

#[derive(Error, Debug)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("Date is required")]
    MissingDate,

    #[error("Invalid date format")]
    InvalidDate,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
            DoctorError::MissingDate => AppError::Validation("Date is required".to_string()),
            DoctorError::InvalidDate => {
                AppError::Validation("Invalid date format, expected YYYY-MM-DD".to_string())
            }
            DoctorError::Store(e) => AppError::Database(e.to_string()),
        }
    }
}
