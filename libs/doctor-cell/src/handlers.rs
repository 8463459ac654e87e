use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use shared_database::AppContext;
use shared_models::error::AppError;

use crate::models::{Doctor, DoctorError};
use crate::services::availability::AvailabilityService;
use crate::services::roster::RosterService;

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

#[axum::debug_handler]
pub async fn get_doctors(State(ctx): State<Arc<AppContext>>) -> Result<Json<Vec<Doctor>>, AppError> {
    let roster = RosterService::new(&ctx.store);
    let doctors = roster.list().await?;
    Ok(Json(doctors))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(ctx): State<Arc<AppContext>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Doctor>, AppError> {
    let roster = RosterService::new(&ctx.store);
    let doctor = roster.get(&doctor_id).await?;
    Ok(Json(doctor))
}

#[axum::debug_handler]
pub async fn get_availability(
    State(ctx): State<Arc<AppContext>>,
    Path(doctor_id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Value>, AppError> {
    let raw_date = query.date.ok_or(DoctorError::MissingDate)?;
    let date =
        NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d").map_err(|_| DoctorError::InvalidDate)?;

    let availability = AvailabilityService::new(&ctx.store);
    let slots = availability.available_slots(&doctor_id, date).await?;

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "date": date,
        "available_slots": slots
    })))
}
