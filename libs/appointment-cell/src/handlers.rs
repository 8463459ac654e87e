use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::warn;

use notification_cell::{
    dispatch_booking_notices, dispatch_cancelled_notice, dispatch_confirmed_notice,
};
use shared_database::AppContext;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{
    Appointment, AppointmentStatus, CreateAppointmentRequest, UpdateStatusRequest,
};
use crate::services::booking::{notice_for, BookingService};

#[axum::debug_handler]
pub async fn create_appointment(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let booking = BookingService::new(&ctx.store);
    let appointment = booking.create(request).await?;

    match notice_for(&appointment) {
        Some(notice) => dispatch_booking_notices(&ctx.config, notice),
        None => warn!(
            "Appointment {} created without embedded details, skipping mail",
            appointment.id
        ),
    }

    Ok((StatusCode::CREATED, Json(appointment)))
}

#[axum::debug_handler]
pub async fn get_appointments(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let booking = BookingService::new(&ctx.store);
    let appointments = booking.list().await?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn get_my_appointments(
    State(ctx): State<Arc<AppContext>>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let email = user
        .email
        .ok_or_else(|| AppError::Auth("Token carries no email".to_string()))?;

    let booking = BookingService::new(&ctx.store);
    let appointments = booking.list_for_patient(&email).await?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(ctx): State<Arc<AppContext>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let booking = BookingService::new(&ctx.store);
    let appointment = booking.get(&appointment_id).await?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(ctx): State<Arc<AppContext>>,
    Path(appointment_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Appointment>, AppError> {
    let booking = BookingService::new(&ctx.store);
    let (appointment, status) = booking.set_status(&appointment_id, &request.status).await?;

    if let Some(notice) = notice_for(&appointment) {
        match status {
            AppointmentStatus::Confirmed => dispatch_confirmed_notice(&ctx.config, notice),
            AppointmentStatus::Cancelled => dispatch_cancelled_notice(&ctx.config, notice),
            _ => {}
        }
    }

    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(ctx): State<Arc<AppContext>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let booking = BookingService::new(&ctx.store);
    booking.delete(&appointment_id).await?;
    Ok(Json(json!({ "message": "Appointment deleted successfully" })))
}
