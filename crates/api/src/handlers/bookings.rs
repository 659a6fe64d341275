//! # Booking Handlers
//!
//! Every booking returned by the API carries its join status, evaluated once
//! per request against the server clock.

use axum::{extract::State, http::StatusCode, Json};
use codeconnect_core::{
    errors::ConnectError,
    models::booking::{
        BookingResponse, BookingStatus, CreateBookingRequest, UpdateBookingStatusRequest,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    extract::{AppJson, AppPath, AppQuery},
    middleware::error_handling::AppError,
    ApiState,
};

/// Exactly one of the two ids selects the bookings to list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuery {
    pub student_id: Option<Uuid>,
    pub mentor_id: Option<Uuid>,
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    AppQuery(query): AppQuery<BookingQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let bookings = match (query.student_id, query.mentor_id) {
        (Some(student_id), None) => state.bookings.list_for_student(student_id).await?,
        (None, Some(mentor_id)) => state.bookings.list_for_mentor(mentor_id).await?,
        _ => {
            return Err(AppError(ConnectError::validation(
                "Exactly one of studentId or mentorId must be provided",
            )));
        }
    };

    let now = state.clock.now();
    let response = bookings
        .into_iter()
        .map(|booking| BookingResponse::new(booking, now))
        .collect();

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let booking = state.bookings.create_booking(payload).await?;
    let response = BookingResponse::new(booking, state.clock.now());

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.bookings.get_booking(id).await?;
    Ok(Json(BookingResponse::new(booking, state.clock.now())))
}

#[axum::debug_handler]
pub async fn update_booking_status(
    State(state): State<Arc<ApiState>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateBookingStatusRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let status = payload.status.parse::<BookingStatus>()?;
    let booking = state.bookings.transition(id, status).await?;

    Ok(Json(BookingResponse::new(booking, state.clock.now())))
}
