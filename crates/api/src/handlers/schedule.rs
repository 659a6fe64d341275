//! # Schedule Handlers
//!
//! Endpoints for a mentor's weekly availability slots. Validation and the
//! overlap policy live in [`SlotStore`](codeconnect_core::SlotStore); these
//! handlers only translate between HTTP and the store.

use axum::{extract::State, http::StatusCode, Json};
use codeconnect_core::{
    errors::ConnectError,
    models::{
        schedule::{
            CreateTimeSlotRequest, DeleteTimeSlotResponse, ToggleAvailabilityRequest,
            UpdateAvailabilityRequest, WeeklyScheduleDay,
        },
        time_slot::TimeSlot,
    },
    schedule::MISSING_FIELDS_MESSAGE,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    extract::{AppJson, AppPath, AppQuery},
    middleware::error_handling::AppError,
    ApiState,
};

/// Query parameters selecting whose schedule to read
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleQuery {
    pub mentor_id: Uuid,
}

#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    AppQuery(query): AppQuery<ScheduleQuery>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let slots = state.slots.list_slots(query.mentor_id).await?;
    Ok(Json(slots))
}

/// Slots bucketed Monday through Sunday for the schedule page.
#[axum::debug_handler]
pub async fn weekly_schedule(
    State(state): State<Arc<ApiState>>,
    AppQuery(query): AppQuery<ScheduleQuery>,
) -> Result<Json<Vec<WeeklyScheduleDay>>, AppError> {
    let week = state.slots.weekly_view(query.mentor_id).await?;
    Ok(Json(week))
}

#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<CreateTimeSlotRequest>,
) -> Result<(StatusCode, Json<TimeSlot>), AppError> {
    let mentor_id = payload
        .mentor_id
        .ok_or_else(|| ConnectError::validation(MISSING_FIELDS_MESSAGE))?;

    let slot = state
        .slots
        .create_slot(
            mentor_id,
            &payload.day_of_week,
            &payload.start_time,
            &payload.end_time,
            payload.is_recurring,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(slot)))
}

#[axum::debug_handler]
pub async fn get_slot(
    State(state): State<Arc<ApiState>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<TimeSlot>, AppError> {
    let slot = state.slots.get_slot(id).await?;
    Ok(Json(slot))
}

/// Sets availability to the value in the body.
#[axum::debug_handler]
pub async fn update_availability(
    State(state): State<Arc<ApiState>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateAvailabilityRequest>,
) -> Result<Json<TimeSlot>, AppError> {
    let slot = state.slots.set_availability(id, payload.is_available).await?;
    Ok(Json(slot))
}

/// Flips availability relative to what the client currently shows.
#[axum::debug_handler]
pub async fn toggle_availability(
    State(state): State<Arc<ApiState>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<ToggleAvailabilityRequest>,
) -> Result<Json<TimeSlot>, AppError> {
    let slot = state
        .slots
        .toggle_availability(id, payload.current_is_available)
        .await?;
    Ok(Json(slot))
}

#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<DeleteTimeSlotResponse>, AppError> {
    state.slots.delete_slot(id).await?;
    Ok(Json(DeleteTimeSlotResponse { id, deleted: true }))
}
