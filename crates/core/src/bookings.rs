//! Booking lifecycle: creation and the `scheduled -> completed | cancelled`
//! transition. Bookings are never deleted.

use chrono::{DateTime, Datelike, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    errors::{ConnectError, ConnectResult},
    models::booking::{Booking, BookingStatus, CreateBookingRequest, NewBooking},
    repositories::BookingRepository,
};

/// Bookings must start within these calendar years.
pub const MIN_SCHEDULED_YEAR: i32 = 1970;
pub const MAX_SCHEDULED_YEAR: i32 = 9999;

pub const SCHEDULED_AT_RANGE_MESSAGE: &str = "scheduledAt must fall between the years 1970 and 9999";

pub struct BookingStore {
    repo: Arc<dyn BookingRepository>,
}

impl BookingStore {
    pub fn new(repo: Arc<dyn BookingRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_booking(&self, request: CreateBookingRequest) -> ConnectResult<Booking> {
        check_scheduled_at(request.scheduled_at)?;
        check_positive("durationSessions", request.duration_sessions)?;
        check_positive("durationMinutes", request.duration_minutes)?;

        let booking = self
            .repo
            .insert(NewBooking {
                mentor_id: request.mentor_id,
                student_id: request.student_id,
                scheduled_at: request.scheduled_at,
                duration_sessions: request.duration_sessions,
                duration_minutes: request.duration_minutes,
            })
            .await?;

        info!(
            "Created booking {} (mentor {}, student {}) at {}",
            booking.id, booking.mentor_id, booking.student_id, booking.scheduled_at
        );
        Ok(booking)
    }

    pub async fn get_booking(&self, id: Uuid) -> ConnectResult<Booking> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| booking_not_found(id))
    }

    pub async fn list_for_student(&self, student_id: Uuid) -> ConnectResult<Vec<Booking>> {
        debug!("Listing bookings for student {}", student_id);
        Ok(self.repo.list_by_student(student_id).await?)
    }

    pub async fn list_for_mentor(&self, mentor_id: Uuid) -> ConnectResult<Vec<Booking>> {
        debug!("Listing bookings for mentor {}", mentor_id);
        Ok(self.repo.list_by_mentor(mentor_id).await?)
    }

    pub async fn transition(&self, id: Uuid, next: BookingStatus) -> ConnectResult<Booking> {
        let current = self.get_booking(id).await?;

        if !current.status.can_transition_to(next) {
            warn!(
                "Refused booking {} transition {} -> {}",
                id, current.status, next
            );
            return Err(transition_refused(current.status, next));
        }

        let updated = match self.repo.update_status(id, current.status, next).await? {
            Some(updated) => updated,
            None => {
                // Another request moved or removed the booking after our read.
                let latest = self.get_booking(id).await?;
                warn!(
                    "Booking {} changed to {} before transition to {} applied",
                    id, latest.status, next
                );
                return Err(transition_refused(latest.status, next));
            }
        };

        info!("Booking {} is now {}", id, updated.status);
        Ok(updated)
    }
}

fn check_scheduled_at(scheduled_at: DateTime<Utc>) -> ConnectResult<()> {
    if !(MIN_SCHEDULED_YEAR..=MAX_SCHEDULED_YEAR).contains(&scheduled_at.year()) {
        return Err(ConnectError::validation(SCHEDULED_AT_RANGE_MESSAGE));
    }
    Ok(())
}

fn check_positive(field: &str, value: Option<i32>) -> ConnectResult<()> {
    match value {
        Some(v) if v <= 0 => Err(ConnectError::validation(format!(
            "{} must be a positive number",
            field
        ))),
        _ => Ok(()),
    }
}

fn transition_refused(from: BookingStatus, to: BookingStatus) -> ConnectError {
    ConnectError::validation(format!(
        "Cannot change booking status from {} to {}",
        from, to
    ))
}

fn booking_not_found(id: Uuid) -> ConnectError {
    ConnectError::not_found(format!("Booking with ID {} not found", id))
}
