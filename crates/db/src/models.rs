use chrono::{DateTime, Utc};
use codeconnect_core::models::{
    booking::{Booking, BookingStatus},
    time_slot::{DayOfWeek, TimeSlot},
};
use eyre::{eyre, Report};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub is_available: bool,
    pub is_recurring: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub student_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_sessions: Option<i32>,
    pub duration_minutes: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbTimeSlot> for TimeSlot {
    type Error = Report;

    fn try_from(row: DbTimeSlot) -> Result<Self, Self::Error> {
        let day_of_week = row
            .day_of_week
            .parse::<DayOfWeek>()
            .map_err(|e| eyre!("Time slot {} has invalid day_of_week: {}", row.id, e))?;

        Ok(TimeSlot {
            id: row.id,
            mentor_id: row.mentor_id,
            day_of_week,
            start_time: row.start_time,
            end_time: row.end_time,
            is_available: row.is_available,
            is_recurring: row.is_recurring,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<DbBooking> for Booking {
    type Error = Report;

    fn try_from(row: DbBooking) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<BookingStatus>()
            .map_err(|e| eyre!("Booking {} has invalid status: {}", row.id, e))?;

        Ok(Booking {
            id: row.id,
            mentor_id: row.mentor_id,
            student_id: row.student_id,
            scheduled_at: row.scheduled_at,
            duration_sessions: row.duration_sessions,
            duration_minutes: row.duration_minutes,
            status,
            created_at: row.created_at,
        })
    }
}
