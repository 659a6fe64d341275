use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time_slot::{DayOfWeek, TimeSlot};

/// Body of `POST /api/schedule`.
///
/// Text fields default to empty so that a missing field is reported as a
/// validation failure rather than a decoding failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeSlotRequest {
    pub mentor_id: Option<Uuid>,
    #[serde(default)]
    pub day_of_week: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub is_recurring: bool,
}

/// Body of `PATCH /api/schedule/{id}`: the new availability value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvailabilityRequest {
    pub is_available: bool,
}

/// Body of `POST /api/schedule/{id}/toggle`: the value the client currently displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleAvailabilityRequest {
    pub current_is_available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTimeSlotResponse {
    pub id: Uuid,
    pub deleted: bool,
}

/// One day of a mentor's week, as displayed on the schedule page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyScheduleDay {
    pub day_of_week: DayOfWeek,
    pub slots: Vec<TimeSlot>,
}
