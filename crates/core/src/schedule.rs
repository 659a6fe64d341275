//! # Schedule Slot Store
//!
//! Creation, availability toggling and deletion of a mentor's weekly slots.
//!
//! Input is validated here before anything reaches the repository. Overlapping
//! slots for the same mentor and day are accepted unless the store is built
//! with [`OverlapPolicy::Reject`].

use chrono::NaiveTime;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    errors::{ConnectError, ConnectResult},
    models::{
        schedule::WeeklyScheduleDay,
        time_slot::{DayOfWeek, NewTimeSlot, TimeSlot},
    },
    repositories::SlotRepository,
};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields";
pub const INVERTED_RANGE_MESSAGE: &str = "End time must be after start time";
pub const TIME_FORMAT_MESSAGE: &str = "Times must use the 24-hour HH:MM format";
pub const OVERLAP_MESSAGE: &str = "Time slot overlaps an existing slot";

/// What to do when a new slot overlaps an existing one of the same mentor and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    #[default]
    Allow,
    Reject,
}

/// Validated components of a slot request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotFields {
    pub day_of_week: DayOfWeek,
    pub start_time: String,
    pub end_time: String,
}

/// Checks a slot request in the order the user sees the messages: missing
/// fields, weekday, time format, then range.
pub fn validate_slot(day_of_week: &str, start_time: &str, end_time: &str) -> ConnectResult<SlotFields> {
    let (day_of_week, start_time, end_time) = (day_of_week.trim(), start_time.trim(), end_time.trim());

    if day_of_week.is_empty() || start_time.is_empty() || end_time.is_empty() {
        return Err(ConnectError::validation(MISSING_FIELDS_MESSAGE));
    }

    let day_of_week = day_of_week.parse::<DayOfWeek>()?;

    if !is_clock_time(start_time) || !is_clock_time(end_time) {
        return Err(ConnectError::validation(TIME_FORMAT_MESSAGE));
    }

    // Zero-padded HH:MM compares lexically in chronological order.
    if start_time >= end_time {
        return Err(ConnectError::validation(INVERTED_RANGE_MESSAGE));
    }

    Ok(SlotFields {
        day_of_week,
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
    })
}

fn is_clock_time(value: &str) -> bool {
    value.len() == 5 && NaiveTime::parse_from_str(value, "%H:%M").is_ok()
}

/// Buckets slots Monday through Sunday, each bucket ordered by start time.
pub fn group_by_day(slots: Vec<TimeSlot>) -> Vec<WeeklyScheduleDay> {
    let mut days: Vec<WeeklyScheduleDay> = DayOfWeek::ALL
        .into_iter()
        .map(|day_of_week| WeeklyScheduleDay {
            day_of_week,
            slots: Vec::new(),
        })
        .collect();

    for slot in slots {
        // ALL is declared in enum order, so the discriminant is the index.
        days[slot.day_of_week as usize].slots.push(slot);
    }

    for day in &mut days {
        day.slots
            .sort_by(|a, b| (&a.start_time, &a.end_time).cmp(&(&b.start_time, &b.end_time)));
    }

    days
}

pub struct SlotStore {
    repo: Arc<dyn SlotRepository>,
    overlap_policy: OverlapPolicy,
}

impl SlotStore {
    pub fn new(repo: Arc<dyn SlotRepository>) -> Self {
        Self {
            repo,
            overlap_policy: OverlapPolicy::default(),
        }
    }

    pub fn with_overlap_policy(mut self, overlap_policy: OverlapPolicy) -> Self {
        self.overlap_policy = overlap_policy;
        self
    }

    pub fn overlap_policy(&self) -> OverlapPolicy {
        self.overlap_policy
    }

    /// All slots of a mentor, in whatever order the repository yields them.
    pub async fn list_slots(&self, mentor_id: Uuid) -> ConnectResult<Vec<TimeSlot>> {
        debug!("Listing slots for mentor {}", mentor_id);
        Ok(self.repo.list_by_mentor(mentor_id).await?)
    }

    pub async fn get_slot(&self, slot_id: Uuid) -> ConnectResult<TimeSlot> {
        self.repo
            .get(slot_id)
            .await?
            .ok_or_else(|| slot_not_found(slot_id))
    }

    pub async fn weekly_view(&self, mentor_id: Uuid) -> ConnectResult<Vec<WeeklyScheduleDay>> {
        let slots = self.list_slots(mentor_id).await?;
        Ok(group_by_day(slots))
    }

    pub async fn create_slot(
        &self,
        mentor_id: Uuid,
        day_of_week: &str,
        start_time: &str,
        end_time: &str,
        is_recurring: bool,
    ) -> ConnectResult<TimeSlot> {
        let fields = validate_slot(day_of_week, start_time, end_time).inspect_err(|e| {
            warn!("Rejected slot for mentor {}: {}", mentor_id, e);
        })?;

        let new_slot = NewTimeSlot {
            mentor_id,
            day_of_week: fields.day_of_week,
            start_time: fields.start_time,
            end_time: fields.end_time,
            is_available: true,
            is_recurring,
        };

        let slot = match self.overlap_policy {
            OverlapPolicy::Allow => self.repo.insert(new_slot).await?,
            OverlapPolicy::Reject => match self.repo.insert_without_overlap(new_slot).await? {
                Some(slot) => slot,
                None => {
                    warn!(
                        "Rejected slot for mentor {}: overlaps an existing {} slot",
                        mentor_id, fields.day_of_week
                    );
                    return Err(ConnectError::validation(OVERLAP_MESSAGE));
                }
            },
        };

        info!(
            "Created slot {} for mentor {}: {} {}-{}",
            slot.id, mentor_id, slot.day_of_week, slot.start_time, slot.end_time
        );
        Ok(slot)
    }

    /// Stores the opposite of `current_is_available`.
    pub async fn toggle_availability(
        &self,
        slot_id: Uuid,
        current_is_available: bool,
    ) -> ConnectResult<TimeSlot> {
        self.set_availability(slot_id, !current_is_available).await
    }

    pub async fn set_availability(&self, slot_id: Uuid, is_available: bool) -> ConnectResult<TimeSlot> {
        let slot = self
            .repo
            .set_availability(slot_id, is_available)
            .await?
            .ok_or_else(|| slot_not_found(slot_id))?;

        info!("Slot {} availability set to {}", slot_id, is_available);
        Ok(slot)
    }

    /// Irreversible; callers confirm with the user beforehand.
    pub async fn delete_slot(&self, slot_id: Uuid) -> ConnectResult<()> {
        if !self.repo.delete(slot_id).await? {
            return Err(slot_not_found(slot_id));
        }

        info!("Deleted slot {}", slot_id);
        Ok(())
    }
}

fn slot_not_found(slot_id: Uuid) -> ConnectError {
    ConnectError::not_found(format!("Time slot with ID {} not found", slot_id))
}
