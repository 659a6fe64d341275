use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::errors::ConnectError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = ConnectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConnectError::validation(format!("Unknown day of week: {}", name)))
    }
}

/// A weekly availability window owned by one mentor.
///
/// `start_time` and `end_time` are zero-padded 24-hour "HH:MM" strings, so
/// lexical order equals chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub day_of_week: DayOfWeek,
    pub start_time: String,
    pub end_time: String,
    pub is_available: bool,
    pub is_recurring: bool,
    pub created_at: DateTime<Utc>,
}

impl TimeSlot {
    /// True when this slot shares any time with `[start_time, end_time)` on `day`.
    pub fn overlaps(&self, day: DayOfWeek, start_time: &str, end_time: &str) -> bool {
        self.day_of_week == day
            && self.start_time.as_str() < end_time
            && start_time < self.end_time.as_str()
    }
}

/// A validated slot ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimeSlot {
    pub mentor_id: Uuid,
    pub day_of_week: DayOfWeek,
    pub start_time: String,
    pub end_time: String,
    pub is_available: bool,
    pub is_recurring: bool,
}
