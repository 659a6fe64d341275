//! # Join Window
//!
//! Decides whether the "join" action for a booked session is open.
//!
//! The window opens [`OPENS_BEFORE_START_MINUTES`] before the scheduled start and
//! closes [`CLOSES_AFTER_END_MINUTES`] after the computed end. Both boundaries
//! are inclusive. Evaluation is a pure function of its inputs; the current
//! time is always supplied by the caller, which lets clients re-evaluate on a
//! timer and tests pin the clock.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Session length used when the stored minute count is missing or unusable.
pub const DEFAULT_SESSION_MINUTES: u32 = 60;

/// How early before the scheduled start joining is allowed.
pub const OPENS_BEFORE_START_MINUTES: i64 = 10;

/// How long after the session end joining is still allowed.
pub const CLOSES_AFTER_END_MINUTES: i64 = 5;

/// Result of evaluating a join window at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum JoinState {
    /// The window has not opened yet.
    TooEarly {
        /// Whole minutes until the window opens, truncated.
        #[serde(rename = "minutesUntilOpen")]
        minutes_until_open: i64,
    },
    Joinable,
    Expired,
}

impl JoinState {
    /// Human-readable label shown next to the join button.
    pub fn message(&self) -> String {
        match self {
            JoinState::TooEarly { minutes_until_open } => {
                format!("Available in {} minutes", minutes_until_open)
            }
            JoinState::Joinable => "Join Now".to_string(),
            JoinState::Expired => "Session ended".to_string(),
        }
    }

    pub fn is_joinable(&self) -> bool {
        matches!(self, JoinState::Joinable)
    }
}

/// The boundary instants derived from a session's start and duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinWindow {
    pub scheduled_at: DateTime<Utc>,
    pub session_end: DateTime<Utc>,
    pub opens_at: DateTime<Utc>,
    pub closes_at: DateTime<Utc>,
}

impl JoinWindow {
    /// Boundaries saturate at the ends of the representable range.
    pub fn new(scheduled_at: DateTime<Utc>, duration_minutes: u32) -> Self {
        let session_end = saturating_add(scheduled_at, i64::from(duration_minutes));

        Self {
            scheduled_at,
            session_end,
            opens_at: saturating_add(scheduled_at, -OPENS_BEFORE_START_MINUTES),
            closes_at: saturating_add(session_end, CLOSES_AFTER_END_MINUTES),
        }
    }

    /// Classifies `now` against the window.
    pub fn state_at(&self, now: DateTime<Utc>) -> JoinState {
        if now < self.opens_at {
            JoinState::TooEarly {
                minutes_until_open: (self.opens_at - now).num_minutes(),
            }
        } else if now <= self.closes_at {
            JoinState::Joinable
        } else {
            JoinState::Expired
        }
    }
}

fn saturating_add(instant: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    instant
        .checked_add_signed(Duration::minutes(minutes))
        .unwrap_or(if minutes < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

/// Evaluates the join state for a session starting at `scheduled_at`.
///
/// Callers holding an untrusted duration should pass it through
/// [`effective_duration_minutes`] first.
pub fn evaluate(scheduled_at: DateTime<Utc>, duration_minutes: u32, now: DateTime<Utc>) -> JoinState {
    JoinWindow::new(scheduled_at, duration_minutes).state_at(now)
}

/// Substitutes [`DEFAULT_SESSION_MINUTES`] for a missing or non-positive stored duration.
pub fn effective_duration_minutes(stored: Option<i32>) -> u32 {
    match stored {
        Some(minutes) if minutes > 0 => minutes as u32,
        _ => DEFAULT_SESSION_MINUTES,
    }
}
