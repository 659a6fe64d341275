//! Persistence seams.
//!
//! Implementations report failures as [`eyre::Report`]; the stores translate
//! them into [`ConnectError::Persistence`](crate::errors::ConnectError::Persistence).

use async_trait::async_trait;
use eyre::Result;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::models::{
    booking::{Booking, BookingStatus, NewBooking},
    time_slot::{NewTimeSlot, TimeSlot},
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SlotRepository: Send + Sync {
    async fn list_by_mentor(&self, mentor_id: Uuid) -> Result<Vec<TimeSlot>>;

    async fn get(&self, id: Uuid) -> Result<Option<TimeSlot>>;

    async fn insert(&self, slot: NewTimeSlot) -> Result<TimeSlot>;

    /// Inserts `slot` unless it overlaps (see [`TimeSlot::overlaps`]) a slot
    /// of the same mentor. The check and the insert are atomic with respect
    /// to other calls for that mentor. Returns `None` when refused.
    async fn insert_without_overlap(&self, slot: NewTimeSlot) -> Result<Option<TimeSlot>>;

    /// Returns `None` when no slot has this id.
    async fn set_availability(&self, id: Uuid, is_available: bool) -> Result<Option<TimeSlot>>;

    /// Returns `false` when no slot has this id.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list_by_student(&self, student_id: Uuid) -> Result<Vec<Booking>>;

    async fn list_by_mentor(&self, mentor_id: Uuid) -> Result<Vec<Booking>>;

    async fn get(&self, id: Uuid) -> Result<Option<Booking>>;

    async fn insert(&self, booking: NewBooking) -> Result<Booking>;

    /// Moves the booking to `to` only while its stored status is still `from`.
    ///
    /// Returns `None` when no booking has this id or its status is no longer `from`.
    async fn update_status(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<Option<Booking>>;
}
