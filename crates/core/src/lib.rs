//! # CodeConnect Core
//!
//! Domain types and rules for mentor scheduling: the session join window,
//! mentor availability slots and the booking lifecycle. Persistence is
//! reached only through the traits in [`repositories`].

pub mod bookings;
pub mod clock;
pub mod errors;
pub mod join_window;
pub mod models;
pub mod repositories;
pub mod schedule;

pub use bookings::BookingStore;
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{ConnectError, ConnectResult};
pub use join_window::{JoinState, JoinWindow};
pub use schedule::{OverlapPolicy, SlotStore};
