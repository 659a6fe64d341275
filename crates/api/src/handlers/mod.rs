pub mod bookings;
pub mod schedule;
