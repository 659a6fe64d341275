use async_trait::async_trait;
use codeconnect_core::{
    models::{
        booking::{Booking, BookingStatus, NewBooking},
        time_slot::{NewTimeSlot, TimeSlot},
    },
    repositories::{BookingRepository, SlotRepository},
};
use mockall::mock;
use uuid::Uuid;

// Mock repositories for testing
mock! {
    pub SlotRepo {}

    #[async_trait]
    impl SlotRepository for SlotRepo {
        async fn list_by_mentor(&self, mentor_id: Uuid) -> eyre::Result<Vec<TimeSlot>>;

        async fn get(&self, id: Uuid) -> eyre::Result<Option<TimeSlot>>;

        async fn insert(&self, slot: NewTimeSlot) -> eyre::Result<TimeSlot>;

        async fn insert_without_overlap(&self, slot: NewTimeSlot) -> eyre::Result<Option<TimeSlot>>;

        async fn set_availability(
            &self,
            id: Uuid,
            is_available: bool,
        ) -> eyre::Result<Option<TimeSlot>>;

        async fn delete(&self, id: Uuid) -> eyre::Result<bool>;
    }
}

mock! {
    pub BookingRepo {}

    #[async_trait]
    impl BookingRepository for BookingRepo {
        async fn list_by_student(&self, student_id: Uuid) -> eyre::Result<Vec<Booking>>;

        async fn list_by_mentor(&self, mentor_id: Uuid) -> eyre::Result<Vec<Booking>>;

        async fn get(&self, id: Uuid) -> eyre::Result<Option<Booking>>;

        async fn insert(&self, booking: NewBooking) -> eyre::Result<Booking>;

        async fn update_status(
            &self,
            id: Uuid,
            from: BookingStatus,
            to: BookingStatus,
        ) -> eyre::Result<Option<Booking>>;
    }
}
