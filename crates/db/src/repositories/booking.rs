use crate::{models::DbBooking, DbPool};
use async_trait::async_trait;
use chrono::Utc;
use codeconnect_core::{
    models::booking::{Booking, BookingStatus, NewBooking},
    repositories::BookingRepository,
};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_booking(pool: &Pool<Postgres>, booking: &NewBooking) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, mentor_id={}, student_id={}, scheduled_at={}",
        id, booking.mentor_id, booking.student_id, booking.scheduled_at
    );

    let db_booking = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings
            (id, mentor_id, student_id, scheduled_at, duration_sessions, duration_minutes, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, mentor_id, student_id, scheduled_at, duration_sessions, duration_minutes, status, created_at
        "#,
    )
    .bind(id)
    .bind(booking.mentor_id)
    .bind(booking.student_id)
    .bind(booking.scheduled_at)
    .bind(booking.duration_sessions)
    .bind(booking.duration_minutes)
    .bind(BookingStatus::Scheduled.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(db_booking)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let db_booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, mentor_id, student_id, scheduled_at, duration_sessions, duration_minutes, status, created_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(db_booking)
}

pub async fn get_bookings_by_student_id(
    pool: &Pool<Postgres>,
    student_id: Uuid,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, mentor_id, student_id, scheduled_at, duration_sessions, duration_minutes, status, created_at
        FROM bookings
        WHERE student_id = $1
        ORDER BY scheduled_at ASC
        "#,
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn get_bookings_by_mentor_id(
    pool: &Pool<Postgres>,
    mentor_id: Uuid,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, mentor_id, student_id, scheduled_at, duration_sessions, duration_minutes, status, created_at
        FROM bookings
        WHERE mentor_id = $1
        ORDER BY scheduled_at ASC
        "#,
    )
    .bind(mentor_id)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Compare-and-set on `status`; concurrent transitions cannot both apply.
pub async fn update_booking_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    from: BookingStatus,
    to: BookingStatus,
) -> Result<Option<DbBooking>> {
    let db_booking = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings
        SET status = $2
        WHERE id = $1 AND status = $3
        RETURNING id, mentor_id, student_id, scheduled_at, duration_sessions, duration_minutes, status, created_at
        "#,
    )
    .bind(id)
    .bind(to.as_str())
    .bind(from.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(db_booking)
}

/// [`BookingRepository`] backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgBookingRepository {
    pool: DbPool,
}

impl PgBookingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_bookings(rows: Vec<DbBooking>) -> Result<Vec<Booking>> {
    rows.into_iter().map(Booking::try_from).collect()
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn list_by_student(&self, student_id: Uuid) -> Result<Vec<Booking>> {
        into_bookings(get_bookings_by_student_id(&self.pool, student_id).await?)
    }

    async fn list_by_mentor(&self, mentor_id: Uuid) -> Result<Vec<Booking>> {
        into_bookings(get_bookings_by_mentor_id(&self.pool, mentor_id).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>> {
        get_booking_by_id(&self.pool, id)
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn insert(&self, booking: NewBooking) -> Result<Booking> {
        create_booking(&self.pool, &booking).await?.try_into()
    }

    async fn update_status(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<Option<Booking>> {
        update_booking_status(&self.pool, id, from, to)
            .await?
            .map(Booking::try_from)
            .transpose()
    }
}
