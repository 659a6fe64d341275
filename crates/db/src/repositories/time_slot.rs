use crate::{models::DbTimeSlot, DbPool};
use async_trait::async_trait;
use chrono::Utc;
use codeconnect_core::{
    models::time_slot::{NewTimeSlot, TimeSlot},
    repositories::SlotRepository,
};
use eyre::Result;
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

pub async fn create_time_slot<'e, E>(executor: E, slot: &NewTimeSlot) -> Result<DbTimeSlot>
where
    E: PgExecutor<'e>,
{
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating time slot: id={}, mentor_id={}, day={}, {}-{}",
        id, slot.mentor_id, slot.day_of_week, slot.start_time, slot.end_time
    );

    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        INSERT INTO mentor_time_slots
            (id, mentor_id, day_of_week, start_time, end_time, is_available, is_recurring, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, mentor_id, day_of_week, start_time, end_time, is_available, is_recurring, created_at
        "#,
    )
    .bind(id)
    .bind(slot.mentor_id)
    .bind(slot.day_of_week.as_str())
    .bind(&slot.start_time)
    .bind(&slot.end_time)
    .bind(slot.is_available)
    .bind(slot.is_recurring)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(time_slot)
}

pub async fn get_time_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTimeSlot>> {
    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, mentor_id, day_of_week, start_time, end_time, is_available, is_recurring, created_at
        FROM mentor_time_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(time_slot)
}

pub async fn get_time_slots_by_mentor_id(
    pool: &Pool<Postgres>,
    mentor_id: Uuid,
) -> Result<Vec<DbTimeSlot>> {
    let time_slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, mentor_id, day_of_week, start_time, end_time, is_available, is_recurring, created_at
        FROM mentor_time_slots
        WHERE mentor_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(mentor_id)
    .fetch_all(pool)
    .await?;

    tracing::debug!("Found {} time slots for mentor {}", time_slots.len(), mentor_id);
    Ok(time_slots)
}

/// Inserts `slot` unless it overlaps a slot of the same mentor and day.
///
/// A transaction-scoped advisory lock keyed on the mentor serializes
/// concurrent calls for that mentor, so two overlapping slots cannot both be
/// admitted.
pub async fn create_time_slot_without_overlap(
    pool: &Pool<Postgres>,
    slot: &NewTimeSlot,
) -> Result<Option<DbTimeSlot>> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1)::bigint)")
        .bind(slot.mentor_id.to_string())
        .execute(&mut *tx)
        .await?;

    let same_day = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, mentor_id, day_of_week, start_time, end_time, is_available, is_recurring, created_at
        FROM mentor_time_slots
        WHERE mentor_id = $1 AND day_of_week = $2
        "#,
    )
    .bind(slot.mentor_id)
    .bind(slot.day_of_week.as_str())
    .fetch_all(&mut *tx)
    .await?;

    for row in same_day {
        let existing = TimeSlot::try_from(row)?;
        if existing.overlaps(slot.day_of_week, &slot.start_time, &slot.end_time) {
            tracing::debug!(
                "Slot {} of mentor {} overlaps requested {} {}-{}",
                existing.id, slot.mentor_id, slot.day_of_week, slot.start_time, slot.end_time
            );
            return Ok(None);
        }
    }

    let created = create_time_slot(&mut *tx, slot).await?;
    tx.commit().await?;

    Ok(Some(created))
}

pub async fn set_time_slot_availability(
    pool: &Pool<Postgres>,
    id: Uuid,
    is_available: bool,
) -> Result<Option<DbTimeSlot>> {
    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        UPDATE mentor_time_slots
        SET is_available = $2
        WHERE id = $1
        RETURNING id, mentor_id, day_of_week, start_time, end_time, is_available, is_recurring, created_at
        "#,
    )
    .bind(id)
    .bind(is_available)
    .fetch_optional(pool)
    .await?;

    Ok(time_slot)
}

pub async fn delete_time_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM mentor_time_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// [`SlotRepository`] backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgSlotRepository {
    pool: DbPool,
}

impl PgSlotRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotRepository for PgSlotRepository {
    async fn list_by_mentor(&self, mentor_id: Uuid) -> Result<Vec<TimeSlot>> {
        get_time_slots_by_mentor_id(&self.pool, mentor_id)
            .await?
            .into_iter()
            .map(TimeSlot::try_from)
            .collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<TimeSlot>> {
        get_time_slot_by_id(&self.pool, id)
            .await?
            .map(TimeSlot::try_from)
            .transpose()
    }

    async fn insert(&self, slot: NewTimeSlot) -> Result<TimeSlot> {
        create_time_slot(&self.pool, &slot).await?.try_into()
    }

    async fn insert_without_overlap(&self, slot: NewTimeSlot) -> Result<Option<TimeSlot>> {
        create_time_slot_without_overlap(&self.pool, &slot)
            .await?
            .map(TimeSlot::try_from)
            .transpose()
    }

    async fn set_availability(&self, id: Uuid, is_available: bool) -> Result<Option<TimeSlot>> {
        set_time_slot_availability(&self.pool, id, is_available)
            .await?
            .map(TimeSlot::try_from)
            .transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        delete_time_slot(&self.pool, id).await
    }
}
