use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Weekly availability slots. Overlaps between slots of one mentor are
    // deliberately not constrained here; the API decides.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS mentor_time_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            mentor_id UUID NOT NULL,
            day_of_week VARCHAR(16) NOT NULL,
            start_time VARCHAR(5) NOT NULL,
            end_time VARCHAR(5) NOT NULL,
            is_available BOOLEAN NOT NULL DEFAULT TRUE,
            is_recurring BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_day_of_week CHECK (day_of_week IN (
                'Monday', 'Tuesday', 'Wednesday', 'Thursday', 'Friday', 'Saturday', 'Sunday'
            )),
            CONSTRAINT valid_slot_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Sessions are never deleted; the two duration columns carry different meanings.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            mentor_id UUID NOT NULL,
            student_id UUID NOT NULL,
            scheduled_at TIMESTAMP WITH TIME ZONE NOT NULL,
            duration_sessions INTEGER NULL,
            duration_minutes INTEGER NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'scheduled',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('scheduled', 'completed', 'cancelled')),
            CONSTRAINT positive_duration_sessions CHECK (duration_sessions IS NULL OR duration_sessions > 0),
            CONSTRAINT positive_duration_minutes CHECK (duration_minutes IS NULL OR duration_minutes > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_mentor_time_slots_mentor_id ON mentor_time_slots(mentor_id)",
        "CREATE INDEX IF NOT EXISTS idx_mentor_time_slots_day ON mentor_time_slots(mentor_id, day_of_week)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_student_id ON bookings(student_id)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_mentor_id ON bookings(mentor_id)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_scheduled_at ON bookings(scheduled_at)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
