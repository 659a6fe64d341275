use axum::http::StatusCode;
use codeconnect_core::{
    models::{
        schedule::{DeleteTimeSlotResponse, WeeklyScheduleDay},
        time_slot::{DayOfWeek, TimeSlot},
    },
    schedule::{INVERTED_RANGE_MESSAGE, MISSING_FIELDS_MESSAGE, OVERLAP_MESSAGE},
};
use mockall::predicate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{slot, TestContext};

#[tokio::test]
async fn test_list_slots_returns_mentor_slots() {
    let mentor_id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_list_by_mentor()
        .with(predicate::eq(mentor_id))
        .times(1)
        .returning(|mentor_id| {
            Ok(vec![
                slot(mentor_id, DayOfWeek::Monday, "09:00", "10:00"),
                slot(mentor_id, DayOfWeek::Friday, "14:00", "15:30"),
            ])
        });
    let server = ctx.server();

    let response = server
        .get("/api/schedule")
        .add_query_param("mentorId", mentor_id)
        .await;

    response.assert_status(StatusCode::OK);
    let slots: Vec<TimeSlot> = response.json();
    assert_eq!(slots.len(), 2);
    assert!(slots.iter().all(|s| s.mentor_id == mentor_id));
}

#[tokio::test]
async fn test_list_slots_requires_mentor_id() {
    let server = TestContext::new().server();

    let response = server.get("/api/schedule").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("mentorId"), "unexpected message: {}", message);
}

#[tokio::test]
async fn test_malformed_slot_id_is_a_json_validation_error() {
    let mut ctx = TestContext::new();
    ctx.slot_repo.expect_delete().never();
    let server = ctx.server();

    let response = server.delete("/api/schedule/not-a-uuid").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_malformed_availability_body_is_a_json_validation_error() {
    let mut ctx = TestContext::new();
    ctx.slot_repo.expect_set_availability().never();
    let server = ctx.server();

    let response = server
        .patch(&format!("/api/schedule/{}", Uuid::new_v4()))
        .json(&json!({ "isAvailable": "sometimes" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_weekly_schedule_groups_monday_through_sunday() {
    let mentor_id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.slot_repo.expect_list_by_mentor().returning(|mentor_id| {
        Ok(vec![
            slot(mentor_id, DayOfWeek::Wednesday, "15:00", "16:00"),
            slot(mentor_id, DayOfWeek::Wednesday, "09:00", "10:00"),
            slot(mentor_id, DayOfWeek::Sunday, "18:00", "19:00"),
        ])
    });
    let server = ctx.server();

    let response = server
        .get("/api/schedule/weekly")
        .add_query_param("mentorId", mentor_id)
        .await;

    response.assert_status(StatusCode::OK);
    let week: Vec<WeeklyScheduleDay> = response.json();
    let days: Vec<DayOfWeek> = week.iter().map(|d| d.day_of_week).collect();
    assert_eq!(days, DayOfWeek::ALL.to_vec());

    let wednesday: Vec<&str> = week[2].slots.iter().map(|s| s.start_time.as_str()).collect();
    assert_eq!(wednesday, vec!["09:00", "15:00"]);
    assert_eq!(week[6].slots.len(), 1);
    assert!(week[0].slots.is_empty());
}

#[tokio::test]
async fn test_create_slot_stores_available_slot() {
    let mentor_id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_insert()
        .withf(move |new| {
            new.mentor_id == mentor_id
                && new.day_of_week == DayOfWeek::Monday
                && new.start_time == "09:00"
                && new.end_time == "10:00"
                && new.is_available
                && new.is_recurring
        })
        .times(1)
        .returning(|new| {
            Ok(TimeSlot {
                id: Uuid::new_v4(),
                mentor_id: new.mentor_id,
                day_of_week: new.day_of_week,
                start_time: new.start_time,
                end_time: new.end_time,
                is_available: new.is_available,
                is_recurring: new.is_recurring,
                created_at: chrono::Utc::now(),
            })
        });
    let server = ctx.server();

    let response = server
        .post("/api/schedule")
        .json(&json!({
            "mentorId": mentor_id,
            "dayOfWeek": "Monday",
            "startTime": "09:00",
            "endTime": "10:00",
            "isRecurring": true
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let created: TimeSlot = response.json();
    assert_eq!(created.day_of_week, DayOfWeek::Monday);
    assert!(created.is_available);
}

#[tokio::test]
async fn test_create_slot_rejects_inverted_range() {
    let mut ctx = TestContext::new();
    ctx.slot_repo.expect_insert().never();
    let server = ctx.server();

    let response = server
        .post("/api/schedule")
        .json(&json!({
            "mentorId": Uuid::new_v4(),
            "dayOfWeek": "Monday",
            "startTime": "10:00",
            "endTime": "09:00"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], INVERTED_RANGE_MESSAGE);
}

#[tokio::test]
async fn test_create_slot_rejects_missing_fields() {
    let mut ctx = TestContext::new();
    ctx.slot_repo.expect_insert().never();
    let server = ctx.server();

    let missing_day = server
        .post("/api/schedule")
        .json(&json!({
            "mentorId": Uuid::new_v4(),
            "startTime": "09:00",
            "endTime": "10:00"
        }))
        .await;
    missing_day.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(missing_day.json::<Value>()["error"], MISSING_FIELDS_MESSAGE);

    let missing_mentor = server
        .post("/api/schedule")
        .json(&json!({
            "dayOfWeek": "Monday",
            "startTime": "09:00",
            "endTime": "10:00"
        }))
        .await;
    missing_mentor.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(missing_mentor.json::<Value>()["error"], MISSING_FIELDS_MESSAGE);
}

#[tokio::test]
async fn test_overlapping_slot_is_accepted_by_default() {
    let mut ctx = TestContext::new();
    ctx.slot_repo.expect_insert_without_overlap().never();
    ctx.slot_repo.expect_insert().times(1).returning(|new| {
        Ok(TimeSlot {
            id: Uuid::new_v4(),
            mentor_id: new.mentor_id,
            day_of_week: new.day_of_week,
            start_time: new.start_time,
            end_time: new.end_time,
            is_available: new.is_available,
            is_recurring: new.is_recurring,
            created_at: chrono::Utc::now(),
        })
    });
    let server = ctx.server();

    let response = server
        .post("/api/schedule")
        .json(&json!({
            "mentorId": Uuid::new_v4(),
            "dayOfWeek": "Monday",
            "startTime": "09:30",
            "endTime": "10:30"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_overlapping_slot_is_refused_when_configured() {
    let mentor_id = Uuid::new_v4();
    let mut ctx = TestContext::new().rejecting_overlaps();
    ctx.slot_repo
        .expect_insert_without_overlap()
        .withf(move |new| {
            new.mentor_id == mentor_id
                && new.day_of_week == DayOfWeek::Monday
                && new.start_time == "09:30"
                && new.end_time == "10:30"
        })
        .times(1)
        .returning(|_| Ok(None));
    ctx.slot_repo.expect_insert().never();
    let server = ctx.server();

    let response = server
        .post("/api/schedule")
        .json(&json!({
            "mentorId": mentor_id,
            "dayOfWeek": "monday",
            "startTime": "09:30",
            "endTime": "10:30"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], OVERLAP_MESSAGE);
}

#[tokio::test]
async fn test_patch_sets_availability_from_body() {
    let mentor_id = Uuid::new_v4();
    let existing = slot(mentor_id, DayOfWeek::Tuesday, "09:00", "10:00");
    let slot_id = existing.id;
    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_set_availability()
        .with(predicate::eq(slot_id), predicate::eq(false))
        .times(1)
        .returning(move |_, is_available| {
            Ok(Some(TimeSlot {
                is_available,
                ..existing.clone()
            }))
        });
    let server = ctx.server();

    let response = server
        .patch(&format!("/api/schedule/{}", slot_id))
        .json(&json!({ "isAvailable": false }))
        .await;

    response.assert_status(StatusCode::OK);
    assert!(!response.json::<TimeSlot>().is_available);
}

#[tokio::test]
async fn test_toggle_stores_the_opposite_of_current_value() {
    let mentor_id = Uuid::new_v4();
    let existing = slot(mentor_id, DayOfWeek::Tuesday, "09:00", "10:00");
    let slot_id = existing.id;
    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_set_availability()
        .with(predicate::eq(slot_id), predicate::eq(true))
        .times(1)
        .returning(move |_, is_available| {
            Ok(Some(TimeSlot {
                is_available,
                ..existing.clone()
            }))
        });
    let server = ctx.server();

    let response = server
        .post(&format!("/api/schedule/{}/toggle", slot_id))
        .json(&json!({ "currentIsAvailable": false }))
        .await;

    response.assert_status(StatusCode::OK);
    assert!(response.json::<TimeSlot>().is_available);
}

#[tokio::test]
async fn test_availability_change_on_unknown_slot_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_set_availability()
        .returning(|_, _| Ok(None));
    let server = ctx.server();

    let response = server
        .patch(&format!("/api/schedule/{}", Uuid::new_v4()))
        .json(&json!({ "isAvailable": true }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_slot_confirms_removal() {
    let slot_id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_delete()
        .with(predicate::eq(slot_id))
        .times(1)
        .returning(|_| Ok(true));
    let server = ctx.server();

    let response = server.delete(&format!("/api/schedule/{}", slot_id)).await;

    response.assert_status(StatusCode::OK);
    let body: DeleteTimeSlotResponse = response.json();
    assert_eq!(body.id, slot_id);
    assert!(body.deleted);
}

#[tokio::test]
async fn test_delete_unknown_slot_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.slot_repo.expect_delete().returning(|_| Ok(false));
    let server = ctx.server();

    let response = server.delete(&format!("/api/schedule/{}", Uuid::new_v4())).await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_storage_failure_returns_generic_message() {
    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_list_by_mentor()
        .returning(|_| Err(eyre::eyre!("connection reset by peer")));
    let server = ctx.server();

    let response = server
        .get("/api/schedule")
        .add_query_param("mentorId", Uuid::new_v4())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["error"],
        "Something went wrong. Please try again."
    );
}

#[tokio::test]
async fn test_get_slot_by_id() {
    let existing = slot(Uuid::new_v4(), DayOfWeek::Thursday, "17:00", "18:00");
    let slot_id = existing.id;
    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_get()
        .with(predicate::eq(slot_id))
        .returning(move |_| Ok(Some(existing.clone())));
    let server = ctx.server();

    let response = server.get(&format!("/api/schedule/{}", slot_id)).await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<TimeSlot>().id, slot_id);
}
