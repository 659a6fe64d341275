use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/schedule",
            get(handlers::schedule::list_slots).post(handlers::schedule::create_slot),
        )
        .route(
            "/api/schedule/weekly",
            get(handlers::schedule::weekly_schedule),
        )
        .route(
            "/api/schedule/:id",
            get(handlers::schedule::get_slot)
                .patch(handlers::schedule::update_availability)
                .delete(handlers::schedule::delete_slot),
        )
        .route(
            "/api/schedule/:id/toggle",
            post(handlers::schedule::toggle_availability),
        )
}
