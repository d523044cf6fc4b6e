use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "environment": state.config.environment,
        "location": state.config.location_name,
        "location_id": state.config.location_id,
        "service": "Book Appointment",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
