use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::{Map, Value};

use crate::services::catalog;
use crate::state::AppState;

/// Reference listing of bookable services for client-side discovery.
pub async fn list_services(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(serde_json::json!({
        "environment": state.config.environment,
        "location": state.config.location_name,
        "services": {
            "primary": to_map(catalog::PRIMARY_SERVICES),
            "addons": to_map(catalog::ADDON_SERVICES),
        },
    }))
}

fn to_map(entries: &[(&str, &str)]) -> Value {
    let map: Map<String, Value> = entries
        .iter()
        .map(|(name, id)| ((*name).to_string(), Value::String((*id).to_string())))
        .collect();
    Value::Object(map)
}
