use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::errors::BookingError;
use crate::models::{BookingRequest, BookingResponse};
use crate::services::booking;
use crate::state::AppState;

pub async fn book(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<BookingResponse>, BookingError> {
    tracing::info!(
        client_id = request.client_id.as_deref().unwrap_or("<missing>"),
        service = request.service.as_deref().unwrap_or("<missing>"),
        datetime = request.datetime.as_deref().unwrap_or("<missing>"),
        additional_services = request.additional_services.len(),
        "booking request received"
    );

    let outcome = match booking::book_appointment(&state, &request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(error = %e, "booking request failed");
            return Err(e);
        }
    };

    Ok(Json(BookingResponse {
        success: true,
        appointment_id: outcome.appointment_id,
        service_id: outcome.service_id,
        total_services_booked: outcome.booked_services.len(),
        booked_services: outcome.booked_services,
        message: outcome.message,
    }))
}
