use chrono::Utc;

use crate::errors::BookingError;
use crate::models::{BookedService, BookingRequest};
use crate::services::salon::{BookedSlot, BookingCall, SalonApi};
use crate::services::{catalog, conflict, recovery};
use crate::state::AppState;

/// Aggregate result of a fully processed booking request.
#[derive(Debug)]
pub struct BookingOutcome {
    pub appointment_id: String,
    pub service_id: String,
    pub booked_services: Vec<BookedService>,
    pub message: String,
}

/// Run one booking request end to end: validate, resolve the primary
/// service, book it (with one auto-recovery retry on a stale-past-appointment
/// conflict), then book each add-on back-to-back starting at the previous
/// service's reported end time.
pub async fn book_appointment(
    state: &AppState,
    request: &BookingRequest,
) -> Result<BookingOutcome, BookingError> {
    let fields = (
        required(&request.client_id),
        required(&request.service),
        required(&request.datetime),
    );
    let (Some(client_id), Some(service), Some(datetime)) = fields else {
        return Err(BookingError::MissingFields);
    };

    let service_id = catalog::resolve_service_id(service)
        .ok_or_else(|| BookingError::UnknownService(service.to_string()))?;

    let api = state.salon.as_ref();
    let token = state
        .tokens
        .acquire(api)
        .await
        .map_err(|e| BookingError::Upstream(e.to_string()))?;

    let stylist = request.stylist.as_deref().filter(|s| !s.is_empty());

    // Primary service. A failure here fails the whole request.
    let (slot, auto_recovered) =
        book_with_recovery(api, &token, &service_id, datetime, client_id, stylist)
            .await
            .map_err(BookingError::Upstream)?;

    tracing::info!(
        appointment_id = %slot.appointment_id,
        service_id = %service_id,
        "primary service booked"
    );

    let appointment_id = slot.appointment_id.clone();
    let mut next_start = slot.end_time.clone();
    let mut booked_services = vec![record(service, &service_id, &slot, false, auto_recovered)];

    // Add-ons, in request order, each starting exactly where the previous
    // service ends. A failed add-on is skipped; it never aborts the primary
    // result or later add-ons.
    let mut addons_booked = 0usize;
    for addon in &request.additional_services {
        let Some(addon_id) = catalog::resolve_service_id(addon) else {
            tracing::warn!(service = %addon, "skipping unresolved add-on service");
            continue;
        };

        match book_with_recovery(api, &token, &addon_id, &next_start, client_id, stylist).await {
            Ok((addon_slot, recovered)) => {
                tracing::info!(
                    appointment_id = %addon_slot.appointment_id,
                    service_id = %addon_id,
                    start_time = %addon_slot.start_time,
                    "add-on service booked"
                );
                next_start = addon_slot.end_time.clone();
                booked_services.push(record(addon, &addon_id, &addon_slot, true, recovered));
                addons_booked += 1;
            }
            Err(error) => {
                tracing::warn!(service = %addon, error = %error, "skipping failed add-on service");
            }
        }
    }

    let message = if addons_booked > 0 {
        format!("Appointment booked successfully with {addons_booked} add-on service(s)")
    } else {
        "Appointment booked successfully".to_string()
    };

    Ok(BookingOutcome {
        appointment_id,
        service_id,
        booked_services,
        message,
    })
}

/// Book one service, with a single recovery-and-retry pass when the failure
/// is a stale-past-appointment conflict. Whatever happens on the recovery
/// path, the error surfaced is the one from the original attempt.
async fn book_with_recovery(
    api: &dyn SalonApi,
    token: &str,
    service_id: &str,
    start_time: &str,
    client_id: &str,
    employee_id: Option<&str>,
) -> Result<(BookedSlot, bool), String> {
    let call = BookingCall {
        service_id: service_id.to_string(),
        start_time: start_time.to_string(),
        client_id: client_id.to_string(),
        employee_id: employee_id.map(str::to_string),
    };

    let original_error = match api.create_booking(token, &call).await {
        Ok(slot) => return Ok((slot, false)),
        Err(e) => e.to_string(),
    };

    if let Some(stale) = conflict::classify(&original_error, Utc::now().date_naive()) {
        tracing::info!(
            conflict_date = %stale.date,
            service_id,
            "stale past appointment conflict detected, attempting recovery"
        );
        if recovery::recover_stale_appointment(api, token, client_id, service_id).await {
            if let Ok(slot) = api.create_booking(token, &call).await {
                return Ok((slot, true));
            }
            tracing::warn!(service_id, "retry after recovery failed");
        }
    }

    Err(original_error)
}

fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn record(
    service: &str,
    service_id: &str,
    slot: &BookedSlot,
    is_addon: bool,
    auto_recovered: bool,
) -> BookedService {
    BookedService {
        service: service.to_string(),
        service_id: service_id.to_string(),
        appointment_id: slot.appointment_id.clone(),
        appointment_service_id: slot.appointment_service_id.clone(),
        start_time: slot.start_time.clone(),
        end_time: slot.end_time.clone(),
        is_addon,
        auto_recovered,
    }
}
