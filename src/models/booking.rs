use serde::{Deserialize, Serialize};

/// Inbound body of `POST /book`. Required fields deserialize as options so
/// a missing field produces the standard failure envelope instead of a
/// framework-level rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub client_id: Option<String>,
    pub service: Option<String>,
    pub stylist: Option<String>,
    pub datetime: Option<String>,
    #[serde(default)]
    pub additional_services: Vec<String>,
}

/// One successfully booked service, primary or add-on. Appended to the
/// response in booking order and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct BookedService {
    pub service: String,
    pub service_id: String,
    pub appointment_id: String,
    pub appointment_service_id: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "is_false")]
    pub is_addon: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub auto_recovered: bool,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub success: bool,
    pub appointment_id: String,
    pub service_id: String,
    pub total_services_booked: usize,
    pub booked_services: Vec<BookedService>,
    pub message: String,
}

fn is_false(v: &bool) -> bool {
    !*v
}
