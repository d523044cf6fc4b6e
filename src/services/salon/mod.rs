pub mod meevo;

use async_trait::async_trait;
use serde::Deserialize;

/// One OAuth2 grant from the identity endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub expires_in: i64,
}

/// Parameters for one create-booking call.
#[derive(Debug, Clone)]
pub struct BookingCall {
    pub service_id: String,
    pub start_time: String,
    pub client_id: String,
    pub employee_id: Option<String>,
}

/// Normalized result of a successful create-booking call. `end_time` is the
/// upstream-computed service end, used as the next back-to-back start.
#[derive(Debug, Clone)]
pub struct BookedSlot {
    pub appointment_id: String,
    pub appointment_service_id: String,
    pub start_time: String,
    pub end_time: String,
}

/// One entry from a client's appointment history. `service_version` is the
/// concurrency-check token the cancel endpoint requires.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    pub appointment_id: String,
    pub appointment_service_id: String,
    pub service_id: String,
    pub start_time: String,
    #[serde(default)]
    pub is_cancelled: bool,
    #[serde(default)]
    pub service_version: i64,
}

#[async_trait]
pub trait SalonApi: Send + Sync {
    async fn fetch_token(&self) -> anyhow::Result<TokenGrant>;

    async fn create_booking(&self, token: &str, call: &BookingCall)
        -> anyhow::Result<BookedSlot>;

    async fn client_appointments(
        &self,
        token: &str,
        client_id: &str,
        from_date: &str,
    ) -> anyhow::Result<Vec<AppointmentRecord>>;

    async fn cancel_appointment(
        &self,
        token: &str,
        appointment_service_id: &str,
        service_version: i64,
    ) -> anyhow::Result<()>;
}
