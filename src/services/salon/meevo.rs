use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;

use super::{AppointmentRecord, BookedSlot, BookingCall, SalonApi, TokenGrant};
use crate::config::AppConfig;

/// Client gender code the booking endpoint requires on every call.
const CLIENT_GENDER: &str = "2035";

const REQUEST_TIMEOUT_SECS: u64 = 30;

pub struct MeevoClient {
    auth_url: String,
    api_url: String,
    client_id: String,
    client_secret: String,
    tenant_id: String,
    location_id: String,
    client: reqwest::Client,
}

impl MeevoClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            auth_url: config.auth_url.clone(),
            api_url: config.api_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            tenant_id: config.tenant_id.clone(),
            location_id: config.location_id.clone(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}?TenantId={}&LocationId={}",
            self.api_url, path, self.tenant_id, self.location_id
        )
    }
}

#[async_trait]
impl SalonApi for MeevoClient {
    async fn fetch_token(&self) -> anyhow::Result<TokenGrant> {
        let resp = self
            .client
            .post(&self.auth_url)
            .json(&serde_json::json!({
                "client_id": self.client_id,
                "client_secret": self.client_secret,
            }))
            .send()
            .await
            .context("failed to call Meevo token endpoint")?;

        let status = resp.status();
        let data: Value = resp
            .json()
            .await
            .context("failed to parse Meevo token response")?;

        if !status.is_success() {
            anyhow::bail!("Meevo token endpoint error ({status}): {data}");
        }

        serde_json::from_value(data).context("malformed Meevo token response")
    }

    async fn create_booking(
        &self,
        token: &str,
        call: &BookingCall,
    ) -> anyhow::Result<BookedSlot> {
        let mut form: Vec<(&str, &str)> = vec![
            ("ServiceId", call.service_id.as_str()),
            ("StartTime", call.start_time.as_str()),
            ("ClientId", call.client_id.as_str()),
            ("ClientGender", CLIENT_GENDER),
        ];
        if let Some(employee_id) = call.employee_id.as_deref() {
            form.push(("EmployeeId", employee_id));
        }

        let resp = self
            .client
            .post(self.endpoint("book/service"))
            .bearer_auth(token)
            .form(&form)
            .send()
            .await
            .context("failed to call Meevo booking endpoint")?;

        let status = resp.status();
        let data: Value = resp
            .json()
            .await
            .context("failed to parse Meevo booking response")?;

        if !status.is_success() {
            anyhow::bail!("{}", upstream_error_message(&data, status));
        }

        // The payload sits under a `data` wrapper or at the top level,
        // depending on the endpoint version.
        let body = data.get("data").unwrap_or(&data);

        let appointment_id = field(body, "appointmentId")
            .ok_or_else(|| anyhow::anyhow!("missing appointmentId in Meevo booking response"))?;
        let appointment_service_id = field(body, "appointmentServiceId").unwrap_or_default();
        let start_time = field(body, "startTime").unwrap_or_else(|| call.start_time.clone());
        let end_time = field(body, "serviceEndTime")
            .or_else(|| field(body, "endTime"))
            .unwrap_or_else(|| start_time.clone());

        Ok(BookedSlot {
            appointment_id,
            appointment_service_id,
            start_time,
            end_time,
        })
    }

    async fn client_appointments(
        &self,
        token: &str,
        client_id: &str,
        from_date: &str,
    ) -> anyhow::Result<Vec<AppointmentRecord>> {
        let url = format!(
            "{}&ClientId={client_id}&StartDate={from_date}",
            self.endpoint("appointments")
        );

        let resp = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .context("failed to call Meevo appointments endpoint")?;

        let status = resp.status();
        let data: Value = resp
            .json()
            .await
            .context("failed to parse Meevo appointments response")?;

        if !status.is_success() {
            anyhow::bail!("Meevo appointments endpoint error ({status}): {data}");
        }

        let body = data.get("data").unwrap_or(&data).clone();
        serde_json::from_value(body).context("malformed Meevo appointments response")
    }

    async fn cancel_appointment(
        &self,
        token: &str,
        appointment_service_id: &str,
        service_version: i64,
    ) -> anyhow::Result<()> {
        let version = service_version.to_string();
        let form = [
            ("AppointmentServiceId", appointment_service_id),
            ("ServiceVersion", version.as_str()),
        ];

        let resp = self
            .client
            .post(self.endpoint("book/cancel"))
            .bearer_auth(token)
            .form(&form)
            .send()
            .await
            .context("failed to call Meevo cancel endpoint")?;

        let status = resp.status();
        if !status.is_success() {
            let data: Value = resp.json().await.unwrap_or(Value::Null);
            anyhow::bail!("Meevo cancel endpoint error ({status}): {data}");
        }

        Ok(())
    }
}

fn field(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Pull the upstream's human-readable error message out of a failure body,
/// falling back to the raw status and payload.
fn upstream_error_message(data: &Value, status: reqwest::StatusCode) -> String {
    data.pointer("/error/message")
        .or_else(|| data.pointer("/data/error/message"))
        .or_else(|| data.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Meevo booking endpoint error ({status}): {data}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_message_nested() {
        let data = serde_json::json!({
            "error": { "message": "Client is already booked on 1/2/2020" }
        });
        assert_eq!(
            upstream_error_message(&data, reqwest::StatusCode::CONFLICT),
            "Client is already booked on 1/2/2020"
        );
    }

    #[test]
    fn test_upstream_error_message_flat() {
        let data = serde_json::json!({ "message": "Invalid ServiceId" });
        assert_eq!(
            upstream_error_message(&data, reqwest::StatusCode::BAD_REQUEST),
            "Invalid ServiceId"
        );
    }

    #[test]
    fn test_upstream_error_message_fallback() {
        let data = serde_json::json!({ "unexpected": true });
        let message = upstream_error_message(&data, reqwest::StatusCode::BAD_GATEWAY);
        assert!(message.contains("502"));
    }
}
