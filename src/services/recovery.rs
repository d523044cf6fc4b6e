use chrono::{NaiveDateTime, Utc};

use crate::services::salon::{AppointmentRecord, SalonApi};

/// How far back the client's appointment history is searched.
const HISTORY_START: &str = "2020-01-01";

/// Locate and cancel the stale past appointment blocking a new booking for
/// this client and service. Returns false when nothing matched or when the
/// lookup or cancel failed; errors never propagate past this point.
pub async fn recover_stale_appointment(
    api: &dyn SalonApi,
    token: &str,
    client_id: &str,
    service_id: &str,
) -> bool {
    match try_recover(api, token, client_id, service_id).await {
        Ok(true) => true,
        Ok(false) => {
            tracing::info!(client_id, service_id, "no stale appointment found to recover");
            false
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                client_id,
                service_id,
                "stale appointment recovery failed"
            );
            false
        }
    }
}

async fn try_recover(
    api: &dyn SalonApi,
    token: &str,
    client_id: &str,
    service_id: &str,
) -> anyhow::Result<bool> {
    let history = api
        .client_appointments(token, client_id, HISTORY_START)
        .await?;
    let now = Utc::now().naive_utc();

    let Some(stale) = history
        .iter()
        .find(|appt| !appt.is_cancelled && appt.service_id == service_id && starts_before(appt, now))
    else {
        return Ok(false);
    };

    tracing::info!(
        appointment_id = %stale.appointment_id,
        start_time = %stale.start_time,
        "cancelling stale past appointment"
    );
    api.cancel_appointment(token, &stale.appointment_service_id, stale.service_version)
        .await?;

    Ok(true)
}

fn starts_before(appt: &AppointmentRecord, cutoff: NaiveDateTime) -> bool {
    parse_start_time(&appt.start_time).is_some_and(|start| start < cutoff)
}

// Unparseable start times are treated as not-in-the-past and skipped.
fn parse_start_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::services::salon::{BookedSlot, BookingCall, TokenGrant};

    struct HistoryApi {
        history: Vec<AppointmentRecord>,
        cancelled: Mutex<Vec<String>>,
        lookup_fails: bool,
        cancel_fails: bool,
    }

    impl HistoryApi {
        fn with_history(history: Vec<AppointmentRecord>) -> Self {
            Self {
                history,
                cancelled: Mutex::new(vec![]),
                lookup_fails: false,
                cancel_fails: false,
            }
        }
    }

    #[async_trait]
    impl SalonApi for HistoryApi {
        async fn fetch_token(&self) -> anyhow::Result<TokenGrant> {
            anyhow::bail!("not used")
        }

        async fn create_booking(
            &self,
            _token: &str,
            _call: &BookingCall,
        ) -> anyhow::Result<BookedSlot> {
            anyhow::bail!("not used")
        }

        async fn client_appointments(
            &self,
            _token: &str,
            _client_id: &str,
            _from_date: &str,
        ) -> anyhow::Result<Vec<AppointmentRecord>> {
            if self.lookup_fails {
                anyhow::bail!("upstream unavailable");
            }
            Ok(self.history.clone())
        }

        async fn cancel_appointment(
            &self,
            _token: &str,
            appointment_service_id: &str,
            _service_version: i64,
        ) -> anyhow::Result<()> {
            if self.cancel_fails {
                anyhow::bail!("version conflict");
            }
            self.cancelled
                .lock()
                .unwrap()
                .push(appointment_service_id.to_string());
            Ok(())
        }
    }

    fn record(id: &str, service_id: &str, start: &str, cancelled: bool) -> AppointmentRecord {
        AppointmentRecord {
            appointment_id: format!("appt-{id}"),
            appointment_service_id: id.to_string(),
            service_id: service_id.to_string(),
            start_time: start.to_string(),
            is_cancelled: cancelled,
            service_version: 1,
        }
    }

    const SERVICE: &str = "f9160450-0b51-4ddc-bcc7-ac150103d5c0";
    const OTHER_SERVICE: &str = "67c644bc-237f-4794-8b48-ac150106d5ae";

    #[tokio::test]
    async fn test_cancels_first_matching_stale_appointment() {
        let api = HistoryApi::with_history(vec![
            record("cancelled", SERVICE, "2021-03-01T10:00:00", true),
            record("other", OTHER_SERVICE, "2021-04-01T10:00:00", false),
            record("match-1", SERVICE, "2021-05-01T10:00:00", false),
            record("match-2", SERVICE, "2021-06-01T10:00:00", false),
        ]);

        assert!(recover_stale_appointment(&api, "token", "client-1", SERVICE).await);
        assert_eq!(*api.cancelled.lock().unwrap(), vec!["match-1".to_string()]);
    }

    #[tokio::test]
    async fn test_no_match_returns_false_without_cancelling() {
        let api = HistoryApi::with_history(vec![
            record("future", SERVICE, "2099-01-01T10:00:00", false),
            record("cancelled", SERVICE, "2021-03-01T10:00:00", true),
            record("other", OTHER_SERVICE, "2021-04-01T10:00:00", false),
        ]);

        assert!(!recover_stale_appointment(&api, "token", "client-1", SERVICE).await);
        assert!(api.cancelled.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_start_time_is_skipped() {
        let api = HistoryApi::with_history(vec![record(
            "garbled",
            SERVICE,
            "next tuesday",
            false,
        )]);

        assert!(!recover_stale_appointment(&api, "token", "client-1", SERVICE).await);
        assert!(api.cancelled.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_failure_is_reported_as_false() {
        let mut api = HistoryApi::with_history(vec![]);
        api.lookup_fails = true;

        assert!(!recover_stale_appointment(&api, "token", "client-1", SERVICE).await);
    }

    #[tokio::test]
    async fn test_cancel_failure_is_reported_as_false() {
        let mut api = HistoryApi::with_history(vec![record(
            "match-1",
            SERVICE,
            "2021-05-01T10:00:00",
            false,
        )]);
        api.cancel_fails = true;

        assert!(!recover_stale_appointment(&api, "token", "client-1", SERVICE).await);
    }
}
