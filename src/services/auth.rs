use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::services::salon::SalonApi;

/// Refresh this long before the upstream-reported expiry.
const REFRESH_MARGIN_SECS: i64 = 300;

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Process-wide bearer-token cache for the upstream API. The mutex guards
/// only the cached value, never the refresh call itself: two requests racing
/// past expiry may both refresh, and whichever write lands last stays cached.
/// Either token is valid, so the race is harmless.
#[derive(Default)]
pub struct TokenCache {
    cached: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a valid bearer token, refreshing transparently. Identity
    /// endpoint failures propagate to the caller.
    pub async fn acquire(&self, api: &dyn SalonApi) -> anyhow::Result<String> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }

        tracing::info!("fetching fresh access token");
        let grant = api.fetch_token().await?;
        let expires_at = Utc::now() + Duration::seconds(grant.expires_in);

        *self.cached.lock().unwrap() = Some(CachedToken {
            token: grant.access_token.clone(),
            expires_at,
        });

        Ok(grant.access_token)
    }

    fn cached_token(&self) -> Option<String> {
        let guard = self.cached.lock().unwrap();
        guard.as_ref().and_then(|cached| {
            let refresh_at = cached.expires_at - Duration::seconds(REFRESH_MARGIN_SECS);
            (Utc::now() < refresh_at).then(|| cached.token.clone())
        })
    }

    #[cfg(test)]
    fn set(&self, token: &str, expires_at: DateTime<Utc>) {
        *self.cached.lock().unwrap() = Some(CachedToken {
            token: token.to_string(),
            expires_at,
        });
    }
}
