use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub auth_url: String,
    pub api_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub tenant_id: String,
    pub location_id: String,
    pub location_name: String,
    pub environment: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            auth_url: env::var("MEEVO_AUTH_URL")
                .unwrap_or_else(|_| "https://marketplace.meevo.com/oauth2/token".to_string()),
            api_url: env::var("MEEVO_API_URL")
                .unwrap_or_else(|_| "https://na1pub.meevo.com/publicapi/v1".to_string()),
            client_id: env::var("MEEVO_CLIENT_ID").unwrap_or_default(),
            client_secret: env::var("MEEVO_CLIENT_SECRET").unwrap_or_default(),
            tenant_id: env::var("MEEVO_TENANT_ID").unwrap_or_else(|_| "200507".to_string()),
            location_id: env::var("MEEVO_LOCATION_ID").unwrap_or_else(|_| "201664".to_string()),
            location_name: env::var("LOCATION_NAME")
                .unwrap_or_else(|_| "Phoenix Encanto".to_string()),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()),
        }
    }
}
