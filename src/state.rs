use crate::config::AppConfig;
use crate::services::auth::TokenCache;
use crate::services::salon::SalonApi;

pub struct AppState {
    pub config: AppConfig,
    pub salon: Box<dyn SalonApi>,
    pub tokens: TokenCache,
}
