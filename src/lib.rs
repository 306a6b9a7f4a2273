pub mod client;
pub mod config;
pub mod error;
pub mod flow;
pub mod forms;
pub mod models;
pub mod services;
pub mod session;

pub use client::ApiClient;
pub use config::Config;
pub use error::{ApiError, ApiResult, FlowError};
pub use flow::ReservationFlow;
pub use session::TokenStore;

use tracing::warn;

// Общий контекст для CLI: конфиг, HTTP-клиент и хранилище токена
pub struct AppContext {
    pub config: Config,
    pub client: ApiClient,
    pub tokens: TokenStore,
}

impl AppContext {
    /// Собирает клиент и подхватывает сохранённый токен, если он есть.
    pub fn new(config: Config) -> ApiResult<Self> {
        let tokens = TokenStore::new(config.session.token_file.clone());
        let token = match tokens.load() {
            Ok(token) => token,
            Err(e) => {
                // Битый файл токена не должен блокировать анонимные запросы
                warn!("Failed to read stored token: {}", e);
                None
            }
        };
        let client = ApiClient::from_config(&config)?.with_token(token);

        Ok(Self { config, client, tokens })
    }
}
