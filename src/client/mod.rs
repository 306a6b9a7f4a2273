//! HTTP-клиент REST API кинотеатра.
//!
//! Ядро (`ApiClient`) отвечает за URL, bearer-токен, разбор ошибок и
//! circuit breaker; группы эндпоинтов реализованы отдельными блоками `impl`
//! в соседних файлах.

mod admin;
mod auth;
mod cinemas;
mod members;
mod movies;
mod reservations;
mod reviews;

pub use reservations::CancelExpiredResult;
pub use reviews::REVIEW_PAGE_SIZE;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, warn};

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    services::{CircuitBreaker, CircuitState},
};

#[derive(Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
    /// Bearer-токен текущей сессии; гость работает без него.
    token: Option<String>,
    circuit_breaker: Arc<CircuitBreaker>,
}

impl ApiClient {
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.api.user_agent.as_str())
            .timeout(Duration::from_secs(config.api.timeout_seconds))
            .build()?;

        let circuit_breaker = Arc::new(CircuitBreaker::new(
            config.circuit_breaker.failure_threshold,
            config.circuit_breaker.timeout_seconds,
        ));

        Ok(Self {
            http_client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            token: None,
            circuit_breaker,
        })
    }

    /// Клиент с настройками по умолчанию для указанного адреса.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Self::from_config(&Config::default().with_base_url(base_url))
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.set_token(token);
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.trim().is_empty());
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn circuit_state(&self) -> CircuitState {
        self.circuit_breaker.state()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}", method, path);
        let builder = self.http_client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Отправляет запрос через circuit breaker и возвращает тело ответа.
    async fn execute(&self, builder: RequestBuilder) -> ApiResult<String> {
        if !self.circuit_breaker.can_execute() {
            warn!("Circuit breaker is OPEN - blocking cinema API request");
            return Err(ApiError::CircuitOpen);
        }

        let result = Self::read_body(builder).await;

        match &result {
            Err(e) if e.is_service_failure() => {
                error!("Cinema API request failed: {}", e);
                self.circuit_breaker.record_failure();
            }
            _ => self.circuit_breaker.record_success(),
        }
        result
    }

    async fn read_body(builder: RequestBuilder) -> ApiResult<String> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::from_response(status, &body))
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let body = self.execute(builder).await?;
        // Пустое тело трактуем как JSON null, чтобы `Option<T>` и `()` работали
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        Ok(serde_json::from_str(body)?)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send_json(self.request(Method::GET, path)).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send_json(self.request(Method::GET, path).query(query)).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.request(Method::PUT, path).json(body)).await
    }

    /// Запрос, тело ответа которого не нужно.
    pub(crate) async fn send_ignoring_body(&self, builder: RequestBuilder) -> ApiResult<()> {
        self.execute(builder).await.map(|_| ())
    }

    pub(crate) async fn post_no_content<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        self.send_ignoring_body(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn put_no_content<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        self.send_ignoring_body(self.request(Method::PUT, path).json(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send_ignoring_body(self.request(Method::DELETE, path)).await
    }
}

/// Идентификатор как сегмент пути (коды кинотеатров, телефоны).
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id.trim()).into_owned()
}
