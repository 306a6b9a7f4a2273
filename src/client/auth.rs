use serde::Deserialize;
use tracing::info;
use validator::Validate;

use super::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::forms::{LoginForm, SignupForm};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    #[serde(alias = "token")]
    access_token: Option<String>,
}

impl ApiClient {
    /// `POST /api/login`. Возвращает выданный токен и сразу начинает им пользоваться.
    pub async fn login(&mut self, form: &LoginForm) -> ApiResult<String> {
        form.validate()?;
        let response: LoginResponse = self.post("/api/login", form).await?;
        let token = response
            .access_token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ApiError::Unauthorized("login response carried no token".into()))?;

        self.set_token(Some(token.clone()));
        info!("Logged in as {}", form.user_id);
        Ok(token)
    }

    /// `POST /api/signup`
    pub async fn signup(&self, form: SignupForm) -> ApiResult<()> {
        let form = form.prepare()?;
        self.post_no_content("/api/signup", &form).await?;
        info!("Signed up member {}", form.user_id);
        Ok(())
    }

    /// `POST /api/logout`. Локальный токен сбрасывается даже при ошибке сервера.
    pub async fn logout(&mut self) -> ApiResult<()> {
        let result = self
            .post_no_content("/api/logout", &serde_json::json!({}))
            .await;
        self.set_token(None);
        result
    }
}
