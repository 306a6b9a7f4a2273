use serde::Deserialize;

use super::ApiClient;
use crate::error::ApiResult;
use crate::forms::ProfileForm;
use crate::models::{Member, PointHistory};

// История баллов приходит то массивом, то обёрнутой в объект
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PointsResponse {
    List(Vec<PointHistory>),
    Wrapped {
        #[serde(alias = "pointHistories", alias = "points")]
        histories: Vec<PointHistory>,
    },
}

impl ApiClient {
    /// `GET /api/members/my`
    pub async fn my_profile(&self) -> ApiResult<Member> {
        self.get("/api/members/my").await
    }

    /// `PUT /api/members/my`
    pub async fn update_profile(&self, form: ProfileForm) -> ApiResult<()> {
        let update = form.prepare()?;
        self.put_no_content("/api/members/my", &update).await
    }

    /// `GET /api/members/my/points`, новые записи первыми.
    pub async fn my_points(&self) -> ApiResult<Vec<PointHistory>> {
        let response: Option<PointsResponse> = self.get("/api/members/my/points").await?;
        let mut history = match response {
            Some(PointsResponse::List(list)) => list,
            Some(PointsResponse::Wrapped { histories }) => histories,
            None => Vec::new(),
        };
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(history)
    }
}
