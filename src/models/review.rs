use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{lenient, Page};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub member_id: Option<i64>,
    pub member_user_id: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(deserialize_with = "lenient::int")]
    pub rating_value: i64,
    #[serde(default, deserialize_with = "lenient::opt_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

impl Review {
    pub fn is_written_by(&self, user_id: &str) -> bool {
        self.member_user_id.as_deref() == Some(user_id)
    }
}

/// Ответ `GET /api/reviews/movies/:movieId` оборачивает страницу в `reviews`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReviewsEnvelope {
    pub reviews: Page<Review>,
}
