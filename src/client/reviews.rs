use serde::Serialize;
use tracing::info;
use validator::Validate;

use super::ApiClient;
use crate::error::ApiResult;
use crate::forms::ReviewForm;
use crate::models::review::ReviewsEnvelope;
use crate::models::{Page, Review};

/// Отзывы на странице карточки фильма.
pub const REVIEW_PAGE_SIZE: u32 = 5;

#[derive(Debug, Serialize)]
struct ReviewPageQuery {
    page: u32,
    size: u32,
}

impl ApiClient {
    /// `GET /api/reviews/movies/:movieId?page&size`
    pub async fn movie_reviews(&self, movie_id: i64, page: u32) -> ApiResult<Page<Review>> {
        let envelope: ReviewsEnvelope = self
            .get_with_query(
                &format!("/api/reviews/movies/{movie_id}"),
                &ReviewPageQuery { page, size: REVIEW_PAGE_SIZE },
            )
            .await?;
        Ok(envelope.reviews)
    }

    /// `POST /api/reviews/movies/:movieId`
    pub async fn add_review(&self, movie_id: i64, form: &ReviewForm) -> ApiResult<()> {
        form.validate()?;
        self.post_no_content(&format!("/api/reviews/movies/{movie_id}"), form)
            .await?;
        info!("Review posted for movie {}", movie_id);
        Ok(())
    }

    /// `PUT /api/reviews/:id`
    pub async fn update_review(&self, review_id: i64, form: &ReviewForm) -> ApiResult<()> {
        form.validate()?;
        self.put_no_content(&format!("/api/reviews/{review_id}"), form).await
    }

    /// `DELETE /api/reviews/:id`
    pub async fn delete_review(&self, review_id: i64) -> ApiResult<()> {
        self.delete(&format!("/api/reviews/{review_id}")).await
    }
}
