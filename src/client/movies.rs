use serde::Serialize;
use tracing::info;

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{Movie, MovieListing, Page};

#[derive(Debug, Serialize)]
struct PageQuery {
    page: u32,
    size: u32,
}

#[derive(Debug, Serialize)]
struct SearchQuery<'a> {
    keyword: &'a str,
}

impl ApiClient {
    /// `GET /api/movies`
    pub async fn list_movies(&self, page: u32, size: u32) -> ApiResult<Page<Movie>> {
        let listing: MovieListing = self
            .get_with_query("/api/movies", &PageQuery { page, size })
            .await?;
        let page = listing.into_page();
        info!("Fetched {} movies (page {})", page.content.len(), page.number);
        Ok(page)
    }

    /// `GET /api/movies/:id`
    pub async fn movie(&self, movie_id: i64) -> ApiResult<Movie> {
        self.get(&format!("/api/movies/{movie_id}")).await
    }

    /// `GET /api/movies/search?keyword=`
    pub async fn search_movies(&self, keyword: &str) -> ApiResult<Vec<Movie>> {
        let listing: MovieListing = self
            .get_with_query("/api/movies/search", &SearchQuery { keyword: keyword.trim() })
            .await?;
        Ok(listing.into_page().content)
    }
}
