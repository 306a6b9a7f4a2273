use chrono::NaiveDate;

use super::{segment, ApiClient};
use crate::error::ApiResult;
use crate::forms::to_date_param;
use crate::models::cinema::CurrentMovies;
use crate::models::{Cinema, Movie, Schedule, ScheduleList};

impl ApiClient {
    /// `GET /api/cinemas`
    pub async fn cinemas(&self) -> ApiResult<Vec<Cinema>> {
        self.get("/api/cinemas").await
    }

    /// `GET /api/cinemas/:id`
    pub async fn cinema(&self, cinema_id: &str) -> ApiResult<Cinema> {
        self.get(&format!("/api/cinemas/{}", segment(cinema_id))).await
    }

    /// `GET /api/cinemas/:id/movies/current`
    pub async fn current_movies(&self, cinema_id: &str) -> ApiResult<Vec<Movie>> {
        let current: Option<CurrentMovies> = self
            .get(&format!("/api/cinemas/{}/movies/current", segment(cinema_id)))
            .await?;
        Ok(current.unwrap_or_default().movies)
    }

    /// Сеансы фильма в конкретном кинотеатре. Пустое название кинотеатра в
    /// ответе заполняется названием `cinema`.
    pub async fn cinema_schedules(
        &self,
        cinema: &Cinema,
        movie_id: i64,
        date: NaiveDate,
    ) -> ApiResult<Vec<Schedule>> {
        let list: Option<ScheduleList> = self
            .get(&format!(
                "/api/cinemas/{}/movies/{movie_id}/schedules/dates/{}",
                segment(&cinema.id),
                to_date_param(date)
            ))
            .await?;

        let mut schedules = list.unwrap_or_default().schedules;
        for schedule in &mut schedules {
            if schedule.cinema_name.trim().is_empty() {
                schedule.cinema_name = cinema.name.clone();
            }
            if schedule.cinema_id.is_none() {
                schedule.cinema_id = Some(cinema.id.clone());
            }
        }
        Ok(schedules)
    }
}
