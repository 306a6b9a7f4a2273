//! Эндпоинты администратора. Все требуют токен с ролью администратора.

use tracing::info;
use validator::Validate;

use super::{segment, ApiClient};
use crate::error::ApiResult;
use crate::forms::{CinemaForm, MovieForm, ScheduleForm, ScreenForm, SeatForm};
use crate::models::member::MemberEnvelope;
use crate::models::{Cinema, GuestDetails, GuestSummary, Member, Movie, Schedule, Screen, SeatDto};

impl ApiClient {
    // --- фильмы ---

    pub async fn admin_movie(&self, movie_id: i64) -> ApiResult<Movie> {
        self.get(&format!("/api/admin/movies/{movie_id}")).await
    }

    pub async fn create_movie(&self, form: MovieForm) -> ApiResult<()> {
        let form = form.prepare()?;
        self.post_no_content("/api/admin/movies", &form).await?;
        info!("Movie '{}' registered", form.title);
        Ok(())
    }

    pub async fn update_movie(&self, movie_id: i64, form: MovieForm) -> ApiResult<()> {
        let form = form.prepare()?;
        self.put_no_content(&format!("/api/admin/movies/{movie_id}"), &form)
            .await
    }

    pub async fn delete_movie(&self, movie_id: i64) -> ApiResult<()> {
        self.delete(&format!("/api/admin/movies/{movie_id}")).await?;
        info!("Movie {} deleted", movie_id);
        Ok(())
    }

    // --- кинотеатры ---

    pub async fn admin_cinemas(&self) -> ApiResult<Vec<Cinema>> {
        self.get("/api/admin/cinemas").await
    }

    pub async fn create_cinema(&self, form: &CinemaForm) -> ApiResult<()> {
        form.validate()?;
        self.post_no_content("/api/admin/cinemas", form).await
    }

    pub async fn update_cinema(&self, cinema_id: &str, form: &CinemaForm) -> ApiResult<()> {
        form.validate()?;
        self.put_no_content(&format!("/api/admin/cinemas/{}", segment(cinema_id)), form)
            .await
    }

    pub async fn delete_cinema(&self, cinema_id: &str) -> ApiResult<()> {
        self.delete(&format!("/api/admin/cinemas/{}", segment(cinema_id)))
            .await
    }

    // --- залы ---

    pub async fn screens(&self) -> ApiResult<Vec<Screen>> {
        self.get("/api/admin/screens").await
    }

    pub async fn cinema_screens(&self, cinema_id: &str) -> ApiResult<Vec<Screen>> {
        self.get(&format!("/api/admin/cinemas/{}/screens", segment(cinema_id)))
            .await
    }

    pub async fn create_screen(&self, form: &ScreenForm) -> ApiResult<()> {
        form.validate()?;
        self.post_no_content("/api/admin/screens", form).await
    }

    pub async fn update_screen(&self, screen_id: &str, form: &ScreenForm) -> ApiResult<()> {
        form.validate()?;
        self.put_no_content(&format!("/api/admin/screens/{}", segment(screen_id)), form)
            .await
    }

    pub async fn delete_screen(&self, screen_id: &str) -> ApiResult<()> {
        self.delete(&format!("/api/admin/screens/{}", segment(screen_id)))
            .await
    }

    // --- места ---

    /// Все места или только места зала `screen_id`.
    pub async fn seats(&self, screen_id: Option<&str>) -> ApiResult<Vec<SeatDto>> {
        match screen_id {
            Some(id) => {
                self.get(&format!("/api/admin/screens/{}/seats", segment(id)))
                    .await
            }
            None => self.get("/api/admin/seats").await,
        }
    }

    pub async fn create_seat(&self, form: SeatForm) -> ApiResult<()> {
        let form = form.prepare()?;
        self.post_no_content("/api/admin/seats", &form).await
    }

    pub async fn update_seat(&self, seat_id: i64, form: SeatForm) -> ApiResult<()> {
        let form = form.prepare()?;
        self.put_no_content(&format!("/api/admin/seats/{seat_id}"), &form)
            .await
    }

    pub async fn delete_seat(&self, seat_id: i64) -> ApiResult<()> {
        self.delete(&format!("/api/admin/seats/{seat_id}")).await
    }

    // --- сеансы ---

    pub async fn admin_schedules(&self) -> ApiResult<Vec<Schedule>> {
        self.get("/api/admin/schedules").await
    }

    pub async fn create_schedule(&self, form: ScheduleForm) -> ApiResult<()> {
        let request = form.prepare()?;
        self.post_no_content("/api/admin/schedules", &request).await?;
        info!(
            "Schedule for movie {} at {} created",
            request.movie_id, request.start_time
        );
        Ok(())
    }

    pub async fn update_schedule(&self, schedule_id: i64, form: ScheduleForm) -> ApiResult<()> {
        let request = form.prepare()?;
        self.put_no_content(&format!("/api/admin/schedules/{schedule_id}"), &request)
            .await
    }

    pub async fn delete_schedule(&self, schedule_id: i64) -> ApiResult<()> {
        self.delete(&format!("/api/admin/schedules/{schedule_id}"))
            .await
    }

    // --- участники и гости ---

    pub async fn members(&self) -> ApiResult<Vec<Member>> {
        self.get("/api/admin/members").await
    }

    pub async fn member(&self, member_id: &str) -> ApiResult<Member> {
        let envelope: MemberEnvelope = self
            .get(&format!("/api/admin/members/{}", segment(member_id)))
            .await?;
        Ok(envelope.member)
    }

    pub async fn guests(&self) -> ApiResult<Vec<GuestSummary>> {
        self.get("/api/admin/nonmembers").await
    }

    pub async fn guest(&self, phone_number: &str) -> ApiResult<GuestDetails> {
        let phone = crate::forms::strip_hyphens(phone_number);
        self.get(&format!("/api/admin/nonmembers/{}", segment(&phone)))
            .await
    }
}
