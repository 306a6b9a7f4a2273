use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ApiClient;
use crate::error::ApiResult;
use crate::forms::to_date_param;
use crate::models::{
    CreateReservationRequest, CreateReservationResponse, PaymentRequest, PaymentResponse,
    Reservation, Schedule, ScheduleList, ScheduleSeats, ScreeningDates, UnpaidReservations,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CancelExpiredQuery {
    timeout_minutes: u32,
}

/// Итог массовой отмены просроченных неоплаченных броней.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelExpiredResult {
    pub cancelled_count: Option<u64>,
    pub message: Option<String>,
}

impl ApiClient {
    /// `GET /api/reservations/movies/:movieId/dates`
    pub async fn screening_dates(&self, movie_id: i64) -> ApiResult<ScreeningDates> {
        self.get(&format!("/api/reservations/movies/{movie_id}/dates"))
            .await
            .map(Option::unwrap_or_default)
    }

    /// `GET /api/reservations/movies/:movieId/dates/:date`
    pub async fn schedules_on(&self, movie_id: i64, date: NaiveDate) -> ApiResult<Vec<Schedule>> {
        let list: Option<ScheduleList> = self
            .get(&format!(
                "/api/reservations/movies/{movie_id}/dates/{}",
                to_date_param(date)
            ))
            .await?;
        Ok(list.unwrap_or_default().schedules)
    }

    /// `GET /api/reservations/schedules/:scheduleId/seats`
    pub async fn schedule_seats(&self, schedule_id: i64) -> ApiResult<ScheduleSeats> {
        self.get(&format!("/api/reservations/schedules/{schedule_id}/seats"))
            .await
            .map(Option::unwrap_or_default)
    }

    /// `POST /api/reservations/create`; бронь создаётся в статусе ожидания оплаты.
    pub async fn create_reservation(
        &self,
        request: &CreateReservationRequest,
    ) -> ApiResult<CreateReservationResponse> {
        let response: CreateReservationResponse =
            self.post("/api/reservations/create", request).await?;
        info!(
            "Reservation {} created for schedule {} seat {}",
            response.reservation_id, request.schedule_id, request.seat_id
        );
        Ok(response)
    }

    /// `GET /api/reservations/:id`
    pub async fn reservation(&self, reservation_id: &str) -> ApiResult<Reservation> {
        self.get(&format!("/api/reservations/{}", super::segment(reservation_id)))
            .await
    }

    /// `POST /api/reservations/:id/payment`
    pub async fn pay_reservation(
        &self,
        reservation_id: &str,
        request: &PaymentRequest,
    ) -> ApiResult<PaymentResponse> {
        let response: Option<PaymentResponse> = self
            .post(
                &format!("/api/reservations/{}/payment", super::segment(reservation_id)),
                request,
            )
            .await?;
        info!("Reservation {} paid by {}", reservation_id, request.payment_method);
        Ok(response.unwrap_or_default())
    }

    /// `POST /api/reservations/:id/issue`
    pub async fn issue_ticket(&self, reservation_id: &str) -> ApiResult<()> {
        self.post_no_content(
            &format!("/api/reservations/{}/issue", super::segment(reservation_id)),
            &serde_json::json!({}),
        )
        .await?;
        info!("Ticket issued for reservation {}", reservation_id);
        Ok(())
    }

    /// `DELETE /api/reservations/:id`
    pub async fn cancel_reservation(&self, reservation_id: &str) -> ApiResult<()> {
        self.delete(&format!("/api/reservations/{}", super::segment(reservation_id)))
            .await?;
        info!("Reservation {} cancelled", reservation_id);
        Ok(())
    }

    /// `GET /api/reservations/admin/unpaid`
    pub async fn unpaid_reservations(&self) -> ApiResult<UnpaidReservations> {
        self.get("/api/reservations/admin/unpaid")
            .await
            .map(Option::unwrap_or_default)
    }

    /// `POST /api/reservations/admin/cancel-expired?timeoutMinutes=N`
    pub async fn cancel_expired_reservations(
        &self,
        timeout_minutes: u32,
    ) -> ApiResult<CancelExpiredResult> {
        let builder = self
            .request(reqwest::Method::POST, "/api/reservations/admin/cancel-expired")
            .query(&CancelExpiredQuery { timeout_minutes: timeout_minutes.max(1) })
            .json(&serde_json::json!({}));
        let result: Option<CancelExpiredResult> = self.send_json(builder).await?;
        info!("Cancelled unpaid reservations older than {} minutes", timeout_minutes);
        Ok(result.unwrap_or_default())
    }
}
