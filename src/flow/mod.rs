//! Пошаговое бронирование: дата -> сеанс -> место -> бронь -> оплата -> билет.
//!
//! Синхронные методы меняют состояние и проверяют порядок шагов, асинхронные
//! (`choose_date`, `submit`, `pay`, ...) дополнительно ходят в API.
//! Загрузки сеансов и мест помечаются поколением: ответ на устаревший выбор
//! отбрасывается.

pub mod schedule;
pub mod seats;

use std::fmt;

use chrono::NaiveDate;
use tracing::{info, warn};
use validator::ValidationErrors;

use crate::client::ApiClient;
use crate::error::{ApiResult, FlowError};
use crate::forms::GuestContact;
use crate::models::{
    CreateReservationRequest, CreateReservationResponse, PaymentMethod, PaymentRequest,
    PaymentResponse, Reservation, Schedule, ScheduleSeats,
};

pub use schedule::{upcoming_dates, ScheduleSelector, DATE_STRIP_DAYS};
pub use seats::{Seat, SeatMap, SeatSelection, SeatToggle, MAX_SEATS_PER_RESERVATION};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowStage {
    ChoosingDate,
    ChoosingSchedule { date: NaiveDate },
    ChoosingSeats { schedule_id: i64 },
    AwaitingPayment { reservation_id: String },
    Paid { reservation_id: String },
    Issued { reservation_id: String },
    Cancelled { reservation_id: String },
}

impl FlowStage {
    pub fn reservation_id(&self) -> Option<&str> {
        match self {
            FlowStage::AwaitingPayment { reservation_id }
            | FlowStage::Paid { reservation_id }
            | FlowStage::Issued { reservation_id }
            | FlowStage::Cancelled { reservation_id } => Some(reservation_id),
            _ => None,
        }
    }

    /// До создания брони выбор ещё можно менять.
    fn is_editable(&self) -> bool {
        self.reservation_id().is_none()
    }
}

impl fmt::Display for FlowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowStage::ChoosingDate => f.write_str("choosing a date"),
            FlowStage::ChoosingSchedule { date } => write!(f, "choosing a schedule on {date}"),
            FlowStage::ChoosingSeats { schedule_id } => {
                write!(f, "choosing seats for schedule {schedule_id}")
            }
            FlowStage::AwaitingPayment { reservation_id } => {
                write!(f, "awaiting payment ({reservation_id})")
            }
            FlowStage::Paid { reservation_id } => write!(f, "paid ({reservation_id})"),
            FlowStage::Issued { reservation_id } => write!(f, "issued ({reservation_id})"),
            FlowStage::Cancelled { reservation_id } => write!(f, "cancelled ({reservation_id})"),
        }
    }
}

/// Что выбрал пользователь на странице оплаты.
#[derive(Debug, Clone, Default)]
pub struct PaymentChoice {
    pub method: Option<PaymentMethod>,
    pub used_points: Option<i64>,
    pub discount_code: Option<String>,
    pub terms_accepted: bool,
}

#[derive(Debug, Clone)]
pub struct ReservationFlow {
    movie_id: Option<i64>,
    stage: FlowStage,
    date: Option<NaiveDate>,
    selector: ScheduleSelector,
    seat_map: SeatMap,
    selection: SeatSelection,
    guest_phone: Option<String>,
    generation: u64,
    reservation: Option<Reservation>,
}

impl ReservationFlow {
    pub fn new(movie_id: i64) -> Self {
        Self {
            movie_id: Some(movie_id),
            stage: FlowStage::ChoosingDate,
            date: None,
            selector: ScheduleSelector::default(),
            seat_map: SeatMap::default(),
            selection: SeatSelection::default(),
            guest_phone: None,
            generation: 0,
            reservation: None,
        }
    }

    /// Продолжение уже созданной брони (страницы оплаты и завершения).
    pub fn resume(reservation: Reservation) -> Self {
        let reservation_id = reservation.id.clone();
        let stage = if reservation.is_cancelled() {
            FlowStage::Cancelled { reservation_id }
        } else if reservation.is_issued() {
            FlowStage::Issued { reservation_id }
        } else if reservation.is_paid() {
            FlowStage::Paid { reservation_id }
        } else {
            FlowStage::AwaitingPayment { reservation_id }
        };

        Self {
            movie_id: None,
            stage,
            date: None,
            selector: ScheduleSelector::default(),
            seat_map: SeatMap::default(),
            selection: SeatSelection::default(),
            guest_phone: reservation.phone_number.clone(),
            generation: 0,
            reservation: Some(reservation),
        }
    }

    pub fn movie_id(&self) -> Option<i64> {
        self.movie_id
    }

    pub fn stage(&self) -> &FlowStage {
        &self.stage
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn schedules(&self) -> &ScheduleSelector {
        &self.selector
    }

    pub fn selected_schedule(&self) -> Option<&Schedule> {
        self.selector.selected()
    }

    pub fn seat_map(&self) -> &SeatMap {
        &self.seat_map
    }

    pub fn selection(&self) -> &SeatSelection {
        &self.selection
    }

    pub fn guest_phone(&self) -> Option<&str> {
        self.guest_phone.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reservation(&self) -> Option<&Reservation> {
        self.reservation.as_ref()
    }

    pub fn reservation_id(&self) -> Option<&str> {
        self.stage.reservation_id()
    }

    fn refuse(&self, action: &'static str) -> FlowError {
        warn!("Refused to {} while {}", action, self.stage);
        FlowError::InvalidStage {
            action,
            stage: self.stage.to_string(),
        }
    }

    /// Новая дата сбрасывает сеанс и места. Возвращает поколение для загрузки
    /// расписания.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<u64, FlowError> {
        if !self.stage.is_editable() || self.movie_id.is_none() {
            return Err(self.refuse("change the date"));
        }
        self.generation += 1;
        self.date = Some(date);
        self.selector = ScheduleSelector::default();
        self.seat_map = SeatMap::default();
        self.selection.clear();
        self.stage = FlowStage::ChoosingSchedule { date };
        Ok(self.generation)
    }

    /// Принимает расписание, если оно загружено для текущего выбора.
    pub fn apply_schedules(&mut self, generation: u64, schedules: Vec<Schedule>) -> bool {
        if generation != self.generation {
            warn!(
                "Discarding stale schedules (generation {}, current {})",
                generation, self.generation
            );
            return false;
        }
        self.selector = ScheduleSelector::new(schedules);
        true
    }

    /// Выбор сеанса сбрасывает места. Возвращает поколение для загрузки схемы зала.
    pub fn select_schedule(&mut self, schedule_id: i64) -> Result<u64, FlowError> {
        if !self.stage.is_editable() {
            return Err(self.refuse("change the schedule"));
        }
        if self.date.is_none() {
            return Err(FlowError::NoDateSelected);
        }
        if self.selector.focus(schedule_id).is_none() {
            return Err(FlowError::UnknownSchedule(schedule_id));
        }

        self.generation += 1;
        self.seat_map = SeatMap::default();
        self.selection.clear();
        self.stage = FlowStage::ChoosingSeats { schedule_id };
        Ok(self.generation)
    }

    pub fn apply_seat_map(&mut self, generation: u64, seats: &ScheduleSeats) -> bool {
        if generation != self.generation {
            warn!(
                "Discarding stale seat map (generation {}, current {})",
                generation, self.generation
            );
            return false;
        }
        self.seat_map = SeatMap::from_response(seats);
        true
    }

    pub fn toggle_seat(&mut self, label: &str) -> Result<SeatToggle, FlowError> {
        match self.stage {
            FlowStage::ChoosingSeats { .. } => self.selection.toggle(&self.seat_map, label),
            FlowStage::ChoosingDate => Err(FlowError::NoDateSelected),
            FlowStage::ChoosingSchedule { .. } => Err(FlowError::NoScheduleSelected),
            _ => Err(self.refuse("change seats")),
        }
    }

    /// Телефон гостя; пустая строка сбрасывает его.
    pub fn set_guest_phone(&mut self, raw: &str) -> Result<(), ValidationErrors> {
        if raw.trim().is_empty() {
            self.guest_phone = None;
            return Ok(());
        }
        self.guest_phone = Some(GuestContact::parse(raw)?);
        Ok(())
    }

    /// Тело запроса на бронь. Телефон уходит только без входа.
    pub fn reservation_request(
        &self,
        authenticated: bool,
    ) -> Result<CreateReservationRequest, FlowError> {
        let schedule_id = match self.stage {
            FlowStage::ChoosingSeats { schedule_id } => schedule_id,
            FlowStage::ChoosingDate | FlowStage::ChoosingSchedule { .. } => {
                return Err(FlowError::NoScheduleSelected)
            }
            _ => return Err(self.refuse("submit a reservation")),
        };
        let seat = self.selection.single(&self.seat_map)?;

        let phone_number = if authenticated {
            None
        } else {
            Some(self.guest_phone.clone().ok_or(FlowError::GuestPhoneRequired)?)
        };

        Ok(CreateReservationRequest {
            schedule_id,
            seat_id: seat.id,
            phone_number,
        })
    }

    pub fn mark_reserved(&mut self, reservation_id: impl Into<String>) -> Result<(), FlowError> {
        if !matches!(self.stage, FlowStage::ChoosingSeats { .. }) {
            return Err(self.refuse("record a reservation"));
        }
        self.stage = FlowStage::AwaitingPayment {
            reservation_id: reservation_id.into(),
        };
        Ok(())
    }

    pub fn payment_request(
        &self,
        choice: &PaymentChoice,
        authenticated: bool,
    ) -> Result<PaymentRequest, FlowError> {
        if !matches!(self.stage, FlowStage::AwaitingPayment { .. }) {
            return Err(self.refuse("pay"));
        }
        let method = choice.method.ok_or(FlowError::NoPaymentMethod)?;
        if !choice.terms_accepted {
            return Err(FlowError::TermsNotAccepted);
        }
        if method == PaymentMethod::Point && !authenticated {
            return Err(FlowError::PointsRequireLogin);
        }

        Ok(PaymentRequest {
            payment_method: method,
            used_points: choice.used_points.filter(|p| *p > 0),
            discount_code: choice
                .discount_code
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        })
    }

    pub fn mark_paid(&mut self) -> Result<(), FlowError> {
        match &self.stage {
            FlowStage::AwaitingPayment { reservation_id } => {
                self.stage = FlowStage::Paid {
                    reservation_id: reservation_id.clone(),
                };
                Ok(())
            }
            _ => Err(self.refuse("record a payment")),
        }
    }

    pub fn mark_issued(&mut self) -> Result<(), FlowError> {
        match &self.stage {
            FlowStage::Paid { reservation_id } => {
                self.stage = FlowStage::Issued {
                    reservation_id: reservation_id.clone(),
                };
                Ok(())
            }
            _ => Err(self.refuse("issue a ticket")),
        }
    }

    pub fn mark_cancelled(&mut self) -> Result<(), FlowError> {
        match &self.stage {
            FlowStage::AwaitingPayment { reservation_id } | FlowStage::Paid { reservation_id } => {
                self.stage = FlowStage::Cancelled {
                    reservation_id: reservation_id.clone(),
                };
                Ok(())
            }
            _ => Err(self.refuse("cancel")),
        }
    }

    // --- шаги с обращением к API ---

    pub async fn choose_date(&mut self, client: &ApiClient, date: NaiveDate) -> ApiResult<()> {
        let generation = self.select_date(date)?;
        let movie_id = self.movie_id.ok_or_else(|| self.refuse("load schedules"))?;
        let schedules = client.schedules_on(movie_id, date).await?;
        self.apply_schedules(generation, schedules);
        Ok(())
    }

    pub async fn choose_schedule(&mut self, client: &ApiClient, schedule_id: i64) -> ApiResult<()> {
        let generation = self.select_schedule(schedule_id)?;
        let seats = client.schedule_seats(schedule_id).await?;
        self.apply_seat_map(generation, &seats);
        Ok(())
    }

    /// Создаёт бронь в статусе ожидания оплаты. Повторная отправка отклоняется.
    pub async fn submit(&mut self, client: &ApiClient) -> ApiResult<CreateReservationResponse> {
        let request = self.reservation_request(client.is_authenticated())?;
        let response = client.create_reservation(&request).await?;
        self.mark_reserved(response.reservation_id.clone())?;
        self.refresh(client).await;
        Ok(response)
    }

    pub async fn pay(
        &mut self,
        client: &ApiClient,
        choice: &PaymentChoice,
    ) -> ApiResult<PaymentResponse> {
        let request = self.payment_request(choice, client.is_authenticated())?;
        let reservation_id = self
            .reservation_id()
            .map(str::to_string)
            .ok_or_else(|| self.refuse("pay"))?;

        let response = client.pay_reservation(&reservation_id, &request).await?;
        self.mark_paid()?;
        self.refresh(client).await;
        Ok(response)
    }

    pub async fn issue(&mut self, client: &ApiClient) -> ApiResult<()> {
        let reservation_id = match &self.stage {
            FlowStage::Paid { reservation_id } => reservation_id.clone(),
            _ => return Err(self.refuse("issue a ticket").into()),
        };
        client.issue_ticket(&reservation_id).await?;
        self.mark_issued()?;
        self.refresh(client).await;
        Ok(())
    }

    pub async fn cancel(&mut self, client: &ApiClient) -> ApiResult<()> {
        let reservation_id = match &self.stage {
            FlowStage::AwaitingPayment { reservation_id } | FlowStage::Paid { reservation_id } => {
                reservation_id.clone()
            }
            _ => return Err(self.refuse("cancel").into()),
        };
        client.cancel_reservation(&reservation_id).await?;
        self.mark_cancelled()?;
        info!("Reservation flow for {} cancelled", reservation_id);
        Ok(())
    }

    // Детали брони нужны только для отображения, сбой не прерывает шаг
    async fn refresh(&mut self, client: &ApiClient) {
        let Some(reservation_id) = self.reservation_id().map(str::to_string) else {
            return;
        };
        match client.reservation(&reservation_id).await {
            Ok(reservation) => self.reservation = Some(reservation),
            Err(e) => warn!("Failed to reload reservation {}: {}", reservation_id, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedules() -> Vec<Schedule> {
        serde_json::from_value(serde_json::json!([
            {"id": 11, "screeningDate": "20250603", "cinemaName": "Gangnam",
             "screenName": "Hall 1", "screenId": "S1",
             "screeningStartTime": "2025-06-03T10:00:00"},
            {"id": 12, "screeningDate": "20250603", "cinemaName": "Gangnam",
             "screenName": "Hall 1", "screenId": "S1",
             "screeningStartTime": "2025-06-03T13:00:00"}
        ]))
        .unwrap()
    }

    fn seats() -> ScheduleSeats {
        serde_json::from_value(serde_json::json!({
            "seats": [
                {"id": 1, "seatGradeId": "A", "row": "A", "column": "1"},
                {"id": 2, "seatGradeId": "A", "row": "A", "column": "2"}
            ],
            "reservedSeatIds": [2]
        }))
        .unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
    }

    fn flow_with_seat() -> ReservationFlow {
        let mut flow = ReservationFlow::new(7);
        let generation = flow.select_date(date()).unwrap();
        assert!(flow.apply_schedules(generation, schedules()));
        let generation = flow.select_schedule(11).unwrap();
        assert!(flow.apply_seat_map(generation, &seats()));
        flow.toggle_seat("A1").unwrap();
        flow
    }

    #[test]
    fn schedule_requires_date() {
        let mut flow = ReservationFlow::new(7);
        assert_eq!(flow.select_schedule(11), Err(FlowError::NoDateSelected));
        assert_eq!(flow.toggle_seat("A1"), Err(FlowError::NoDateSelected));
    }

    #[test]
    fn unknown_schedule_is_rejected() {
        let mut flow = ReservationFlow::new(7);
        let generation = flow.select_date(date()).unwrap();
        flow.apply_schedules(generation, schedules());
        assert_eq!(flow.select_schedule(99), Err(FlowError::UnknownSchedule(99)));
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut flow = ReservationFlow::new(7);
        let first = flow.select_date(date()).unwrap();
        let second = flow.select_date(date().succ_opt().unwrap()).unwrap();

        assert!(!flow.apply_schedules(first, schedules()));
        assert!(flow.schedules().is_empty());
        assert!(flow.apply_schedules(second, Vec::new()));
    }

    #[test]
    fn stale_seat_map_is_discarded() {
        let mut flow = ReservationFlow::new(7);
        let generation = flow.select_date(date()).unwrap();
        assert!(flow.apply_schedules(generation, schedules()));

        let first = flow.select_schedule(11).unwrap();
        let second = flow.select_schedule(12).unwrap();

        assert!(!flow.apply_seat_map(first, &seats()));
        assert!(flow.seat_map().seats().is_empty());
        assert_eq!(flow.toggle_seat("A1"), Err(FlowError::UnknownSeat("A1".into())));

        assert!(flow.apply_seat_map(second, &seats()));
        assert_eq!(flow.seat_map().seats().len(), 2);
    }

    #[test]
    fn changing_schedule_clears_selected_seats() {
        let mut flow = flow_with_seat();
        assert_eq!(flow.selection().len(), 1);

        flow.select_schedule(12).unwrap();
        assert!(flow.selection().is_empty());
        assert!(flow.seat_map().seats().is_empty());

        let mut flow = flow_with_seat();
        flow.select_date(date()).unwrap();
        assert!(flow.selection().is_empty());
        assert_eq!(flow.stage(), &FlowStage::ChoosingSchedule { date: date() });
    }

    #[test]
    fn guest_needs_phone_and_member_does_not_send_it() {
        let mut flow = flow_with_seat();
        assert_eq!(flow.reservation_request(false), Err(FlowError::GuestPhoneRequired));

        flow.set_guest_phone("010-1234-5678").unwrap();
        let guest = flow.reservation_request(false).unwrap();
        assert_eq!(guest.phone_number.as_deref(), Some("01012345678"));
        assert_eq!((guest.schedule_id, guest.seat_id), (11, 1));

        let member = flow.reservation_request(true).unwrap();
        assert_eq!(member.phone_number, None);
    }

    #[test]
    fn invalid_guest_phone_is_rejected() {
        let mut flow = flow_with_seat();
        assert!(flow.set_guest_phone("123").is_err());
        assert!(flow.guest_phone().is_none());
    }

    #[test]
    fn second_submit_is_refused() {
        let mut flow = flow_with_seat();
        flow.mark_reserved("R-1").unwrap();

        assert!(matches!(
            flow.reservation_request(true),
            Err(FlowError::InvalidStage { .. })
        ));
        assert!(flow.select_date(date()).is_err());
        assert!(flow.toggle_seat("A1").is_err());
    }

    #[test]
    fn payment_guards() {
        let mut flow = flow_with_seat();
        let card = PaymentChoice {
            method: Some(PaymentMethod::Card),
            terms_accepted: true,
            ..PaymentChoice::default()
        };
        assert!(matches!(
            flow.payment_request(&card, true),
            Err(FlowError::InvalidStage { .. })
        ));

        flow.mark_reserved("R-1").unwrap();
        let none = PaymentChoice { terms_accepted: true, ..PaymentChoice::default() };
        assert_eq!(flow.payment_request(&none, true), Err(FlowError::NoPaymentMethod));

        let unagreed = PaymentChoice { terms_accepted: false, ..card.clone() };
        assert_eq!(flow.payment_request(&unagreed, true), Err(FlowError::TermsNotAccepted));

        let points = PaymentChoice {
            method: Some(PaymentMethod::Point),
            used_points: Some(5000),
            ..card.clone()
        };
        assert_eq!(flow.payment_request(&points, false), Err(FlowError::PointsRequireLogin));
        assert_eq!(flow.payment_request(&points, true).unwrap().used_points, Some(5000));
        assert_eq!(flow.payment_request(&card, false).unwrap().payment_method, PaymentMethod::Card);
    }

    #[test]
    fn ticket_only_after_payment_and_cancel_before_issue() {
        let mut flow = flow_with_seat();
        flow.mark_reserved("R-1").unwrap();
        assert!(flow.mark_issued().is_err());

        flow.mark_paid().unwrap();
        flow.mark_issued().unwrap();
        assert_eq!(flow.reservation_id(), Some("R-1"));
        assert!(flow.mark_cancelled().is_err());

        let mut flow = flow_with_seat();
        flow.mark_reserved("R-2").unwrap();
        flow.mark_cancelled().unwrap();
        assert_eq!(
            flow.stage(),
            &FlowStage::Cancelled { reservation_id: "R-2".into() }
        );
    }

    #[test]
    fn resume_picks_stage_from_statuses() {
        let reservation: Reservation = serde_json::from_value(serde_json::json!({
            "id": 42, "paymentStatus": "Y", "ticketIssuanceStatus": "N"
        }))
        .unwrap();
        let flow = ReservationFlow::resume(reservation);
        assert_eq!(flow.stage(), &FlowStage::Paid { reservation_id: "42".into() });
        assert!(flow.movie_id().is_none());
    }

    #[test]
    fn cancelled_reservation_resumes_as_cancelled() {
        let reservation: Reservation = serde_json::from_value(serde_json::json!({
            "id": "R7", "status": "CANCELLED", "statusText": "예매 취소",
            "cancellable": false, "paymentStatus": "N"
        }))
        .unwrap();
        let mut flow = ReservationFlow::resume(reservation);
        assert_eq!(flow.stage(), &FlowStage::Cancelled { reservation_id: "R7".into() });

        let card = PaymentChoice {
            method: Some(PaymentMethod::Card),
            terms_accepted: true,
            ..PaymentChoice::default()
        };
        assert!(matches!(
            flow.payment_request(&card, true),
            Err(FlowError::InvalidStage { .. })
        ));
        assert!(flow.mark_cancelled().is_err());
        assert!(flow.mark_paid().is_err());
    }
}
