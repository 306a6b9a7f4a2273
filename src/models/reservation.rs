use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::lenient;

/// Оплачено ли бронирование (`Y`/`N`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "Y")]
    Paid,
    #[serde(rename = "N")]
    Unpaid,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Выдан ли билет (`Y`/`N`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketIssuanceStatus {
    #[serde(rename = "Y")]
    Issued,
    #[serde(rename = "N")]
    NotIssued,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(alias = "reservationId", deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub schedule_id: Option<i64>,
    pub movie_title: Option<String>,
    pub cinema_name: Option<String>,
    pub screen_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub seat_id: Option<i64>,
    pub seat_label: Option<String>,
    pub seat_grade_name: Option<String>,
    pub status: Option<String>,
    pub status_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_timestamp")]
    pub reservation_time: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub base_price: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub discount_amount: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub final_price: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub ticket_issuance_status: TicketIssuanceStatus,
    pub ticket_issuance_status_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub member_id: Option<i64>,
    pub member_user_id: Option<String>,
    pub user_name: Option<String>,
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub screening_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_timestamp")]
    pub screening_start_time: Option<NaiveDateTime>,
    pub completed: Option<bool>,
    pub ticket_issuable: Option<bool>,
    pub cancellable: Option<bool>,
}

impl Reservation {
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    pub fn is_issued(&self) -> bool {
        self.ticket_issuance_status == TicketIssuanceStatus::Issued
    }

    /// Отменена ли бронь: по статусу, по тексту статуса или по тому, что
    /// неоплаченную бронь уже нельзя отменить.
    pub fn is_cancelled(&self) -> bool {
        let by_status = self
            .status
            .as_deref()
            .map(|s| matches!(s.trim().to_ascii_uppercase().as_str(), "CANCELLED" | "CANCELED"))
            .unwrap_or(false);
        let by_text = self
            .status_text
            .as_deref()
            .map(|t| t.contains("취소"))
            .unwrap_or(false);
        let closed_unpaid = !self.is_paid() && self.cancellable == Some(false);
        by_status || by_text || closed_unpaid
    }

    pub fn is_guest(&self) -> bool {
        self.member_id.is_none() && self.member_user_id.is_none() && self.phone_number.is_some()
    }

    /// Кому принадлежит бронь: логин участника или телефон гостя.
    pub fn owner(&self) -> &str {
        self.member_user_id
            .as_deref()
            .or(self.user_name.as_deref())
            .or(self.phone_number.as_deref())
            .unwrap_or("-")
    }

    /// Итоговая сумма; если сервер её не прислал, база минус скидка.
    pub fn amount_due(&self) -> i64 {
        self.final_price.unwrap_or_else(|| {
            self.base_price.unwrap_or(0) - self.discount_amount.unwrap_or(0)
        })
    }
}

/// Тело `POST /api/reservations/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub schedule_id: i64,
    pub seat_id: i64,
    // Телефон отправляется только гостями
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationResponse {
    #[serde(alias = "id", deserialize_with = "lenient::string")]
    pub reservation_id: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Bank,
    Point,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Bank => "bank",
            PaymentMethod::Point => "point",
        };
        f.write_str(name)
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "bank" => Ok(PaymentMethod::Bank),
            "point" | "points" => Ok(PaymentMethod::Point),
            other => Err(format!("unknown payment method {other:?}")),
        }
    }
}

/// Тело `POST /api/reservations/:id/payment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_points: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub reservation_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub final_price: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub used_points: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub earned_points: Option<i64>,
    pub message: Option<String>,
}

/// Ответ `GET /api/reservations/admin/unpaid`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpaidReservations {
    pub check_time: Option<String>,
    pub total_count: Option<u64>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}
