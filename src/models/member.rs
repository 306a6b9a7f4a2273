use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{lenient, Reservation};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient::string")]
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub birth_date: String,
    #[serde(default, alias = "points", deserialize_with = "lenient::opt_int")]
    pub point: Option<i64>,
}

impl Member {
    pub fn point_balance(&self) -> i64 {
        self.point.unwrap_or(0)
    }
}

/// Ответ `GET /api/admin/members/:id` оборачивает участника в `member`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MemberEnvelope {
    pub member: Member,
}

/// `A`: начисление, `U`: списание.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointType {
    #[serde(rename = "A")]
    Earn,
    #[serde(rename = "U")]
    Use,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointHistory {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub member_id: Option<i64>,
    #[serde(deserialize_with = "lenient::int")]
    pub amount: i64,
    #[serde(rename = "type")]
    pub point_type: PointType,
    pub type_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

impl PointHistory {
    /// Изменение баланса со знаком.
    pub fn signed_amount(&self) -> i64 {
        match self.point_type {
            PointType::Earn => self.amount.abs(),
            PointType::Use => -self.amount.abs(),
        }
    }
}

/// Строка списка гостей (бронирования без регистрации).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestSummary {
    pub phone_number: String,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub reservation_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestDetails {
    pub phone_number: String,
    #[serde(default)]
    pub total_reservations: u32,
    #[serde(default)]
    pub completed_reservations: u32,
    #[serde(default)]
    pub cancelled_reservations: u32,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

impl GuestDetails {
    /// Неоплаченные брони гостя; их администратор может отменить.
    pub fn unpaid(&self) -> impl Iterator<Item = &Reservation> {
        self.reservations.iter().filter(|r| !r.is_paid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_history_sign_follows_type() {
        let history: Vec<PointHistory> = serde_json::from_str(
            r#"[{"id":1,"memberId":3,"amount":500,"type":"A","typeText":"earned","createdAt":"2025-06-01T10:00:00"},
                {"id":2,"memberId":3,"amount":300,"type":"U","createdAt":"2025-06-02 11:00:00"}]"#,
        )
        .unwrap();
        let total: i64 = history.iter().map(PointHistory::signed_amount).sum();
        assert_eq!(total, 200);
    }

    #[test]
    fn member_balance_defaults_to_zero() {
        let member: Member = serde_json::from_str(
            r#"{"userId":"hong123","email":"hong@example.com","phoneNumber":"01012345678","birthDate":"19900101"}"#,
        )
        .unwrap();
        assert_eq!(member.point_balance(), 0);
    }
}
