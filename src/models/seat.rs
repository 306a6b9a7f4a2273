use serde::{Deserialize, Serialize};

use super::lenient;

/// Место в зале, как его описывает сервер.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatDto {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub seat_grade_id: String,
    #[serde(default)]
    pub seat_grade_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub row: String,
    #[serde(deserialize_with = "lenient::string")]
    pub column: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub screen_id: Option<String>,
    pub screen_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub price: Option<i64>,
    pub available: Option<bool>,
}

impl SeatDto {
    /// Метка места: ряд + номер, например `A6`.
    pub fn label(&self) -> String {
        format!("{}{}", self.row, self.column)
    }
}

/// Ответ `GET /api/reservations/schedules/:scheduleId/seats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSeats {
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub schedule_id: Option<i64>,
    #[serde(default)]
    pub seats: Vec<SeatDto>,
    #[serde(default)]
    pub reserved_seat_ids: Vec<i64>,
}
