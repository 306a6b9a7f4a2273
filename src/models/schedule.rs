use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub movie_id: Option<i64>,
    #[serde(default)]
    pub movie_title: String,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub runtime: Option<i64>,
    /// `YYYYMMDD`
    #[serde(default, deserialize_with = "lenient::string")]
    pub screening_date: String,
    #[serde(default, deserialize_with = "lenient::opt_timestamp")]
    pub screening_start_time: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient::opt_timestamp")]
    pub screening_end_time: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub cinema_id: Option<String>,
    #[serde(default)]
    pub cinema_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub screen_id: String,
    #[serde(default)]
    pub screen_name: String,
}

impl Schedule {
    pub fn date(&self) -> Option<NaiveDate> {
        crate::forms::parse_date_param(&self.screening_date)
    }

    /// `HH:MM` начала сеанса.
    pub fn start_label(&self) -> String {
        self.screening_start_time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string())
    }
}

/// Ответ `GET .../dates/:date`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleList {
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

/// Ответ `GET /api/reservations/movies/:movieId/dates`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningDates {
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub movie_id: Option<i64>,
    #[serde(default)]
    pub dates: Vec<String>,
}

impl ScreeningDates {
    /// Даты в виде `NaiveDate`, нераспознанные пропускаются.
    pub fn parsed(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .dates
            .iter()
            .filter_map(|d| crate::forms::parse_date_param(d))
            .collect();
        dates.sort();
        dates.dedup();
        dates
    }
}
