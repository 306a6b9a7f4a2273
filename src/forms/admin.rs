use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

use super::{strip_hyphens, validate_date_param};
use crate::models::{ScreeningStatus, SeatGrade};

fn validate_seat_grade(value: &str) -> Result<(), ValidationError> {
    SeatGrade::lookup(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("seat_grade").with_message("expected one of A, B, C, D".into()))
}

fn validate_known_status(status: &ScreeningStatus) -> Result<(), ValidationError> {
    if *status == ScreeningStatus::Unknown {
        return Err(ValidationError::new("screening_status")
            .with_message("expected N (upcoming), D (showing) or Y (ended)".into()));
    }
    Ok(())
}

/// Регистрация/редактирование фильма.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MovieForm {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "genre is required"))]
    pub genre: String,
    /// `YYYYMMDD`
    #[validate(custom(function = "validate_date_param"))]
    pub release_date: String,
    #[validate(custom(function = "validate_known_status"))]
    pub screening_status: ScreeningStatus,
    #[validate(range(min = 1, max = 600, message = "runtime must be 1-600 minutes"))]
    pub runtime: i64,
    pub actor_name: Option<String>,
    pub director_name: Option<String>,
    pub distributor_name: Option<String>,
    pub viewing_grade: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl MovieForm {
    pub fn prepare(mut self) -> Result<Self, ValidationErrors> {
        self.validate()?;
        self.release_date = strip_hyphens(self.release_date.trim());
        Ok(self)
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CinemaForm {
    /// Код кинотеатра задаётся администратором.
    #[validate(length(min = 1, message = "cinema code is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "region code is required"))]
    pub region_id: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScreenForm {
    /// Код зала задаётся администратором, как и код кинотеатра.
    #[validate(length(min = 1, message = "screen code is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "total seats must be at least 1"))]
    pub total_seats: i64,
    #[validate(length(min = 1, message = "cinema is required"))]
    pub cinema_id: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SeatForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[validate(custom(function = "validate_seat_grade"))]
    pub seat_grade_id: String,
    #[validate(length(min = 1, max = 2, message = "row must be a letter"))]
    pub row: String,
    #[validate(length(min = 1, message = "column is required"))]
    pub column: String,
    #[validate(length(min = 1, message = "screen is required"))]
    pub screen_id: String,
}

impl SeatForm {
    /// Приводит категорию к коду (`VIP` -> `D`) и ряд к верхнему регистру.
    pub fn prepare(mut self) -> Result<Self, ValidationErrors> {
        self.validate()?;
        if let Some(grade) = SeatGrade::lookup(&self.seat_grade_id) {
            self.seat_grade_id = grade.id.to_string();
        }
        self.row = self.row.trim().to_ascii_uppercase();
        Ok(self)
    }
}

/// Сеанс задаётся датой и временем начала/окончания.
#[derive(Debug, Clone)]
pub struct ScheduleForm {
    pub movie_id: i64,
    pub screen_id: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: Option<NaiveTime>,
}

/// Тело `POST/PUT /api/admin/schedules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub movie_id: i64,
    pub screen_id: String,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl ScheduleForm {
    pub fn prepare(self) -> Result<ScheduleRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.movie_id <= 0 {
            errors.add("movie_id", ValidationError::new("range").with_message("movie is required".into()));
        }
        if self.screen_id.trim().is_empty() {
            errors.add("screen_id", ValidationError::new("length").with_message("screen is required".into()));
        }
        if matches!(self.end, Some(end) if end <= self.start) {
            errors.add("end", ValidationError::new("order").with_message("end must be after start".into()));
        }
        if !errors.errors().is_empty() {
            return Err(errors);
        }

        let stamp = |time: NaiveTime| self.date.and_time(time).format("%Y-%m-%dT%H:%M:%S").to_string();
        Ok(ScheduleRequest {
            movie_id: self.movie_id,
            screen_id: self.screen_id.trim().to_string(),
            start_time: stamp(self.start),
            end_time: self.end.map(stamp),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_times_are_combined_with_date() {
        let request = ScheduleForm {
            movie_id: 7,
            screen_id: "S01".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            start: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            end: Some(NaiveTime::from_hms_opt(11, 41, 0).unwrap()),
        }
        .prepare()
        .unwrap();

        assert_eq!(request.start_time, "2025-06-03T09:30:00");
        assert_eq!(request.end_time.as_deref(), Some("2025-06-03T11:41:00"));
    }

    #[test]
    fn schedule_end_must_follow_start() {
        let errors = ScheduleForm {
            movie_id: 7,
            screen_id: "S01".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            start: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            end: Some(NaiveTime::from_hms_opt(10, 0, 0).unwrap()),
        }
        .prepare()
        .unwrap_err();
        assert!(errors.field_errors().contains_key("end"));
    }

    #[test]
    fn seat_grade_name_is_normalised() {
        let seat = SeatForm {
            id: None,
            seat_grade_id: "vip".into(),
            row: "c".into(),
            column: "4".into(),
            screen_id: "S01".into(),
        }
        .prepare()
        .unwrap();
        assert_eq!(seat.seat_grade_id, "D");
        assert_eq!(seat.row, "C");
    }

    #[test]
    fn movie_release_date_sent_without_hyphens() {
        let movie = MovieForm {
            title: "Inner World".into(),
            genre: "Drama".into(),
            release_date: "2025-05-20".into(),
            screening_status: ScreeningStatus::Upcoming,
            runtime: 131,
            actor_name: None,
            director_name: Some("Lee".into()),
            distributor_name: None,
            viewing_grade: Some("12".into()),
            description: None,
            image: None,
        }
        .prepare()
        .unwrap();
        let body = serde_json::to_value(&movie).unwrap();
        assert_eq!(body["releaseDate"], "20250520");
        assert_eq!(body["screeningStatus"], "N");
    }
}
