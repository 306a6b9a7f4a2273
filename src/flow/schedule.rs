use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};

use crate::models::Schedule;

/// Сколько дней показывает лента дат (сегодня и ещё шесть).
pub const DATE_STRIP_DAYS: u64 = 7;

/// Лента дат, начиная с `today`.
pub fn upcoming_dates(today: NaiveDate, days: u64) -> Vec<NaiveDate> {
    (0..days)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .collect()
}

/// Выбор сеанса из расписания на день: кинотеатр -> зал -> время.
#[derive(Debug, Clone, Default)]
pub struct ScheduleSelector {
    schedules: Vec<Schedule>,
    cinema: Option<String>,
    screen: Option<String>,
    selected: Option<i64>,
}

impl ScheduleSelector {
    pub fn new(schedules: Vec<Schedule>) -> Self {
        Self {
            schedules,
            ..Self::default()
        }
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Названия кинотеатров без повторов, по алфавиту.
    pub fn cinemas(&self) -> Vec<&str> {
        self.schedules
            .iter()
            .map(|s| s.cinema_name.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Залы выбранного кинотеатра.
    pub fn screens(&self, cinema: &str) -> Vec<&str> {
        self.schedules
            .iter()
            .filter(|s| s.cinema_name == cinema)
            .map(|s| s.screen_name.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Сеансы в зале, по времени начала.
    pub fn times(&self, cinema: &str, screen: &str) -> Vec<&Schedule> {
        let mut times: Vec<&Schedule> = self
            .schedules
            .iter()
            .filter(|s| s.cinema_name == cinema && s.screen_name == screen)
            .collect();
        times.sort_by_key(|s| s.screening_start_time);
        times
    }

    pub fn choose_cinema(&mut self, cinema: &str) {
        if self.cinema.as_deref() != Some(cinema) {
            self.cinema = Some(cinema.to_string());
            self.screen = None;
            self.selected = None;
        }
    }

    pub fn choose_screen(&mut self, screen: &str) {
        if self.screen.as_deref() != Some(screen) {
            self.screen = Some(screen.to_string());
            self.selected = None;
        }
    }

    /// Выбор сеанса заодно выставляет его кинотеатр и зал.
    pub fn focus(&mut self, schedule_id: i64) -> Option<&Schedule> {
        let schedule = self.schedules.iter().find(|s| s.id == schedule_id)?;
        self.cinema = Some(schedule.cinema_name.clone());
        self.screen = Some(schedule.screen_name.clone());
        self.selected = Some(schedule.id);
        Some(schedule)
    }

    pub fn cinema(&self) -> Option<&str> {
        self.cinema.as_deref()
    }

    pub fn screen(&self) -> Option<&str> {
        self.screen.as_deref()
    }

    pub fn selected(&self) -> Option<&Schedule> {
        let id = self.selected?;
        self.schedules.iter().find(|s| s.id == id)
    }
}
