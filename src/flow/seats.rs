use std::collections::HashSet;

use crate::error::FlowError;
use crate::models::{ScheduleSeats, SeatDto, SeatGrade};

/// Сервер создаёт бронь на одно место за запрос.
pub const MAX_SEATS_PER_RESERVATION: usize = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct Seat {
    pub id: i64,
    pub label: String,
    pub row: String,
    pub column: String,
    pub grade: Option<SeatGrade>,
    pub grade_name: String,
    pub price: Option<i64>,
    pub available: bool,
}

impl Seat {
    fn from_dto(dto: &SeatDto, reserved: &HashSet<i64>) -> Self {
        let grade = SeatGrade::lookup(&dto.seat_grade_id);
        let grade_name = if dto.seat_grade_name.trim().is_empty() {
            grade.map(|g| g.name.to_string()).unwrap_or_default()
        } else {
            dto.seat_grade_name.clone()
        };

        Self {
            id: dto.id,
            label: dto.label(),
            row: dto.row.clone(),
            column: dto.column.clone(),
            grade,
            grade_name,
            price: dto.price.or(grade.map(|g| g.price)),
            available: !reserved.contains(&dto.id) && dto.available.unwrap_or(true),
        }
    }
}

/// Схема зала для сеанса с отметками занятости.
#[derive(Debug, Clone, Default)]
pub struct SeatMap {
    seats: Vec<Seat>,
}

impl SeatMap {
    pub fn from_response(response: &ScheduleSeats) -> Self {
        let reserved: HashSet<i64> = response.reserved_seat_ids.iter().copied().collect();
        Self {
            seats: response
                .seats
                .iter()
                .map(|dto| Seat::from_dto(dto, &reserved))
                .collect(),
        }
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn find(&self, label: &str) -> Option<&Seat> {
        let label = label.trim();
        self.seats
            .iter()
            .find(|s| s.label.eq_ignore_ascii_case(label))
    }

    pub fn available_count(&self) -> usize {
        self.seats.iter().filter(|s| s.available).count()
    }

    /// Ряды в порядке следования, каждый с местами по номеру.
    pub fn rows(&self) -> Vec<(&str, Vec<&Seat>)> {
        let mut rows: Vec<(&str, Vec<&Seat>)> = Vec::new();
        for seat in &self.seats {
            match rows.iter_mut().find(|(row, _)| *row == seat.row) {
                Some((_, seats)) => seats.push(seat),
                None => rows.push((seat.row.as_str(), vec![seat])),
            }
        }
        rows.sort_by(|a, b| a.0.cmp(b.0));
        for (_, seats) in &mut rows {
            seats.sort_by_key(|s| column_order(&s.column));
        }
        rows
    }
}

fn column_order(column: &str) -> (u32, String) {
    (column.parse().unwrap_or(u32::MAX), column.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatToggle {
    Added,
    Removed,
}

/// Локально выбранные места (метки в порядке выбора).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeatSelection {
    labels: Vec<String>,
}

impl SeatSelection {
    /// Добавляет место, если его нет, иначе убирает. Занятые и
    /// несуществующие места добавить нельзя.
    pub fn toggle(&mut self, map: &SeatMap, label: &str) -> Result<SeatToggle, FlowError> {
        let seat = map
            .find(label)
            .ok_or_else(|| FlowError::UnknownSeat(label.trim().to_string()))?;

        if let Some(pos) = self.labels.iter().position(|l| *l == seat.label) {
            self.labels.remove(pos);
            return Ok(SeatToggle::Removed);
        }
        if !seat.available {
            return Err(FlowError::SeatUnavailable(seat.label.clone()));
        }
        self.labels.push(seat.label.clone());
        Ok(SeatToggle::Added)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// Единственное выбранное место, готовое к отправке.
    pub fn single<'a>(&self, map: &'a SeatMap) -> Result<&'a Seat, FlowError> {
        match self.labels.as_slice() {
            [] => Err(FlowError::NoSeatSelected),
            [label] => map
                .find(label)
                .ok_or_else(|| FlowError::UnknownSeat(label.clone())),
            _ => Err(FlowError::TooManySeats(MAX_SEATS_PER_RESERVATION)),
        }
    }
}
