use serde::{Deserialize, Serialize};

use super::{lenient, Movie};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cinema {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub region_id: Option<String>,
    pub region_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub screen_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub cinema_id: Option<String>,
    pub cinema_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub total_seats: Option<i64>,
}

/// Ответ `GET /api/cinemas/:id/movies/current`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CurrentMovies {
    #[serde(default)]
    pub movies: Vec<Movie>,
}

/// Ценовая категория места.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeatGrade {
    pub id: &'static str,
    pub name: &'static str,
    pub price: i64,
}

pub const SEAT_GRADES: [SeatGrade; 4] = [
    SeatGrade { id: "A", name: "General", price: 12000 },
    SeatGrade { id: "B", name: "Premium", price: 15000 },
    SeatGrade { id: "C", name: "Couple", price: 28000 },
    SeatGrade { id: "D", name: "VIP", price: 18000 },
];

impl SeatGrade {
    /// Находит категорию по коду или по старому имени (`GENERAL`, `VIP`, ...).
    pub fn lookup(raw: &str) -> Option<SeatGrade> {
        let id = match raw.trim().to_ascii_uppercase().as_str() {
            "A" | "GENERAL" => "A",
            "B" | "PREMIUM" => "B",
            "C" | "COUPLE" => "C",
            "D" | "VIP" => "D",
            _ => return None,
        };
        SEAT_GRADES.iter().copied().find(|g| g.id == id)
    }
}
