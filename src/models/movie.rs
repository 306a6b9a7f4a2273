use serde::{Deserialize, Serialize};

use super::{lenient, Page};

/// Статус проката. На проводе однобуквенные коды.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreeningStatus {
    #[serde(rename = "N")]
    Upcoming,
    #[serde(rename = "D")]
    Showing,
    #[serde(rename = "Y")]
    Ended,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ScreeningStatus {
    pub fn code(self) -> &'static str {
        match self {
            ScreeningStatus::Upcoming => "N",
            ScreeningStatus::Showing => "D",
            ScreeningStatus::Ended => "Y",
            ScreeningStatus::Unknown => "?",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScreeningStatus::Upcoming => "upcoming",
            ScreeningStatus::Showing => "now showing",
            ScreeningStatus::Ended => "ended",
            ScreeningStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub screening_status: ScreeningStatus,
    #[serde(default, alias = "runningTime", deserialize_with = "lenient::opt_int")]
    pub runtime: Option<i64>,
    pub actor_name: Option<String>,
    pub director_name: Option<String>,
    pub distributor_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub viewing_grade: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub screening_status_text: Option<String>,
    pub viewing_grade_text: Option<String>,
}

impl Movie {
    /// Человекочитаемый возрастной рейтинг: сначала серверный текст, потом наш.
    pub fn viewing_grade_label(&self) -> String {
        if let Some(text) = self.viewing_grade_text.as_deref().filter(|t| !t.is_empty()) {
            return text.to_string();
        }
        self.viewing_grade
            .as_deref()
            .map(viewing_grade_text)
            .unwrap_or_default()
    }
}

pub fn viewing_grade_text(grade: &str) -> String {
    match grade {
        "ALL" | "전체" => "all ages".to_string(),
        "12" => "12 and over".to_string(),
        "15" => "15 and over".to_string(),
        "18" => "adults only".to_string(),
        other => other.to_string(),
    }
}

/// `/api/movies` отдаёт либо страницу, либо голый массив: принимаем оба варианта.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MovieListing {
    Paged(Page<Movie>),
    Plain(Vec<Movie>),
}

impl MovieListing {
    pub fn into_page(self) -> Page<Movie> {
        match self {
            MovieListing::Paged(page) => page,
            MovieListing::Plain(movies) => Page::single(movies),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIE: &str = r#"{
        "id": 7, "title": "Inner World", "genre": "Drama", "releaseDate": "20250520",
        "screeningStatus": "D", "runtime": 131, "actorName": "Kim", "directorName": "Lee",
        "distributorName": "CJ", "viewingGrade": "12", "description": "…",
        "image": "/img/7.jpg", "rating": 8.7
    }"#;

    #[test]
    fn decodes_movie_and_status_code() {
        let movie: Movie = serde_json::from_str(MOVIE).unwrap();
        assert_eq!(movie.id, 7);
        assert_eq!(movie.screening_status, ScreeningStatus::Showing);
        assert_eq!(movie.runtime, Some(131));
        assert_eq!(movie.viewing_grade_label(), "12 and over");
    }

    #[test]
    fn unknown_status_does_not_fail_decoding() {
        let movie: Movie =
            serde_json::from_str(r#"{"id":"3","title":"X","screeningStatus":"Z"}"#).unwrap();
        assert_eq!(movie.id, 3);
        assert_eq!(movie.screening_status, ScreeningStatus::Unknown);
    }

    #[test]
    fn listing_accepts_array_and_page() {
        let plain: MovieListing = serde_json::from_str(&format!("[{MOVIE}]")).unwrap();
        assert_eq!(plain.into_page().content.len(), 1);

        let paged: MovieListing = serde_json::from_str(&format!(
            r#"{{"content":[{MOVIE}],"totalPages":4,"totalElements":31,"number":1,"size":10}}"#
        ))
        .unwrap();
        let page = paged.into_page();
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.content[0].title, "Inner World");
    }
}
