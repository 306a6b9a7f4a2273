mod common;

use chrono::NaiveDate;
use cinema_client::models::{Cinema, ScreeningStatus};
use cinema_client::ApiError;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{guest_client, movie_json};

#[tokio::test]
async fn movie_list_reads_the_paging_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movies"))
        .and(query_param("page", "1"))
        .and(query_param("size", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [movie_json(3, "Dune"), movie_json(4, "Wicked")],
            "totalPages": 3,
            "totalElements": 6,
            "number": 1,
            "size": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = guest_client(&server).list_movies(1, 2).await.unwrap();

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[1].title, "Wicked");
    assert_eq!(page.total_elements, 6);
    assert!(!page.is_last());
}

#[tokio::test]
async fn movie_list_accepts_a_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movies"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([movie_json(1, "Dune"), movie_json(2, "Up")])),
        )
        .mount(&server)
        .await;

    let page = guest_client(&server).list_movies(0, 20).await.unwrap();

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.total_pages, 1);
    assert!(page.is_last());
}

#[tokio::test]
async fn movie_details_decode_status_codes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movies/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_json(7, "Inner World")))
        .mount(&server)
        .await;

    let movie = guest_client(&server).movie(7).await.unwrap();

    assert_eq!(movie.screening_status, ScreeningStatus::Showing);
    assert_eq!(movie.runtime, Some(131));
    assert_eq!(movie.viewing_grade_label(), "12 and over");
}

#[tokio::test]
async fn missing_movie_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movies/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "movie not found"})))
        .mount(&server)
        .await;

    let err = guest_client(&server).movie(99).await.unwrap_err();

    assert!(matches!(err, ApiError::NotFound(ref m) if m == "movie not found"));
}

#[tokio::test]
async fn search_sends_the_trimmed_keyword() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movies/search"))
        .and(query_param("keyword", "dune"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([movie_json(3, "Dune")])))
        .expect(1)
        .mount(&server)
        .await;

    let movies = guest_client(&server).search_movies("  dune ").await.unwrap();

    assert_eq!(movies.len(), 1);
}

#[tokio::test]
async fn reviews_are_fetched_five_per_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reviews/movies/7"))
        .and(query_param("page", "0"))
        .and(query_param("size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reviews": {
                "content": [{
                    "id": 1, "memberId": 4, "memberUserId": "hong123",
                    "content": "loved it", "ratingValue": 5,
                    "createdAt": "2025-06-01T12:00:00"
                }],
                "totalPages": 1, "totalElements": 1, "number": 0, "size": 5
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reviews = guest_client(&server).movie_reviews(7, 0).await.unwrap();

    assert_eq!(reviews.content.len(), 1);
    assert!(reviews.content[0].is_written_by("hong123"));
}

#[tokio::test]
async fn cinema_schedules_fill_in_the_cinema_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cinemas/C01/movies/7/schedules/dates/20250603"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schedules": [{"id": 11, "screeningDate": "20250603", "screenId": "S1", "screenName": "Hall 1"}]
        })))
        .mount(&server)
        .await;

    let cinema = Cinema {
        id: "C01".into(),
        name: "Gangnam".into(),
        location: "Seoul".into(),
        region_id: None,
        region_name: None,
        screen_count: None,
    };
    let date = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
    let schedules = guest_client(&server)
        .cinema_schedules(&cinema, 7, date)
        .await
        .unwrap();

    assert_eq!(schedules[0].cinema_name, "Gangnam");
    assert_eq!(schedules[0].cinema_id.as_deref(), Some("C01"));
}

#[tokio::test]
async fn current_movies_of_a_cinema() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cinemas/C01/movies/current"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"movies": [movie_json(7, "Inner World")]})),
        )
        .mount(&server)
        .await;

    let movies = guest_client(&server).current_movies("C01").await.unwrap();

    assert_eq!(movies[0].id, 7);
}
