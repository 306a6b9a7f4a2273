#![allow(dead_code)]

use std::path::PathBuf;

use cinema_client::{ApiClient, Config};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const MEMBER_TOKEN: &str = "member-token";

pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default().with_base_url(server.uri());
    config.session.token_file = temp_token_file();
    config
}

pub fn guest_client(server: &MockServer) -> ApiClient {
    ApiClient::from_config(&config_for(server)).expect("client should build")
}

pub fn member_client(server: &MockServer) -> ApiClient {
    guest_client(server).with_token(Some(MEMBER_TOKEN.to_string()))
}

pub fn temp_token_file() -> PathBuf {
    std::env::temp_dir()
        .join(format!("cinema-test-{}", uuid::Uuid::new_v4()))
        .join("token")
}

pub fn movie_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "genre": "Drama",
        "releaseDate": "20250520",
        "screeningStatus": "D",
        "runtime": 131,
        "directorName": "Kim",
        "viewingGrade": "12"
    })
}

pub fn schedules_json() -> Value {
    json!({
        "schedules": [
            {
                "id": 11, "movieId": 7, "movieTitle": "Inner World", "runtime": 131,
                "screeningDate": "20250603",
                "screeningStartTime": "2025-06-03T10:00:00",
                "screeningEndTime": "2025-06-03T12:11:00",
                "cinemaId": "C01", "cinemaName": "Gangnam",
                "screenId": "S1", "screenName": "Hall 1"
            },
            {
                "id": 12, "movieId": 7, "movieTitle": "Inner World", "runtime": 131,
                "screeningDate": "20250603",
                "screeningStartTime": "2025-06-03 14:30:00",
                "cinemaId": "C02", "cinemaName": "Apgujeong",
                "screenId": "S4", "screenName": "Hall 2"
            }
        ]
    })
}

pub fn seats_json() -> Value {
    json!({
        "scheduleId": 11,
        "seats": [
            {"id": 1, "seatGradeId": "A", "seatGradeName": "General", "row": "A", "column": "1", "price": 12000},
            {"id": 2, "seatGradeId": "A", "seatGradeName": "General", "row": "A", "column": "2", "price": 12000},
            {"id": 3, "seatGradeId": "D", "seatGradeName": "VIP", "row": "B", "column": "1", "price": 18000}
        ],
        "reservedSeatIds": [2]
    })
}

pub fn reservation_json(id: &str, paid: bool) -> Value {
    json!({
        "reservationId": id,
        "scheduleId": 11,
        "movieTitle": "Inner World",
        "cinemaName": "Gangnam",
        "screenName": "Hall 1",
        "seatId": 1,
        "seatLabel": "A1",
        "seatGradeName": "General",
        "basePrice": 12000,
        "discountAmount": 0,
        "finalPrice": 12000,
        "paymentStatus": if paid { "Y" } else { "N" },
        "ticketIssuanceStatus": "N",
        "phoneNumber": "01012345678",
        "screeningStartTime": "2025-06-03T10:00:00"
    })
}
