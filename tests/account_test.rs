mod common;

use cinema_client::forms::{LoginForm, ProfileForm, SignupForm};
use cinema_client::models::PointType;
use cinema_client::{ApiError, AppContext, TokenStore};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{config_for, guest_client, member_client, MEMBER_TOKEN};

#[tokio::test]
async fn login_switches_the_client_to_the_new_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"userId": "hong123", "password": "s3cretpass"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "fresh-token"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/members/my"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4, "userId": "hong123", "email": "hong@example.com",
            "phoneNumber": "01012345678", "birthDate": "19900101", "point": 1200
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = guest_client(&server);
    let form = LoginForm { user_id: "hong123".into(), password: "s3cretpass".into() };
    let token = client.login(&form).await.unwrap();

    assert_eq!(token, "fresh-token");
    let me = client.my_profile().await.unwrap();
    assert_eq!(me.point_balance(), 1200);
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "invalid credentials"})))
        .mount(&server)
        .await;

    let mut client = guest_client(&server);
    let form = LoginForm { user_id: "hong123".into(), password: "wrong".into() };
    let err = client.login(&form).await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized(ref m) if m == "invalid credentials"));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn empty_login_form_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = guest_client(&server);
    let form = LoginForm { user_id: "hong123".into(), password: String::new() };

    assert!(matches!(client.login(&form).await, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn logout_drops_the_token_even_if_the_server_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut client = member_client(&server);
    assert!(client.logout().await.is_err());
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn signup_sends_digits_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/signup"))
        .and(body_json(json!({
            "userId": "hong123",
            "password": "s3cretpass",
            "email": "hong@example.com",
            "phoneNumber": "01012345678",
            "birthDate": "19900101"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let form = SignupForm {
        user_id: "hong123".into(),
        password: "s3cretpass".into(),
        password_confirm: "s3cretpass".into(),
        email: "hong@example.com".into(),
        phone_number: "010-1234-5678".into(),
        birth_date: "1990-01-01".into(),
    };
    guest_client(&server).signup(form).await.unwrap();
}

#[tokio::test]
async fn profile_update_omits_an_empty_password() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/members/my"))
        .and(header("authorization", format!("Bearer {MEMBER_TOKEN}").as_str()))
        .and(body_json(json!({
            "userId": "hong123",
            "email": "new@example.com",
            "phoneNumber": "01098765432",
            "birthDate": "19900101"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let form = ProfileForm {
        user_id: "hong123".into(),
        email: "new@example.com".into(),
        phone_number: "010-9876-5432".into(),
        birth_date: "1990-01-01".into(),
        password: Some(String::new()),
        password_confirm: None,
    };
    member_client(&server).update_profile(form).await.unwrap();
}

#[tokio::test]
async fn point_history_is_sorted_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/members/my/points"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "histories": [
                {"id": 1, "amount": 1200, "type": "A", "createdAt": "2025-05-01T10:00:00"},
                {"id": 2, "amount": 500, "type": "U", "createdAt": "2025-06-01T10:00:00"}
            ]
        })))
        .mount(&server)
        .await;

    let history = member_client(&server).my_points().await.unwrap();

    assert_eq!(history[0].id, 2);
    assert_eq!(history[0].point_type, PointType::Use);
    assert_eq!(history[0].signed_amount(), -500);
    assert_eq!(history[1].signed_amount(), 1200);
}

#[tokio::test]
async fn context_picks_up_the_stored_token() {
    let server = MockServer::start().await;
    let config = config_for(&server);
    TokenStore::new(config.session.token_file.clone())
        .save("stored-token")
        .unwrap();

    let ctx = AppContext::new(config).unwrap();

    assert_eq!(ctx.client.token(), Some("stored-token"));
    ctx.tokens.clear().unwrap();
}
