use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use bistro_engine::{db_types::Role, AuthApi};
use serde_json::json;

use super::{
    helpers::{bearer, expired_token, get_auth_config, get_request, post_request, send_request, UNAUTHENTICATED},
    mocks::{backend_with_role, MockBackend},
};
use crate::{
    auth::{JwtClaims, TokenIssuer},
    data_objects::TokenResponse,
    routes::{issue_token, CheckAdminRoute},
};

#[actix_web::test]
async fn issue_token_for_identity() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        post_request("", "/jwt", json!({"email": "alice@example.com", "name": "Alice"}), configure_jwt).await;
    assert_eq!(status, StatusCode::OK);
    let response: TokenResponse = serde_json::from_str(&body).unwrap();
    let claims = TokenIssuer::new(&get_auth_config()).verify(&response.token).unwrap();
    assert_eq!(claims, JwtClaims { email: "alice@example.com".into(), name: Some("Alice".into()) });
}

#[actix_web::test]
async fn issue_token_requires_email() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_request("", "/jwt", json!({"email": " "}), configure_jwt).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Could not read request body: An email address is required"}"#);
}

#[actix_web::test]
async fn issue_token_with_garbage_body() {
    let _ = env_logger::try_init().ok();
    let req = TestRequest::post()
        .uri("/jwt")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("made up nonsense");
    let (status, body) = send_request(req, configure_jwt).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with(r#"{"error":"Could not read request body:"#), "was: {body}");
}

#[actix_web::test]
async fn check_admin_without_token() {
    let _ = env_logger::try_init().ok();
    // No expectations on the backend: the handler must never run
    let (status, body) = get_request("", "/users/admin/alice@example.com", configure(MockBackend::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, UNAUTHENTICATED);
}

#[actix_web::test]
async fn check_admin_with_expired_token() {
    let _ = env_logger::try_init().ok();
    let header = format!("Bearer {}", expired_token("alice@example.com"));
    let (status, body) = get_request(&header, "/users/admin/alice@example.com", configure(MockBackend::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Access token is invalid."), "was: {body}");
}

#[actix_web::test]
async fn check_admin_with_malformed_header() {
    let _ = env_logger::try_init().ok();
    let header = format!("Token {}", crate::endpoint_tests::helpers::token_for("alice@example.com"));
    let (status, body) = get_request(&header, "/users/admin/alice@example.com", configure(MockBackend::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Bearer <token>"), "was: {body}");
}

#[actix_web::test]
async fn check_admin_with_forged_token() {
    let _ = env_logger::try_init().ok();
    let forger = TokenIssuer::new(&crate::config::AuthConfig::new("not the server's secret"));
    let header = format!("Bearer {}", forger.issue_token(JwtClaims::new("alice@example.com")).unwrap());
    let (status, _) = get_request(&header, "/users/admin/alice@example.com", configure(MockBackend::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn check_admin_for_someone_else() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        get_request(&bearer("bob@example.com"), "/users/admin/alice@example.com", configure(MockBackend::new())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, r#"{"error":"Authentication Error. The requested email does not belong to the access token holder."}"#);
}

#[actix_web::test]
async fn check_admin_for_self() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockBackend::new();
    backend
        .expect_fetch_role_for_email()
        .withf(|email| email == "alice@example.com")
        .times(1)
        .returning(|_| Ok(Some(Role::Admin)));
    let (status, body) =
        get_request(&bearer("alice@example.com"), "/users/admin/alice@example.com", configure(backend)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"admin":true}"#);
}

#[actix_web::test]
async fn unknown_principals_are_not_admins() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        get_request(&bearer("carol@example.com"), "/users/admin/carol@example.com", configure(backend_with_role(None)))
            .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"admin":false}"#);
}

fn configure_jwt(cfg: &mut ServiceConfig) {
    cfg.service(issue_token);
}

fn configure(backend: MockBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let auth_api = AuthApi::new(backend);
        cfg.app_data(web::Data::new(auth_api)).service(CheckAdminRoute::<MockBackend>::new());
    }
}
