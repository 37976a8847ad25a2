use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web, web::ServiceConfig, App};
use chrono::{Duration, Utc};
use jwt_compact::{
    alg::{Hs256, Hs256Key},
    AlgorithmExt,
    Claims,
    Header,
};
use log::debug;

use crate::{
    auth::{JwtClaims, TokenIssuer},
    config::AuthConfig,
    server::{json_config, path_config, query_config},
};

// DO NOT re-use this secret anywhere.
const TEST_JWT_SECRET: &str = "bistro endpoint tests only";

pub fn get_auth_config() -> AuthConfig {
    AuthConfig::new(TEST_JWT_SECRET)
}

pub fn token_for(email: &str) -> String {
    TokenIssuer::new(&get_auth_config()).issue_token(JwtClaims::new(email)).unwrap()
}

pub fn bearer(email: &str) -> String {
    format!("Bearer {}", token_for(email))
}

pub fn expired_token(email: &str) -> String {
    let key = Hs256Key::new(TEST_JWT_SECRET.as_bytes());
    let mut claims = Claims::new(JwtClaims::new(email));
    claims.expiration = Some(Utc::now() - Duration::days(1));
    Hs256.token(&Header::empty().with_token_type("JWT"), &claims, &key).unwrap()
}

/// Sends `req` to an app built by `configure`, with the token issuer and the JSON error handlers installed the same
/// way the real server does. Errors raised by middleware are rendered into responses, so callers always get the
/// status and body a client would see.
pub async fn send_request<F>(req: TestRequest, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let app = App::new()
        .app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .app_data(web::Data::new(TokenIssuer::new(&get_auth_config())))
        .configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = match test::try_call_service(&service, req.to_request()).await {
        Ok(res) => res.into_parts().1,
        Err(e) => e.error_response(),
    };
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

pub async fn get_request<F>(auth_header: &str, path: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let mut req = TestRequest::get().uri(path);
    if !auth_header.is_empty() {
        req = req.insert_header(("Authorization", auth_header));
    }
    send_request(req, configure).await
}

pub async fn post_request<F>(
    auth_header: &str,
    path: &str,
    body: serde_json::Value,
    configure: F,
) -> (StatusCode, String)
where
    F: FnOnce(&mut ServiceConfig),
{
    let mut req = TestRequest::post().uri(path).set_json(body);
    if !auth_header.is_empty() {
        req = req.insert_header(("Authorization", auth_header));
    }
    send_request(req, configure).await
}

pub async fn patch_request<F>(
    auth_header: &str,
    path: &str,
    body: serde_json::Value,
    configure: F,
) -> (StatusCode, String)
where
    F: FnOnce(&mut ServiceConfig),
{
    let mut req = TestRequest::patch().uri(path).set_json(body);
    if !auth_header.is_empty() {
        req = req.insert_header(("Authorization", auth_header));
    }
    send_request(req, configure).await
}

pub async fn delete_request<F>(auth_header: &str, path: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let mut req = TestRequest::delete().uri(path);
    if !auth_header.is_empty() {
        req = req.insert_header(("Authorization", auth_header));
    }
    send_request(req, configure).await
}

pub const UNAUTHENTICATED: &str = r#"{"error":"Authentication Error. No access token was provided."}"#;
pub const NOT_ADMIN: &str =
    r#"{"error":"Authentication Error. Insufficient Permissions. This operation requires the admin role"}"#;
