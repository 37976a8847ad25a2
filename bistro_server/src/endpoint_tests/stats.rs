use actix_web::{http::StatusCode, web, web::ServiceConfig};
use bistro_engine::{db_types::Role, traits::Stats, AuthApi, StatsApi};
use serde_json::json;

use super::{
    helpers::{bearer, get_request, NOT_ADMIN, UNAUTHENTICATED},
    mocks::{backend_with_role, MockBackend},
};
use crate::routes::AdminStatsRoute;

#[actix_web::test]
async fn stats_without_token() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("", "/admin-stats", configure(MockBackend::new(), MockBackend::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, UNAUTHENTICATED);
}

#[actix_web::test]
async fn stats_as_regular_user() {
    let _ = env_logger::try_init().ok();
    let roles = backend_with_role(None);
    let (status, body) =
        get_request(&bearer("bob@example.com"), "/admin-stats", configure(roles, MockBackend::new())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, NOT_ADMIN);
}

#[actix_web::test]
async fn stats_as_admin() {
    let _ = env_logger::try_init().ok();
    let roles = backend_with_role(Some(Role::Admin));
    let mut reporting = MockBackend::new();
    reporting
        .expect_fetch_stats()
        .times(1)
        .returning(|| Ok(Stats { users: 3, menu_items: 12, orders: 0, revenue: 0.0 }));
    let (status, body) = get_request(&bearer("admin@example.com"), "/admin-stats", configure(roles, reporting)).await;
    assert_eq!(status, StatusCode::OK);
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value, json!({"users": 3, "menuItems": 12, "orders": 0, "revenue": 0.0}));
}

fn configure(roles: MockBackend, reporting: MockBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(AuthApi::new(roles)))
            .app_data(web::Data::new(StatsApi::new(reporting)))
            .service(AdminStatsRoute::<MockBackend>::new());
    }
}
