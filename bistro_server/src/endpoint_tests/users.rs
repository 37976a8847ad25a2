use actix_web::{http::StatusCode, web, web::ServiceConfig};
use bistro_engine::{
    db_types::{Role, UserAccount},
    traits::{DeleteResult, InsertUserResult, UpdateResult},
    AccountApi,
    AuthApi,
};
use chrono::{TimeZone, Utc};
use serde_json::json;

use super::{
    helpers::{bearer, delete_request, get_request, patch_request, post_request, NOT_ADMIN, UNAUTHENTICATED},
    mocks::{backend_with_role, MockBackend},
};
use crate::routes::{DeleteUserRoute, PromoteUserRoute, RegisterUserRoute, UsersRoute};

#[actix_web::test]
async fn register_new_user() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockBackend::new();
    backend
        .expect_insert_user_if_absent()
        .withf(|u| u.email == "alice@example.com" && u.name.as_deref() == Some("Alice"))
        .times(1)
        .returning(|_| Ok(InsertUserResult::Inserted(7)));
    let body = json!({"email": "alice@example.com", "name": "Alice", "photoURL": "https://example.com/a.png"});
    let (status, body) = post_request("", "/users", body, configure(MockBackend::new(), backend)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"acknowledged":true,"insertedId":7}"#);
}

#[actix_web::test]
async fn register_existing_user() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockBackend::new();
    backend.expect_insert_user_if_absent().times(1).returning(|_| Ok(InsertUserResult::AlreadyExists(7)));
    let body = json!({"email": "alice@example.com"});
    let (status, body) = post_request("", "/users", body, configure(MockBackend::new(), backend)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"message":"user already exists","insertedId":null}"#);
}

#[actix_web::test]
async fn register_without_email() {
    let _ = env_logger::try_init().ok();
    let body = json!({"name": "Nobody"});
    let (status, body) = post_request("", "/users", body, configure(MockBackend::new(), MockBackend::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("missing field `email`"), "was: {body}");
}

#[actix_web::test]
async fn list_users_without_token() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("", "/users", configure(MockBackend::new(), MockBackend::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, UNAUTHENTICATED);
}

#[actix_web::test]
async fn list_users_as_regular_user() {
    let _ = env_logger::try_init().ok();
    // fetch_users has no expectation, so reaching the handler would panic
    let roles = backend_with_role(Some(Role::Regular));
    let (status, body) = get_request(&bearer("bob@example.com"), "/users", configure(roles, MockBackend::new())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, NOT_ADMIN);
}

#[actix_web::test]
async fn list_users_as_admin() {
    let _ = env_logger::try_init().ok();
    let roles = backend_with_role(Some(Role::Admin));
    let mut backend = MockBackend::new();
    backend.expect_fetch_users().times(1).returning(|| {
        Ok(vec![UserAccount {
            id: 1,
            email: "admin@example.com".into(),
            name: Some("Admin".into()),
            photo_url: None,
            role: Role::Admin,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }])
    });
    let (status, body) = get_request(&bearer("admin@example.com"), "/users", configure(roles, backend)).await;
    assert_eq!(status, StatusCode::OK);
    let users: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        users,
        json!([{"id": 1, "email": "admin@example.com", "name": "Admin", "photoURL": null, "role": "admin",
            "createdAt": "2024-06-01T12:00:00Z"}])
    );
}

#[actix_web::test]
async fn delete_user_requires_admin() {
    let _ = env_logger::try_init().ok();
    let (status, _) = delete_request("", "/users/3", configure(MockBackend::new(), MockBackend::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let roles = backend_with_role(Some(Role::Regular));
    let (status, _) =
        delete_request(&bearer("bob@example.com"), "/users/3", configure(roles, MockBackend::new())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn delete_user_as_admin() {
    let _ = env_logger::try_init().ok();
    let roles = backend_with_role(Some(Role::Admin));
    let mut backend = MockBackend::new();
    backend.expect_delete_user().withf(|id| *id == 3).times(1).returning(|_| Ok(DeleteResult::new(1)));
    let (status, body) = delete_request(&bearer("admin@example.com"), "/users/3", configure(roles, backend)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"acknowledged":true,"deletedCount":1}"#);
}

#[actix_web::test]
async fn promote_user_as_admin() {
    let _ = env_logger::try_init().ok();
    let mut roles = backend_with_role(Some(Role::Admin));
    roles
        .expect_assign_role()
        .withf(|id, role| *id == 4 && *role == Role::Admin)
        .times(1)
        .returning(|_, _| Ok(UpdateResult::new(1, 1)));
    let (status, body) =
        patch_request(&bearer("admin@example.com"), "/users/admin/4", json!({}), configure(roles, MockBackend::new()))
            .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"acknowledged":true,"matchedCount":1,"modifiedCount":1}"#);
}

#[actix_web::test]
async fn promote_user_as_regular_user() {
    let _ = env_logger::try_init().ok();
    let roles = backend_with_role(Some(Role::Regular));
    let (status, body) =
        patch_request(&bearer("bob@example.com"), "/users/admin/4", json!({}), configure(roles, MockBackend::new()))
            .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, NOT_ADMIN);
}

// The role resolver and the account API each own a backend, so role lookups are configured separately
fn configure(roles: MockBackend, accounts: MockBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(AuthApi::new(roles)))
            .app_data(web::Data::new(AccountApi::new(accounts)))
            .service(RegisterUserRoute::<MockBackend>::new())
            .service(UsersRoute::<MockBackend>::new())
            .service(DeleteUserRoute::<MockBackend>::new())
            .service(PromoteUserRoute::<MockBackend>::new());
    }
}
