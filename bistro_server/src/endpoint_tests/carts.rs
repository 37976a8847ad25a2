use actix_web::{http::StatusCode, web, web::ServiceConfig};
use bistro_engine::{
    db_types::{CartEntry, NewCartEntry},
    traits::DeleteResult,
    CartApi,
};
use chrono::{TimeZone, Utc};
use serde_json::json;

use super::{
    helpers::{bearer, delete_request, get_request, post_request, UNAUTHENTICATED},
    mocks::MockBackend,
};
use crate::routes::{AddToCartRoute, CartRoute, RemoveFromCartRoute};

#[actix_web::test]
async fn add_to_cart() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockBackend::new();
    backend
        .expect_insert_cart_entry()
        .withf(|e| *e == NewCartEntry::new("alice@example.com", 2, "Caesar Salad", 12.5))
        .times(1)
        .returning(|_| Ok(5));
    let entry = json!({"email": "alice@example.com", "menuId": 2, "name": "Caesar Salad", "price": 12.5});
    let (status, body) = post_request("", "/carts", entry, configure(backend)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"acknowledged":true,"insertedId":5}"#);
}

#[actix_web::test]
async fn fetch_cart() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockBackend::new();
    backend.expect_fetch_cart_for_email().withf(|email| email == "alice@example.com").times(1).returning(|email| {
        Ok(vec![CartEntry {
            id: 5,
            email: email.to_string(),
            menu_id: 2,
            name: "Caesar Salad".into(),
            image: String::new(),
            price: 12.5,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }])
    });
    let (status, body) = get_request("", "/carts?email=alice@example.com", configure(backend)).await;
    assert_eq!(status, StatusCode::OK);
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        value,
        json!([{"id": 5, "email": "alice@example.com", "menuId": 2, "name": "Caesar Salad", "image": "",
            "price": 12.5, "createdAt": "2024-06-01T12:00:00Z"}])
    );
}

#[actix_web::test]
async fn fetch_cart_without_email() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("", "/carts", configure(MockBackend::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("missing field `email`"), "was: {body}");
}

#[actix_web::test]
async fn remove_from_cart_without_token() {
    let _ = env_logger::try_init().ok();
    let (status, body) = delete_request("", "/cart/5", configure(MockBackend::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, UNAUTHENTICATED);
}

#[actix_web::test]
async fn remove_from_cart() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockBackend::new();
    backend.expect_delete_cart_entry().withf(|id| *id == 5).times(1).returning(|_| Ok(DeleteResult::new(1)));
    let (status, body) = delete_request(&bearer("alice@example.com"), "/cart/5", configure(backend)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"acknowledged":true,"deletedCount":1}"#);
}

fn configure(backend: MockBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(CartApi::new(backend)))
            .service(AddToCartRoute::<MockBackend>::new())
            .service(CartRoute::<MockBackend>::new())
            .service(RemoveFromCartRoute::<MockBackend>::new());
    }
}
