use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use bistro_engine::{AccountApi, AuthApi, CartApi, CatalogApi, CheckoutApi, SqliteDatabase, StatsApi};
use log::*;

use crate::{
    auth::TokenIssuer,
    config::ServerConfig,
    errors::ServerError,
    integrations::stripe::StripePaymentProvider,
    routes::{
        health,
        index,
        issue_token,
        AddMenuItemRoute,
        AddToCartRoute,
        AdminStatsRoute,
        CartRoute,
        CheckAdminRoute,
        CheckoutRoute,
        CreatePaymentIntentRoute,
        DeleteMenuItemRoute,
        DeleteUserRoute,
        MenuItemRoute,
        MenuRoute,
        PaymentHistoryRoute,
        PromoteUserRoute,
        ReconcileRoute,
        RegisterUserRoute,
        RemoveFromCartRoute,
        ReviewsRoute,
        UpdateMenuItemRoute,
        UsersRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, config.max_connections)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let provider = StripePaymentProvider::new(config.stripe.clone())
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.stripe.secret_key.is_empty() {
        warn!("💳️ No Stripe secret key has been configured. Payment intents will fail.");
    }
    let srv = create_server_instance(config, db, provider)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    provider: StripePaymentProvider,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let auth_api = AuthApi::new(db.clone());
        let accounts_api = AccountApi::new(db.clone());
        let catalog_api = CatalogApi::new(db.clone());
        let cart_api = CartApi::new(db.clone());
        let stats_api = StatsApi::new(db.clone());
        let checkout_api = CheckoutApi::new(db.clone(), provider.clone()).with_currency(config.currency.as_str());
        let jwt_signer = TokenIssuer::new(&config.auth);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("bistro::access_log"))
            .app_data(json_config())
            .app_data(path_config())
            .app_data(query_config())
            .app_data(web::Data::new(auth_api))
            .app_data(web::Data::new(accounts_api))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(cart_api))
            .app_data(web::Data::new(stats_api))
            .app_data(web::Data::new(checkout_api))
            .app_data(web::Data::new(jwt_signer))
            .service(index)
            .service(health)
            .service(issue_token)
            .service(RegisterUserRoute::<SqliteDatabase>::new())
            .service(UsersRoute::<SqliteDatabase>::new())
            .service(DeleteUserRoute::<SqliteDatabase>::new())
            .service(CheckAdminRoute::<SqliteDatabase>::new())
            .service(PromoteUserRoute::<SqliteDatabase>::new())
            .service(MenuRoute::<SqliteDatabase>::new())
            .service(MenuItemRoute::<SqliteDatabase>::new())
            .service(AddMenuItemRoute::<SqliteDatabase>::new())
            .service(UpdateMenuItemRoute::<SqliteDatabase>::new())
            .service(DeleteMenuItemRoute::<SqliteDatabase>::new())
            .service(ReviewsRoute::<SqliteDatabase>::new())
            .service(AddToCartRoute::<SqliteDatabase>::new())
            .service(CartRoute::<SqliteDatabase>::new())
            .service(RemoveFromCartRoute::<SqliteDatabase>::new())
            .service(CreatePaymentIntentRoute::<SqliteDatabase, StripePaymentProvider>::new())
            .service(CheckoutRoute::<SqliteDatabase, StripePaymentProvider>::new())
            .service(PaymentHistoryRoute::<SqliteDatabase, StripePaymentProvider>::new())
            .service(ReconcileRoute::<SqliteDatabase, StripePaymentProvider>::new())
            .service(AdminStatsRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Malformed JSON bodies are answered with the same `{ "error": ... }` schema as every other rejection.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!("💻️ Rejecting request with bad JSON body. {err}");
        ServerError::InvalidRequestBody(err.to_string()).into()
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        ServerError::InvalidRequestPath(err.to_string()).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        ServerError::InvalidRequestBody(err.to_string()).into()
    })
}
