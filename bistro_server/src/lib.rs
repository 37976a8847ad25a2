//! # Bistro server
//! The HTTP front end of the Bistro ordering backend. It is responsible for:
//! * Issuing access tokens, and guarding privileged routes with them ([`mod@auth`], [`mod@middleware`]).
//! * Translating HTTP requests into calls on the `bistro_engine` APIs ([`mod@routes`]).
//! * Wiring the engine to SQLite and Stripe at start-up ([`mod@server`]).
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! Public: `/`, `/health`, `POST /jwt`, `POST /users`, `GET /menu`, `GET /menu/{id}`, `GET /reviews`, `POST /carts`,
//! `GET /carts`, `POST /create-payment-intent`, `POST /payments`.
//!
//! Authenticated: `GET /users/admin/{email}` and `GET /payments` (both only for the token holder's own email),
//! `DELETE /cart/{id}`.
//!
//! Admin: `GET /users`, `DELETE /users/{id}`, `PATCH /users/admin/{id}`, `POST /menu`, `PATCH /menu/{id}`,
//! `DELETE /menu/{id}`, `GET /admin-stats`, `POST /admin/settlements/reconcile`.

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
