//! # Bistro engine public API
//!
//! The `bistro_api` module exposes the programmatic API for the Bistro engine.
//! The API is modular, so that clients of the API can pick and choose the functionality they want.
//!
//! * [`auth_api`] resolves roles, and is what the admin guard consults.
//! * [`accounts_api`] registers and manages principals.
//! * [`catalog_api`] provides the menu and reviews.
//! * [`cart_api`] manages shopping carts.
//! * [`checkout_api`] creates payment intents and settles completed payments against carts.
//! * [`stats_api`] produces the admin dashboard figures.
//!
//! # API usage
//!
//! The pattern for using all the APIs is the same. An API instance is created by supplying a backend that
//! implements the specific backend traits required by the API.
//!
//! ```rust,ignore
//! use bistro_engine::{AuthApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/bistro.db", 5).await?;
//! // SqliteDatabase implements AuthManagement
//! let api = AuthApi::new(db);
//! let is_admin = api.is_admin("alice@example.com").await?;
//! ```
pub mod accounts_api;
pub mod auth_api;
pub mod cart_api;
pub mod catalog_api;
pub mod checkout_api;
pub mod checkout_objects;
pub mod errors;
pub mod stats_api;
