//! Bistro Engine
//!
//! The core of the Bistro restaurant ordering backend. It holds everything that does not depend on HTTP: the data
//! types, the storage backend contracts, an SQLite implementation of those contracts, and the public APIs that the
//! server calls into.
//!
//! The library is divided into three main sections:
//! 1. Backend contracts ([`mod@traits`]). Each concern (roles, accounts, catalog, carts, payments, reporting, and the
//!    card payment provider) is a separate trait, so that each API only depends on what it uses.
//! 2. The SQLite backend ([`SqliteDatabase`]). You should never need to access the database directly. Instead, use the
//!    public API. The exception is the data types stored in the database, which live in [`mod@db_types`].
//! 3. The public API ([`AuthApi`], [`AccountApi`], [`CatalogApi`], [`CartApi`], [`CheckoutApi`] and [`StatsApi`]).
//!    The checkout flow in [`CheckoutApi`] is where the interesting logic lives.
mod bistro_api;

pub mod db_types;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use bistro_api::{
    accounts_api::AccountApi,
    auth_api::AuthApi,
    cart_api::CartApi,
    catalog_api::CatalogApi,
    checkout_api::CheckoutApi,
    checkout_objects,
    errors::CheckoutError,
    stats_api::StatsApi,
};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
