//! # Storage backend contracts
//!
//! This module defines the behaviour that a storage backend needs to expose in order to be used by the Bistro engine.
//! Each concern has its own trait, so that the public APIs in [`crate::bistro_api`] only demand what they use, and so
//! that the server can substitute mocks for any one of them in tests.
//!
//! * [`AuthManagement`] resolves and changes principals' roles.
//! * [`AccountManagement`] registers, lists and removes principals.
//! * [`CatalogManagement`] manages the menu and reads reviews.
//! * [`CartManagement`] adds, lists and removes cart entries.
//! * [`PaymentGatewayDatabase`] records payments and purges the cart entries they settle.
//! * [`ReportingManagement`] computes the aggregate statistics for the admin dashboard.
//! * [`PaymentProvider`] is not a storage concern. It abstracts the card payment processor.
mod account_management;
mod auth_management;
mod cart_management;
mod catalog_management;
mod payment_gateway_database;
mod payment_provider;
mod reporting_management;

mod data_objects;

pub use account_management::{AccountApiError, AccountManagement};
pub use auth_management::{AuthApiError, AuthManagement};
pub use cart_management::{CartApiError, CartManagement};
pub use catalog_management::{CatalogApiError, CatalogManagement};
pub use data_objects::{
    CartOwner,
    DeleteResult,
    InsertResult,
    InsertUserResult,
    PaymentIntentHandle,
    Stats,
    UpdateResult,
};
pub use payment_gateway_database::{PaymentGatewayDatabase, PaymentGatewayError};
pub use payment_provider::{PaymentProvider, PaymentProviderError};
pub use reporting_management::{ReportingError, ReportingManagement};
