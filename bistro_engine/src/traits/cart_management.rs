use thiserror::Error;

use crate::{
    db_types::{CartEntry, NewCartEntry},
    traits::DeleteResult,
};

#[derive(Debug, Clone, Error)]
pub enum CartApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for CartApiError {
    fn from(e: sqlx::Error) -> Self {
        CartApiError::DatabaseError(e.to_string())
    }
}

/// The `CartManagement` trait defines behaviour for managing principals' shopping carts.
///
/// Cart entries are removed in bulk at checkout by [`crate::traits::PaymentGatewayDatabase::purge_cart_entries`].
#[allow(async_fn_in_trait)]
pub trait CartManagement {
    /// Adds an entry to a cart and returns the id of the new entry.
    async fn insert_cart_entry(&self, entry: NewCartEntry) -> Result<i64, CartApiError>;

    async fn fetch_cart_for_email(&self, email: &str) -> Result<Vec<CartEntry>, CartApiError>;

    async fn delete_cart_entry(&self, id: i64) -> Result<DeleteResult, CartApiError>;
}
