use thiserror::Error;

use crate::{
    db_types::{NewPayment, Payment},
    traits::{CartOwner, DeleteResult},
};

#[derive(Debug, Clone, Error)]
pub enum PaymentGatewayError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Payment #{0} does not exist")]
    PaymentNotFound(i64),
    #[error("Could not encode the payment record. {0}")]
    EncodingError(String),
}

impl From<sqlx::Error> for PaymentGatewayError {
    fn from(e: sqlx::Error) -> Self {
        PaymentGatewayError::DatabaseError(e.to_string())
    }
}

/// This trait defines the storage behaviour that checkout relies on.
///
/// Checkout touches two collections: payments and carts. Backends are not required to make the two operations atomic,
/// so every payment carries a settlement marker. A payment is written as `Pending`, the cart entries it pays for are
/// purged, and only then is it marked `Settled`. Pending payments can be found again and their purge retried.
#[allow(async_fn_in_trait)]
pub trait PaymentGatewayDatabase: Clone {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Fetches the owners of those cart entries in `ids` that still exist. Unknown ids are ignored.
    async fn fetch_cart_owners(&self, ids: &[i64]) -> Result<Vec<CartOwner>, PaymentGatewayError>;

    /// Stores the payment with a `Pending` settlement status. This call is idempotent on the transaction id: if a
    /// payment with the same transaction id already exists, it is returned unchanged.
    ///
    /// Returns the payment record, and `true` if it was inserted, or `false` if it already existed.
    async fn insert_payment(&self, payment: NewPayment) -> Result<(Payment, bool), PaymentGatewayError>;

    /// Deletes the cart entries in `ids` that belong to `email`. Entries belonging to anyone else are never touched.
    async fn purge_cart_entries(&self, email: &str, ids: &[i64]) -> Result<DeleteResult, PaymentGatewayError>;

    /// Marks the payment as `Settled` and returns the updated record.
    async fn mark_payment_settled(&self, payment_id: i64) -> Result<Payment, PaymentGatewayError>;

    /// Fetches every payment whose cart purge has not been confirmed yet.
    async fn fetch_pending_payments(&self) -> Result<Vec<Payment>, PaymentGatewayError>;

    async fn fetch_payments_for_email(&self, email: &str) -> Result<Vec<Payment>, PaymentGatewayError>;
}
