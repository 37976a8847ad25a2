use thiserror::Error;

use crate::traits::{PaymentGatewayError, PaymentProviderError};

#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    #[error("Invalid payment amount. {0}")]
    InvalidAmount(String),
    #[error("Payment provider error. {0}")]
    PaymentProviderError(#[from] PaymentProviderError),
    #[error("Cart entries {0:?} belong to another customer")]
    ForeignCartEntries(Vec<i64>),
    #[error("Transaction {0} has already been recorded for a different checkout")]
    TransactionConflict(String),
    #[error("Payment store failure. {0}")]
    DatabaseError(#[from] PaymentGatewayError),
}
