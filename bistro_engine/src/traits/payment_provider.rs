use bistro_common::Cents;
use thiserror::Error;

use crate::traits::PaymentIntentHandle;

#[derive(Debug, Clone, Error)]
pub enum PaymentProviderError {
    #[error("The payment provider rejected the request. {0}")]
    Rejected(String),
    #[error("Could not reach the payment provider. {0}")]
    Unavailable(String),
}

/// A card payment processor that can create confirmable payment handles. The browser completes the payment itself
/// using the handle's client secret.
#[allow(async_fn_in_trait)]
pub trait PaymentProvider {
    /// Requests a payment handle for `amount`, expressed in the minor unit of `currency`.
    async fn create_payment_intent(
        &self,
        amount: Cents,
        currency: &str,
    ) -> Result<PaymentIntentHandle, PaymentProviderError>;
}
