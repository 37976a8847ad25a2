use bistro_common::Cents;
use bistro_engine::traits::{PaymentIntentHandle, PaymentProvider, PaymentProviderError};
use log::*;
use stripe_tools::{StripeApi, StripeApiError, StripeConfig};

/// Connects the checkout flow to Stripe. Stripe's own refusals (bad amounts, bad keys) are reported as
/// [`PaymentProviderError::Rejected`]; anything that stopped us from getting an answer is
/// [`PaymentProviderError::Unavailable`].
#[derive(Clone)]
pub struct StripePaymentProvider {
    api: StripeApi,
}

impl StripePaymentProvider {
    pub fn new(config: StripeConfig) -> Result<Self, StripeApiError> {
        let api = StripeApi::new(config)?;
        Ok(Self { api })
    }
}

impl From<StripeApi> for StripePaymentProvider {
    fn from(api: StripeApi) -> Self {
        Self { api }
    }
}

impl PaymentProvider for StripePaymentProvider {
    async fn create_payment_intent(
        &self,
        amount: Cents,
        currency: &str,
    ) -> Result<PaymentIntentHandle, PaymentProviderError> {
        let intent = self.api.create_payment_intent(amount, currency).await.map_err(|e| {
            warn!("💳️ Stripe could not create a payment intent for {amount} {currency}. {e}");
            provider_error(e)
        })?;
        let client_secret = intent.client_secret.ok_or_else(|| {
            PaymentProviderError::Unavailable(format!("No client secret was returned for {}", intent.id))
        })?;
        Ok(PaymentIntentHandle { id: intent.id, client_secret, amount: intent.amount, currency: intent.currency })
    }
}

fn provider_error(e: StripeApiError) -> PaymentProviderError {
    match e {
        StripeApiError::QueryError { message, .. } => PaymentProviderError::Rejected(message),
        e => PaymentProviderError::Unavailable(e.to_string()),
    }
}
