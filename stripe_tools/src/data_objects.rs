use bistro_common::Cents;
use serde::{Deserialize, Serialize};

/// The subset of the Stripe `PaymentIntent` object that the checkout flow relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub amount: Cents,
    pub currency: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub status: String,
}

/// Stripe wraps every failure in `{"error": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorBody {
    pub error: StripeErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorDetail {
    #[serde(rename = "type", default)]
    pub error_type: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl StripeErrorDetail {
    pub fn describe(&self) -> String {
        match &self.code {
            Some(code) => format!("{} ({}: {})", self.message, self.error_type, code),
            None => format!("{} ({})", self.message, self.error_type),
        }
    }
}
