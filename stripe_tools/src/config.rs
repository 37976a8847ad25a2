use bistro_common::Secret;
use log::*;

pub const DEFAULT_STRIPE_API_URL: &str = "https://api.stripe.com";

#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Base URL of the Stripe API, without the version segment. Overridable so that tests can point at a stub.
    pub api_url: String,
    pub secret_key: Secret<String>,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self { api_url: DEFAULT_STRIPE_API_URL.to_string(), secret_key: Secret::default() }
    }
}

impl StripeConfig {
    pub fn new<S: Into<String>>(secret_key: S) -> Self {
        Self { secret_key: Secret::new(secret_key.into()), ..Default::default() }
    }

    pub fn with_api_url<S: Into<String>>(mut self, api_url: S) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn new_from_env_or_default() -> Self {
        let api_url = std::env::var("BISTRO_STRIPE_API_URL").unwrap_or_else(|_| {
            debug!("BISTRO_STRIPE_API_URL not set, using {DEFAULT_STRIPE_API_URL}");
            DEFAULT_STRIPE_API_URL.to_string()
        });
        let secret_key = Secret::new(std::env::var("BISTRO_STRIPE_SECRET_KEY").unwrap_or_else(|_| {
            warn!("BISTRO_STRIPE_SECRET_KEY not set. Payment intents will be rejected by Stripe.");
            String::default()
        }));
        Self { api_url, secret_key }
    }
}
