use std::sync::Arc;

use bistro_common::Cents;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client,
    Method,
};
use serde::de::DeserializeOwned;

use crate::{
    config::StripeConfig,
    data_objects::{PaymentIntent, StripeErrorBody},
    StripeApiError,
};

#[derive(Clone)]
pub struct StripeApi {
    config: StripeConfig,
    client: Arc<Client>,
}

impl StripeApi {
    pub fn new(config: StripeConfig) -> Result<Self, StripeApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        let mut val = HeaderValue::from_str(&format!("Bearer {}", config.secret_key.reveal()))
            .map_err(|e| StripeApiError::Initialization(e.to_string()))?;
        val.set_sensitive(true);
        headers.insert(AUTHORIZATION, val);
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| StripeApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Sends a form-encoded request to the Stripe API. Stripe only accepts `application/x-www-form-urlencoded`
    /// bodies, with array values expressed as repeated `key[]` entries.
    pub async fn rest_query<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<T, StripeApiError> {
        let url = self.url(path);
        trace!("Sending Stripe request: {method} {url}");
        let mut req = self.client.request(method, url);
        if !form.is_empty() {
            req = req.form(form);
        }
        let response = req.send().await.map_err(|e| StripeApiError::RestResponseError(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            trace!("Stripe request successful. {status}");
            response.json::<T>().await.map_err(|e| StripeApiError::JsonError(e.to_string()))
        } else {
            let body = response.text().await.map_err(|e| StripeApiError::RestResponseError(e.to_string()))?;
            let message = match serde_json::from_str::<StripeErrorBody>(&body) {
                Ok(err) => err.error.describe(),
                Err(_) => body,
            };
            Err(StripeApiError::QueryError { status: status.as_u16(), message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/v1{path}", self.config.api_url.trim_end_matches('/'))
    }

    /// Creates a PaymentIntent for `amount` (in the currency's minor unit). Only card payments are enabled.
    pub async fn create_payment_intent(&self, amount: Cents, currency: &str) -> Result<PaymentIntent, StripeApiError> {
        let form = [
            ("amount", amount.value().to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];
        debug!("Creating payment intent for {amount} {currency}");
        let intent = self.rest_query::<PaymentIntent>(Method::POST, "/payment_intents", &form).await?;
        if intent.client_secret.is_none() {
            return Err(StripeApiError::MissingClientSecret(intent.id));
        }
        info!("Created payment intent {} for {amount} {currency}", intent.id);
        Ok(intent)
    }
}
