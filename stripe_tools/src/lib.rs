//! A deliberately small client for the parts of the Stripe REST API the Bistro backend needs: creating
//! PaymentIntents whose client secret is handed to the browser so it can confirm the card payment itself.
mod api;
mod config;
mod error;

mod data_objects;

pub use api::StripeApi;
pub use config::StripeConfig;
pub use data_objects::{PaymentIntent, StripeErrorBody, StripeErrorDetail};
pub use error::StripeApiError;
