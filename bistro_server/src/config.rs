use std::{env, time::Duration};

use bistro_common::{Secret, DEFAULT_CURRENCY_CODE};
use log::*;
use stripe_tools::StripeConfig;

use crate::errors::ServerError;

const DEFAULT_BISTRO_HOST: &str = "127.0.0.1";
const DEFAULT_BISTRO_PORT: u16 = 7001;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/bistro.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 25;
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(60 * 60);
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub auth: AuthConfig,
    /// The currency that payment intents are created in.
    pub currency: String,
    pub stripe: StripeConfig,
}

impl ServerConfig {
    pub fn new(host: &str, port: u16, auth: AuthConfig) -> Self {
        Self {
            host: host.to_string(),
            port,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            auth,
            currency: DEFAULT_CURRENCY_CODE.to_string(),
            stripe: StripeConfig::default(),
        }
    }

    /// Reads the configuration from `BISTRO_*` environment variables. Invalid values are logged and replaced with
    /// their defaults. The only fatal omission is the JWT signing secret, since tokens could not be issued without it.
    pub fn from_env() -> Result<Self, ServerError> {
        let host = env::var("BISTRO_HOST").ok().unwrap_or_else(|| DEFAULT_BISTRO_HOST.into());
        let port = env::var("BISTRO_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for BISTRO_PORT. {e} Using the default, {DEFAULT_BISTRO_PORT}, \
                         instead."
                    );
                    DEFAULT_BISTRO_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_BISTRO_PORT);
        let database_url = env::var("BISTRO_DATABASE_URL").ok().unwrap_or_else(|| {
            info!("🪛️ BISTRO_DATABASE_URL is not set. Using {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let max_connections = env::var("BISTRO_DB_MAX_CONNECTIONS")
            .map_err(|_| trace!("🪛️ BISTRO_DB_MAX_CONNECTIONS is not set. Using {DEFAULT_MAX_CONNECTIONS}."))
            .and_then(|s| {
                s.parse::<u32>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for BISTRO_DB_MAX_CONNECTIONS. {e}"))
            })
            .ok()
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let currency = env::var("BISTRO_PAYMENT_CURRENCY")
            .ok()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY_CODE.to_string());
        let auth = AuthConfig::try_from_env()?;
        let stripe = StripeConfig::new_from_env_or_default();
        Ok(Self { host, port, database_url, max_connections, auth, currency, stripe })
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The HMAC secret used to sign and verify access tokens (HS256).
    pub jwt_secret: Secret<String>,
    /// How long an issued access token stays valid.
    pub token_lifetime: Duration,
}

impl AuthConfig {
    pub fn new<S: Into<String>>(jwt_secret: S) -> Self {
        Self { jwt_secret: Secret::new(jwt_secret.into()), token_lifetime: DEFAULT_TOKEN_LIFETIME }
    }

    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    pub fn try_from_env() -> Result<Self, ServerError> {
        let secret = env::var("BISTRO_JWT_SECRET")
            .map_err(|e| ServerError::ConfigurationError(format!("{e} [BISTRO_JWT_SECRET]")))?;
        if secret.trim().is_empty() {
            return Err(ServerError::ConfigurationError("BISTRO_JWT_SECRET is empty".to_string()));
        }
        let token_lifetime = env::var("BISTRO_JWT_LIFETIME")
            .map_err(|_| {
                info!(
                    "🪛️ BISTRO_JWT_LIFETIME is not set. Access tokens will be valid for {} seconds.",
                    DEFAULT_TOKEN_LIFETIME.as_secs()
                )
            })
            .and_then(|s| parse_token_lifetime(&s))
            .ok()
            .unwrap_or(DEFAULT_TOKEN_LIFETIME);
        Ok(Self::new(secret).with_token_lifetime(token_lifetime))
    }
}

/// Token lifetimes are whole seconds, at most one year.
fn parse_token_lifetime(value: &str) -> Result<Duration, ()> {
    let lifetime = value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| warn!("🪛️ Invalid configuration value for BISTRO_JWT_LIFETIME. {e}"))?;
    if lifetime > MAX_TOKEN_LIFETIME {
        warn!(
            "🪛️ BISTRO_JWT_LIFETIME of {value} seconds is longer than the maximum of {} seconds. Using the default.",
            MAX_TOKEN_LIFETIME.as_secs()
        );
        return Err(());
    }
    Ok(lifetime)
}
