use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CURRENCY_CODE: &str = "usd";

//--------------------------------------        Cents        ---------------------------------------------------------
/// An amount in the minor unit of a currency (cents for USD). Payment providers only accept integer minor-unit
/// amounts, so prices are converted to `Cents` at the provider boundary.
#[derive(Debug, Clone, Copy, Default, Ord, PartialOrd, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(i64);

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in cents: {0}")]
pub struct CentsConversionError(String);

impl From<i64> for Cents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Cents {
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Converts a major-unit price (e.g. dollars) into cents. Fractions of a cent are truncated, so
    /// `42.509` becomes `4250`. Negative, infinite and NaN prices are rejected.
    pub fn from_price_truncated(price: f64) -> Result<Self, CentsConversionError> {
        if !price.is_finite() {
            return Err(CentsConversionError(format!("{price} is not a finite number")));
        }
        if price < 0.0 {
            return Err(CentsConversionError(format!("{price} is negative")));
        }
        let cents = (price * 100.0).trunc();
        #[allow(clippy::cast_precision_loss)]
        let upper_bound = i64::MAX as f64;
        if cents >= upper_bound {
            return Err(CentsConversionError(format!("{price} is too large")));
        }
        #[allow(clippy::cast_possible_truncation)]
        let cents = cents as i64;
        Ok(Self(cents))
    }
}
