//! Currency types.
//!
//! `Currency` is the full supported set. `PocketCurrency` is the same set
//! without DKK, so a pocket denominated in DKK cannot be expressed at all.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported currencies.
///
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Dkk,
    Sek,
    Nok,
    Usd,
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Dkk,
        Currency::Sek,
        Currency::Nok,
        Currency::Usd,
        Currency::Eur,
    ];

    /// Return the ISO 4217 code.
    ///
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Dkk => "DKK",
            Currency::Sek => "SEK",
            Currency::Nok => "NOK",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownCurrency(s.to_string()))
    }
}

/// Currencies a pocket may be denominated in.
///
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PocketCurrency {
    Sek,
    Nok,
    Usd,
    Eur,
}

impl From<PocketCurrency> for Currency {
    fn from(currency: PocketCurrency) -> Self {
        match currency {
            PocketCurrency::Sek => Currency::Sek,
            PocketCurrency::Nok => Currency::Nok,
            PocketCurrency::Usd => Currency::Usd,
            PocketCurrency::Eur => Currency::Eur,
        }
    }
}

impl TryFrom<Currency> for PocketCurrency {
    type Error = ValidationError;

    fn try_from(currency: Currency) -> Result<Self, Self::Error> {
        match currency {
            Currency::Dkk => Err(ValidationError::DkkPocket),
            Currency::Sek => Ok(PocketCurrency::Sek),
            Currency::Nok => Ok(PocketCurrency::Nok),
            Currency::Usd => Ok(PocketCurrency::Usd),
            Currency::Eur => Ok(PocketCurrency::Eur),
        }
    }
}

impl fmt::Display for PocketCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Currency::from(*self).fmt(f)
    }
}
