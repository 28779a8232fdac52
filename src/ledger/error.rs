//! Ledger-specific error types.

use super::Currency;

/// Errors raised while constructing or accepting account data.
///
/// These are rejected at the boundary and never reach the composed state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A pocket was denominated in DKK
    #[error("Pocket may not be denominated in DKK")]
    DkkPocket,

    /// A regular account was denominated in something other than DKK
    #[error("Regular account {iban} must be denominated in DKK, got {currency}")]
    RegularCurrency { iban: String, currency: Currency },

    /// A pocket account holds two pockets in the same currency
    #[error("Pocket account {iban} holds more than one {currency} pocket")]
    DuplicatePocket { iban: String, currency: Currency },

    /// A regular account record arrived without an amount
    #[error("Regular account {iban} is missing an amount")]
    MissingAmount { iban: String },

    /// Two accounts in one payload share an IBAN
    #[error("Account {iban} appears more than once in one payload")]
    DuplicateIban { iban: String },

    /// An account changed between regular and pocket across a refresh
    #[error("Account {iban} changed kind from {from} to {to}")]
    KindChanged {
        iban: String,
        from: &'static str,
        to: &'static str,
    },

    /// Currency code outside the supported set
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}
