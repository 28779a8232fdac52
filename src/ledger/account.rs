//! Account shapes.
//!
//! A regular account is always DKK. A pocket account holds sub-balances in
//! any other currency, at most one per currency. `AccountRecord` is the flat
//! shape delivered by the account-refresh collaborator and is only turned
//! into an `Account` through `TryFrom`, which is where both rules are checked.

use super::{Currency, PocketCurrency, ValidationError};
use log::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Distinguishes the two account variants.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Regular,
    Pocket,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Regular => "regular",
            AccountKind::Pocket => "pocket",
        }
    }
}

/// A non-DKK sub-balance inside a pocket account.
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pocket {
    pub amount: f64,
    pub currency: PocketCurrency,
}

impl Pocket {
    /// Return a pocket for the given currency or a `ValidationError` if it is DKK.
    ///
    pub fn new(amount: f64, currency: Currency) -> Result<Self, ValidationError> {
        Ok(Pocket {
            amount,
            currency: PocketCurrency::try_from(currency)?,
        })
    }
}

/// A single-balance account denominated in DKK.
///
#[derive(Debug, Clone, PartialEq)]
pub struct RegularAccount {
    pub name: String,
    pub iban: String,
    pub amount: f64,
}

impl RegularAccount {
    pub fn new(name: impl Into<String>, iban: impl Into<String>, amount: f64) -> Self {
        RegularAccount {
            name: name.into(),
            iban: iban.into(),
            amount,
        }
    }

    /// Regular accounts are only ever DKK.
    ///
    pub fn currency(&self) -> Currency {
        Currency::Dkk
    }
}

/// A multi-currency account made of pockets.
///
#[derive(Debug, Clone, PartialEq)]
pub struct PocketAccount {
    pub name: String,
    pub iban: String,
    pockets: Vec<Pocket>,
}

impl PocketAccount {
    /// Return a pocket account, rejecting more than one pocket per currency.
    /// Pocket order is kept as given.
    ///
    pub fn new(
        name: impl Into<String>,
        iban: impl Into<String>,
        pockets: Vec<Pocket>,
    ) -> Result<Self, ValidationError> {
        let iban = iban.into();
        let mut seen = HashSet::new();
        for pocket in &pockets {
            if !seen.insert(pocket.currency) {
                return Err(ValidationError::DuplicatePocket {
                    iban,
                    currency: pocket.currency.into(),
                });
            }
        }
        Ok(PocketAccount {
            name: name.into(),
            iban,
            pockets,
        })
    }

    pub fn pockets(&self) -> &[Pocket] {
        &self.pockets
    }

    /// Return the pocket held in the given currency, if any.
    ///
    pub fn pocket(&self, currency: PocketCurrency) -> Option<&Pocket> {
        self.pockets.iter().find(|pocket| pocket.currency == currency)
    }
}

/// Either account variant.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AccountRecord", into = "AccountRecord")]
pub enum Account {
    Regular(RegularAccount),
    Pocket(PocketAccount),
}

impl Account {
    pub fn name(&self) -> &str {
        match self {
            Account::Regular(account) => &account.name,
            Account::Pocket(account) => &account.name,
        }
    }

    pub fn iban(&self) -> &str {
        match self {
            Account::Regular(account) => &account.iban,
            Account::Pocket(account) => &account.iban,
        }
    }

    pub fn kind(&self) -> AccountKind {
        match self {
            Account::Regular(_) => AccountKind::Regular,
            Account::Pocket(_) => AccountKind::Pocket,
        }
    }

    /// Return the balance this account holds in the given currency.
    ///
    pub fn balance_in(&self, currency: Currency) -> f64 {
        match self {
            Account::Regular(account) if account.currency() == currency => account.amount,
            Account::Regular(_) => 0.0,
            Account::Pocket(account) => match PocketCurrency::try_from(currency) {
                Ok(currency) => account.pocket(currency).map_or(0.0, |p| p.amount),
                Err(_) => 0.0,
            },
        }
    }
}

/// Flat sub-balance as delivered by the refresh collaborator.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PocketRecord {
    pub amount: f64,
    pub currency: Currency,
}

/// Flat, unvalidated account as delivered by the refresh collaborator.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    #[serde(rename = "type")]
    pub kind: AccountKind,
    pub name: String,
    pub iban: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pockets: Option<Vec<PocketRecord>>,
}

impl TryFrom<AccountRecord> for Account {
    type Error = ValidationError;

    fn try_from(record: AccountRecord) -> Result<Self, Self::Error> {
        match record.kind {
            AccountKind::Regular => {
                let currency = record.currency.unwrap_or(Currency::Dkk);
                if currency != Currency::Dkk {
                    return Err(ValidationError::RegularCurrency {
                        iban: record.iban,
                        currency,
                    });
                }
                let amount = match record.amount {
                    Some(amount) => amount,
                    None => return Err(ValidationError::MissingAmount { iban: record.iban }),
                };
                if record.pockets.is_some() {
                    warn!("Ignoring pockets on regular account {}.", record.iban);
                }
                Ok(Account::Regular(RegularAccount::new(
                    record.name,
                    record.iban,
                    amount,
                )))
            }
            AccountKind::Pocket => {
                if record.currency.is_some() || record.amount.is_some() {
                    warn!(
                        "Ignoring currency and amount on pocket account {}.",
                        record.iban
                    );
                }
                let pockets = record
                    .pockets
                    .unwrap_or_default()
                    .into_iter()
                    .map(|pocket| Pocket::new(pocket.amount, pocket.currency))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Account::Pocket(PocketAccount::new(
                    record.name,
                    record.iban,
                    pockets,
                )?))
            }
        }
    }
}

impl From<Account> for AccountRecord {
    fn from(account: Account) -> Self {
        match account {
            Account::Regular(account) => AccountRecord {
                kind: AccountKind::Regular,
                currency: Some(account.currency()),
                name: account.name,
                iban: account.iban,
                amount: Some(account.amount),
                pockets: None,
            },
            Account::Pocket(account) => AccountRecord {
                kind: AccountKind::Pocket,
                name: account.name,
                iban: account.iban,
                currency: None,
                amount: None,
                pockets: Some(
                    account
                        .pockets
                        .into_iter()
                        .map(|pocket| PocketRecord {
                            amount: pocket.amount,
                            currency: pocket.currency.into(),
                        })
                        .collect(),
                ),
            },
        }
    }
}
