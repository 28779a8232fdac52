//! Account ledger module.
//!
//! This module holds the currency and account model and the ordered list of
//! accounts the composed state exposes to the UI layer.

mod account;
mod currency;
mod error;

pub use account::{
    Account, AccountKind, AccountRecord, Pocket, PocketAccount, PocketRecord, RegularAccount,
};
pub use currency::{Currency, PocketCurrency};
pub use error::ValidationError;

use log::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Ordered list of accounts, in the order the data source provided them.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    accounts: Vec<Account>,
}

impl Ledger {
    pub fn new(accounts: Vec<Account>) -> Self {
        Ledger { accounts }
    }

    /// Validate raw records from the refresh collaborator. The first invalid
    /// record rejects the whole payload.
    ///
    pub fn from_records(records: Vec<AccountRecord>) -> Result<Self, ValidationError> {
        let accounts = records
            .into_iter()
            .map(Account::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        check_unique_ibans(&accounts)?;
        Ok(Ledger { accounts })
    }

    /// Return the ledger that results from a refresh with the given accounts.
    /// Amounts may change freely; an IBAN may not switch between regular and
    /// pocket, nor appear twice in the incoming ledger.
    ///
    pub fn refresh(&self, incoming: Ledger) -> Result<Self, ValidationError> {
        check_unique_ibans(&incoming.accounts)?;
        let known: HashMap<&str, AccountKind> = self
            .accounts
            .iter()
            .map(|account| (account.iban(), account.kind()))
            .collect();
        for account in &incoming.accounts {
            if let Some(previous) = known.get(account.iban()) {
                if *previous != account.kind() {
                    return Err(ValidationError::KindChanged {
                        iban: account.iban().to_string(),
                        from: previous.as_str(),
                        to: account.kind().as_str(),
                    });
                }
            }
        }
        debug!("Refreshed ledger with {} accounts.", incoming.len());
        Ok(incoming)
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Return the account with the given IBAN.
    ///
    pub fn find(&self, iban: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.iban() == iban)
    }

    /// Sum of every balance held in the given currency.
    ///
    pub fn balance_in(&self, currency: Currency) -> f64 {
        self.accounts
            .iter()
            .map(|account| account.balance_in(currency))
            .sum()
    }
}

fn check_unique_ibans(accounts: &[Account]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(accounts.len());
    match accounts.iter().find(|account| !seen.insert(account.iban())) {
        Some(account) => Err(ValidationError::DuplicateIban {
            iban: account.iban().to_string(),
        }),
        None => Ok(()),
    }
}
