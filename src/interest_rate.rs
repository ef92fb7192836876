use std::sync::{PoisonError, RwLock};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::amounts::Figure;
use crate::errors::LedgerError;
use crate::vault::VaultReadable;

// Applied as-is to the whole balance: 0.5 pays half the balance
pub const DEFAULT_INTEREST_RATE: Figure = dec!(0.5);

/// The rate shared by every account of a bank.
#[derive(Debug)]
pub struct InterestRate {
    rate: RwLock<Figure>,
}

impl Default for InterestRate {
    fn default() -> Self {
        InterestRate {
            rate: RwLock::new(DEFAULT_INTEREST_RATE),
        }
    }
}

impl InterestRate {
    pub fn new(rate: Figure) -> Result<InterestRate, LedgerError> {
        validate(&rate)?;
        Ok(InterestRate {
            rate: RwLock::new(rate),
        })
    }

    pub fn get(&self) -> Figure {
        *self.rate.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, rate: Figure) -> Result<(), LedgerError> {
        validate(&rate)?;
        let mut current = self.rate.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *current, rate);
        tracing::info!(%previous, %rate, "interest rate changed");
        Ok(())
    }
}

fn validate(rate: &Figure) -> Result<(), LedgerError> {
    if *rate < Decimal::ZERO {
        return Err(LedgerError::InvalidInterestRate(format!(
            "{} is negative",
            rate
        )));
    }
    Ok(())
}

pub fn parse_interest_rate(raw: &str) -> Result<Figure, LedgerError> {
    let rate = Decimal::from_str_exact(raw.trim()).map_err(|_| {
        LedgerError::InvalidInterestRate(format!("'{}' is not a number", raw))
    })?;
    validate(&rate)?;
    Ok(rate)
}

#[derive(Deserialize, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct InterestRateVaultValue(pub Option<Figure>);

impl VaultReadable for InterestRateVaultValue {
    const KEY: &'static str = "interest_rate";
}
