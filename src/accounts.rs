use std::collections::HashMap;
use std::sync::Arc;

use derive_builder::Builder;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::amounts::{is_positive, Figure};
use crate::bank::BankServices;
use crate::confirmation_code::{ConfirmationCode, TransactionType};
use crate::errors::LedgerError;
use crate::timezone::TimeZone;
use crate::vault::VaultReadable;

pub type AccountNumber = u64;

pub fn parse_account_number(raw: &str) -> Result<AccountNumber, LedgerError> {
    raw.trim().parse().map_err(|_| {
        LedgerError::InvalidAccountNumber(format!("'{}' is not a non-negative integer", raw))
    })
}

fn validate_name(field: &str, name: &str) -> Result<(), LedgerError> {
    if name.trim().is_empty() {
        return Err(LedgerError::InvalidName(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// A single bank account.
///
/// The balance only moves through [`Account::deposit`], [`Account::withdraw`]
/// and [`Account::pay_interest`]. Each of them draws a sequence id from the
/// shared [`BankServices`] and keeps the resulting confirmation code as the
/// account's last one.
#[derive(Builder, Debug)]
#[builder(
    pattern = "owned",
    build_fn(validate = "Self::validate", error = "LedgerError")
)]
pub struct Account {
    account_number: AccountNumber,
    #[builder(setter(into))]
    first_name: String,
    #[builder(setter(into))]
    last_name: String,
    #[builder(default = "Arc::new(TimeZone::utc())")]
    timezone: Arc<TimeZone>,
    #[builder(default)]
    balance: Figure,
    #[builder(setter(skip))]
    last_confirmation_code: Option<String>,
    bank: Arc<BankServices>,
}

impl AccountBuilder {
    fn validate(&self) -> Result<(), LedgerError> {
        if let Some(first_name) = &self.first_name {
            validate_name("First name", first_name)?;
        }
        if let Some(last_name) = &self.last_name {
            validate_name("Last name", last_name)?;
        }
        Ok(())
    }
}

impl Account {
    pub fn account_number(&self) -> AccountNumber {
        self.account_number
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn set_first_name(&mut self, first_name: &str) -> Result<(), LedgerError> {
        validate_name("First name", first_name)?;
        self.first_name = first_name.to_string();
        Ok(())
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn set_last_name(&mut self, last_name: &str) -> Result<(), LedgerError> {
        validate_name("Last name", last_name)?;
        self.last_name = last_name.to_string();
        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }

    pub fn timezone(&self) -> &Arc<TimeZone> {
        &self.timezone
    }

    pub fn set_timezone(&mut self, timezone: Arc<TimeZone>) {
        self.timezone = timezone;
    }

    pub fn balance(&self) -> Figure {
        self.balance
    }

    pub fn interest_rate(&self) -> Figure {
        self.bank.interest_rate().get()
    }

    pub fn last_confirmation_code(&self) -> Option<&str> {
        self.last_confirmation_code.as_deref()
    }

    /// A non-positive deposit is declined rather than refused: it still
    /// consumes a sequence id and leaves an `X` code behind. So does a deposit
    /// the balance cannot hold.
    pub fn deposit(&mut self, amount: Figure) -> String {
        let new_balance = if is_positive(&amount) {
            self.balance.checked_add(amount)
        } else {
            None
        };

        let Some(new_balance) = new_balance else {
            let code = self.record(TransactionType::Declined);
            tracing::warn!(account = self.account_number, %amount, %code, "deposit declined");
            return code;
        };

        let code = self.record(TransactionType::Deposit);
        self.balance = new_balance;
        tracing::info!(account = self.account_number, %amount, balance = %self.balance, %code, "deposit accepted");
        code
    }

    /// Unlike [`Account::deposit`], a non-positive amount is an error here and
    /// no sequence id is consumed. Insufficient funds is a decline.
    pub fn withdraw(&mut self, amount: Figure) -> Result<String, LedgerError> {
        if !is_positive(&amount) {
            return Err(LedgerError::InvalidAmount(format!(
                "Withdrawal amount must be positive, got {}",
                amount
            )));
        }

        let new_balance = match self.balance.checked_sub(amount) {
            Some(new_balance) if new_balance >= Decimal::ZERO => new_balance,
            _ => {
                let code = self.record(TransactionType::Declined);
                tracing::warn!(account = self.account_number, %amount, balance = %self.balance, %code, "withdrawal declined: insufficient funds");
                return Ok(code);
            }
        };

        let code = self.record(TransactionType::Withdrawal);
        self.balance = new_balance;
        tracing::info!(account = self.account_number, %amount, balance = %self.balance, %code, "withdrawal accepted");
        Ok(code)
    }

    /// Interest that would overflow the balance is declined with an `X` code.
    pub fn pay_interest(&mut self) -> String {
        let rate = self.bank.interest_rate().get();
        let paid = self
            .balance
            .checked_mul(rate)
            .and_then(|interest| Some((interest, self.balance.checked_add(interest)?)));

        let Some((interest, new_balance)) = paid else {
            let code = self.record(TransactionType::Declined);
            tracing::warn!(account = self.account_number, %rate, balance = %self.balance, %code, "interest declined: balance overflow");
            return code;
        };

        let code = self.record(TransactionType::Interest);
        self.balance = new_balance;
        tracing::info!(account = self.account_number, %interest, balance = %self.balance, %code, "interest paid");
        code
    }

    /// Decodes a confirmation code in this account's timezone.
    pub fn parse_confirmation_code(&self, code: &str) -> Result<ConfirmationCode, LedgerError> {
        ConfirmationCode::parse(code, Arc::clone(&self.timezone))
    }

    fn record(&mut self, transaction_type: TransactionType) -> String {
        let code = self
            .bank
            .issue_confirmation_code(transaction_type, self.account_number);
        self.last_confirmation_code = Some(code.clone());
        code
    }
}

#[derive(Deserialize)]
pub struct AccountVaultValue {
    account_number: AccountNumber,
    first_name: String,
    last_name: String,
    timezone: Option<String>,
    #[serde(default)]
    balance: Figure,
}

impl AccountVaultValue {
    pub fn into_account(
        self,
        timezones: &HashMap<String, Arc<TimeZone>>,
        bank: &Arc<BankServices>,
    ) -> Result<Account, LedgerError> {
        let mut builder = AccountBuilder::default()
            .account_number(self.account_number)
            .first_name(self.first_name)
            .last_name(self.last_name)
            .balance(self.balance)
            .bank(Arc::clone(bank));

        if let Some(name) = self.timezone {
            let timezone = timezones
                .get(&name)
                .ok_or(LedgerError::UnknownTimezone(name))?;
            builder = builder.timezone(Arc::clone(timezone));
        }

        builder.build()
    }
}

pub type AccountsVaultValue = Option<Vec<AccountVaultValue>>;
impl VaultReadable for AccountsVaultValue {
    const KEY: &'static str = "accounts";
}
