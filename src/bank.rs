use std::collections::{BTreeMap, HashMap};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::accounts::{Account, AccountBuilder, AccountNumber, AccountsVaultValue};
use crate::clock::{Clock, SystemClock};
use crate::confirmation_code::{encode, ConfirmationCode, TransactionType};
use crate::errors::LedgerError;
use crate::interest_rate::{InterestRate, InterestRateVaultValue};
use crate::timezone::{TimeZone, TimeZonesVaultValue};
use crate::transaction_id::TransactionIdGenerator;
use crate::vault::{Vault, VaultReadable};

/// State shared by every account of a bank: the sequence id counter, the
/// interest rate and the clock transactions are stamped with.
pub struct BankServices {
    transaction_ids: TransactionIdGenerator,
    interest_rate: InterestRate,
    clock: Box<dyn Clock>,
}

impl BankServices {
    pub fn new(interest_rate: InterestRate, clock: Box<dyn Clock>) -> BankServices {
        BankServices {
            transaction_ids: TransactionIdGenerator::default(),
            interest_rate,
            clock,
        }
    }

    pub fn interest_rate(&self) -> &InterestRate {
        &self.interest_rate
    }

    pub fn issue_confirmation_code(
        &self,
        transaction_type: TransactionType,
        account_number: AccountNumber,
    ) -> String {
        let sequence_id = self.transaction_ids.next();
        encode(
            transaction_type,
            account_number,
            &self.clock.now(),
            sequence_id,
        )
    }
}

impl Default for BankServices {
    fn default() -> Self {
        BankServices::new(InterestRate::default(), Box::new(SystemClock))
    }
}

impl Debug for BankServices {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BankServices")
            .field("transaction_ids", &self.transaction_ids)
            .field("interest_rate", &self.interest_rate)
            .finish_non_exhaustive()
    }
}

/// The accounts and timezones known to one ledger run.
pub struct Bank {
    services: Arc<BankServices>,
    timezones: HashMap<String, Arc<TimeZone>>,
    accounts: BTreeMap<AccountNumber, Account>,
}

impl Bank {
    pub fn new(services: BankServices) -> Bank {
        let utc = TimeZone::utc();
        Bank {
            services: Arc::new(services),
            timezones: HashMap::from([(utc.name().to_string(), Arc::new(utc))]),
            accounts: BTreeMap::new(),
        }
    }

    pub fn from_vault_values<V: Vault>(vault: &V, clock: Box<dyn Clock>) -> Result<Bank, LedgerError> {
        let interest_rate = match InterestRateVaultValue::from_vault(vault)?.0 {
            Some(rate) => InterestRate::new(rate)?,
            None => InterestRate::default(),
        };
        let mut bank = Bank::new(BankServices::new(interest_rate, clock));

        for timezone in TimeZonesVaultValue::from_vault(vault)?.unwrap_or_default() {
            bank.add_timezone(timezone);
        }

        for account in AccountsVaultValue::from_vault(vault)?.unwrap_or_default() {
            let account = account.into_account(&bank.timezones, &bank.services)?;
            bank.insert_account(account)?;
        }

        tracing::debug!(
            timezones = bank.timezones.len(),
            accounts = bank.accounts.len(),
            "bank loaded from vault"
        );
        Ok(bank)
    }

    pub fn services(&self) -> &Arc<BankServices> {
        &self.services
    }

    pub fn add_timezone(&mut self, timezone: TimeZone) {
        self.timezones
            .insert(timezone.name().to_string(), Arc::new(timezone));
    }

    pub fn timezone(&self, name: &str) -> Result<Arc<TimeZone>, LedgerError> {
        self.timezones
            .get(name.trim())
            .cloned()
            .ok_or_else(|| LedgerError::UnknownTimezone(name.to_string()))
    }

    pub fn open_account(
        &mut self,
        account_number: AccountNumber,
        first_name: &str,
        last_name: &str,
        timezone: Option<&str>,
    ) -> Result<&mut Account, LedgerError> {
        let mut builder = AccountBuilder::default()
            .account_number(account_number)
            .first_name(first_name)
            .last_name(last_name)
            .bank(Arc::clone(&self.services));
        if let Some(name) = timezone {
            builder = builder.timezone(self.timezone(name)?);
        }
        self.insert_account(builder.build()?)
    }

    fn insert_account(&mut self, account: Account) -> Result<&mut Account, LedgerError> {
        let account_number = account.account_number();
        if self.accounts.contains_key(&account_number) {
            return Err(LedgerError::InvalidAccountNumber(format!(
                "Account {} already exists",
                account_number
            )));
        }
        Ok(self.accounts.entry(account_number).or_insert(account))
    }

    pub fn account(&self, account_number: AccountNumber) -> Result<&Account, LedgerError> {
        self.accounts
            .get(&account_number)
            .ok_or(LedgerError::UnknownAccount(account_number))
    }

    pub fn account_mut(&mut self, account_number: AccountNumber) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(&account_number)
            .ok_or(LedgerError::UnknownAccount(account_number))
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn decode(&self, code: &str, timezone: &str) -> Result<ConfirmationCode, LedgerError> {
        ConfirmationCode::parse(code, self.timezone(timezone)?)
    }
}
