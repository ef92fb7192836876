use clap::Parser;
use std::env::current_dir;
use std::process::ExitCode;

use argument_parsing::LedgerOptions;
use crate::bank::Bank;
use crate::clock::SystemClock;
use crate::errors::LedgerError;
use crate::session;
use crate::vault::VaultImpl;

mod argument_parsing;
mod formatting;

pub fn ledger_operation() -> ExitCode {
    let result: Result<String, LedgerError> = (|| {
        let arguments = LedgerOptions::parse();
        let vault_path = match &arguments.vault {
            Some(a) => a.clone(),
            None => current_dir().map_err(|e| LedgerError::Vault(e.to_string()))?,
        };
        let vault = VaultImpl { path: vault_path };

        let mut bank = Bank::from_vault_values(&vault, Box::new(SystemClock))?;
        if let Some(rate) = arguments.interest_rate {
            bank.services().interest_rate().set(rate)?;
        }

        for account in &arguments.accounts {
            bank.open_account(
                account.account_number,
                &account.first_name,
                &account.last_name,
                account.timezone.as_deref(),
            )?;
        }

        let screen = session::execute(
            &mut bank,
            &arguments.operations,
            &arguments.codes,
            &arguments.timezone,
        );

        Ok(formatting::format_ledger_screen(&screen))
    })();

    match result {
        Ok(screen) => {
            println!("{}", screen);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Could not run the ledger: {}", error);
            ExitCode::FAILURE
        }
    }
}
