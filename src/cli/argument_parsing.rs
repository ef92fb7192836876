use clap::Parser;
use std::path::PathBuf;

use crate::accounts::{parse_account_number, AccountNumber};
use crate::amounts::{parse_amount, Figure};
use crate::errors::LedgerError;
use crate::interest_rate::parse_interest_rate;
use crate::session::Operation;

pub fn parse_operation(s: &str) -> Result<Operation, LedgerError> {
    let splitted_string = s.split(':').collect::<Vec<&str>>();

    match splitted_string[..] {
        ["deposit", account_number, amount] => Ok(Operation::Deposit {
            account_number: parse_account_number(account_number)?,
            amount: parse_amount(amount)?,
        }),
        ["withdraw", account_number, amount] => Ok(Operation::Withdraw {
            account_number: parse_account_number(account_number)?,
            amount: parse_amount(amount)?,
        }),
        ["interest", account_number] => Ok(Operation::PayInterest {
            account_number: parse_account_number(account_number)?,
        }),
        _ => Err(LedgerError::InvalidOperation(format!(
            "Could not decode operation {}: Format is deposit:{{ACCOUNT}}:{{AMOUNT}}, withdraw:{{ACCOUNT}}:{{AMOUNT}} or interest:{{ACCOUNT}}",
            s
        ))),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountDeclaration {
    pub account_number: AccountNumber,
    pub first_name: String,
    pub last_name: String,
    pub timezone: Option<String>,
}

pub fn parse_account_declaration(s: &str) -> Result<AccountDeclaration, LedgerError> {
    let splitted_string = s.split(':').collect::<Vec<&str>>();

    let (account_number, first_name, last_name, timezone) = match splitted_string[..] {
        [account_number, first_name, last_name] => (account_number, first_name, last_name, None),
        [account_number, first_name, last_name, timezone] => {
            (account_number, first_name, last_name, Some(timezone.to_string()))
        }
        _ => {
            return Err(LedgerError::InvalidAccountNumber(format!(
                "Could not decode account {}: Format is {{NUMBER}}:{{FIRST_NAME}}:{{LAST_NAME}}[:{{TIMEZONE}}], eg. 123123:Pavel:Skryabin:MSK",
                s
            )))
        }
    };

    Ok(AccountDeclaration {
        account_number: parse_account_number(account_number)?,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        timezone,
    })
}

#[derive(Parser)]
#[command(name = "ledger", about = "Apply deposits, withdrawals and interest, and decode confirmation codes")]
pub struct LedgerOptions {
    #[arg(short = 'a', long = "account", value_parser = parse_account_declaration)]
    pub accounts: Vec<AccountDeclaration>,

    #[arg(short = 'o', long = "operation", value_parser = parse_operation)]
    pub operations: Vec<Operation>,

    #[arg(short = 'r', long = "interest-rate", value_parser = parse_interest_rate)]
    pub interest_rate: Option<Figure>,

    #[arg(short = 'd', long = "decode")]
    pub codes: Vec<String>,

    #[arg(short = 'z', long = "timezone", default_value = "UTC")]
    pub timezone: String,

    #[arg(short = 'V', long)]
    pub vault: Option<PathBuf>,
}
