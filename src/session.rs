use crate::accounts::AccountNumber;
use crate::amounts::Figure;
use crate::bank::Bank;
use crate::confirmation_code::ConfirmationCode;
use crate::errors::LedgerError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Deposit {
        account_number: AccountNumber,
        amount: Figure,
    },
    Withdraw {
        account_number: AccountNumber,
        amount: Figure,
    },
    PayInterest {
        account_number: AccountNumber,
    },
}

impl Operation {
    pub fn account_number(&self) -> AccountNumber {
        match self {
            Operation::Deposit { account_number, .. }
            | Operation::Withdraw { account_number, .. }
            | Operation::PayInterest { account_number } => *account_number,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Operation::Deposit { amount, .. } => format!("Deposit {}", amount),
            Operation::Withdraw { amount, .. } => format!("Withdraw {}", amount),
            Operation::PayInterest { .. } => "Pay interest".to_string(),
        }
    }
}

/* Output types */
#[derive(Debug, PartialEq, Eq)]
pub struct TransactionLine {
    pub operation: Operation,
    pub full_name: Option<String>,
    pub result: Result<ConfirmationCode, LedgerError>,
    pub balance: Option<Figure>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DecodedLine {
    pub code: String,
    pub result: Result<ConfirmationCode, LedgerError>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct BalanceLine {
    pub account_number: AccountNumber,
    pub full_name: String,
    pub timezone: String,
    pub balance: Figure,
    pub last_confirmation_code: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct LedgerScreen {
    pub interest_rate: Figure,
    pub transactions: Vec<TransactionLine>,
    pub decoded: Vec<DecodedLine>,
    pub balances: Vec<BalanceLine>,
}

/// Applies the operations in order, then decodes the requested codes.
///
/// A refused operation is reported on its line and does not stop the ones
/// after it.
pub fn execute(
    bank: &mut Bank,
    operations: &[Operation],
    codes: &[String],
    timezone: &str,
) -> LedgerScreen {
    let transactions = operations
        .iter()
        .map(|operation| apply(bank, operation))
        .collect();

    let decoded = codes
        .iter()
        .map(|code| DecodedLine {
            code: code.clone(),
            result: bank.decode(code, timezone),
        })
        .collect();

    let balances = bank
        .accounts()
        .map(|account| BalanceLine {
            account_number: account.account_number(),
            full_name: account.full_name(),
            timezone: account.timezone().to_string(),
            balance: account.balance(),
            last_confirmation_code: account.last_confirmation_code().map(str::to_string),
        })
        .collect();

    LedgerScreen {
        interest_rate: bank.services().interest_rate().get(),
        transactions,
        decoded,
        balances,
    }
}

fn apply(bank: &mut Bank, operation: &Operation) -> TransactionLine {
    let account = match bank.account_mut(operation.account_number()) {
        Ok(account) => account,
        Err(error) => {
            tracing::warn!(%error, "operation refused");
            return TransactionLine {
                operation: operation.clone(),
                full_name: None,
                result: Err(error),
                balance: None,
            };
        }
    };

    let code = match operation {
        Operation::Deposit { amount, .. } => Ok(account.deposit(*amount)),
        Operation::Withdraw { amount, .. } => account.withdraw(*amount),
        Operation::PayInterest { .. } => Ok(account.pay_interest()),
    };
    if let Err(error) = &code {
        tracing::warn!(%error, account = account.account_number(), "operation refused");
    }

    TransactionLine {
        operation: operation.clone(),
        full_name: Some(account.full_name()),
        result: code.and_then(|code| account.parse_confirmation_code(&code)),
        balance: Some(account.balance()),
    }
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};
    use rust_decimal_macros::dec;

    use super::{execute, Operation};
    use crate::bank::{Bank, BankServices};
    use crate::clock::MockClock;
    use crate::confirmation_code::TransactionType;
    use crate::errors::LedgerError;
    use crate::interest_rate::InterestRate;
    use crate::timezone::TimeZone;

    fn bank() -> Bank {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .returning(|| Utc.with_ymd_and_hms(2023, 9, 26, 5, 42, 49).unwrap());
        let mut bank = Bank::new(BankServices::new(InterestRate::default(), Box::new(clock)));
        bank.add_timezone(TimeZone::new("MSK", 3, 15).unwrap());
        bank.open_account(1, "Pavel", "Skryabin", Some("MSK")).unwrap();
        bank.open_account(2, "Ivan", "Petrov", None).unwrap();
        bank
    }

    fn sequence_ids(screen: &super::LedgerScreen) -> Vec<Option<String>> {
        screen
            .transactions
            .iter()
            .map(|line| line.result.as_ref().ok().map(|code| code.sequence_id().to_string()))
            .collect()
    }

    #[test]
    fn execute__operations_in_order() {
        let mut bank = bank();
        let screen = execute(
            &mut bank,
            &[
                Operation::Deposit { account_number: 1, amount: dec!(100) },
                Operation::Withdraw { account_number: 2, amount: dec!(10) },
                Operation::PayInterest { account_number: 1 },
                Operation::Withdraw { account_number: 1, amount: dec!(50) },
            ],
            &[],
            "UTC",
        );

        let types: Vec<TransactionType> = screen
            .transactions
            .iter()
            .map(|line| line.result.as_ref().unwrap().transaction_type())
            .collect();
        assert_eq!(
            types,
            vec![
                TransactionType::Deposit,
                TransactionType::Declined,
                TransactionType::Interest,
                TransactionType::Withdrawal,
            ]
        );
        assert_eq!(
            sequence_ids(&screen),
            vec![
                Some("1".to_string()),
                Some("2".to_string()),
                Some("3".to_string()),
                Some("4".to_string())
            ]
        );
        assert_eq!(screen.transactions[3].balance, Some(dec!(100)));
        assert_eq!(
            screen.transactions[0].result.as_ref().unwrap().transaction_time_local(),
            "2023-09-26 08:57:49(MSK)"
        );
        assert_eq!(screen.balances[0].balance, dec!(100));
        assert_eq!(
            screen.balances[0].last_confirmation_code.as_deref(),
            Some("W-1-20230926054249-4")
        );
        assert_eq!(screen.balances[1].balance, dec!(0));
    }

    #[test]
    fn execute__refused_operations_do_not_consume_ids() {
        let mut bank = bank();
        let screen = execute(
            &mut bank,
            &[
                Operation::Withdraw { account_number: 1, amount: dec!(-1) },
                Operation::Deposit { account_number: 99, amount: dec!(1) },
                Operation::Deposit { account_number: 1, amount: dec!(1) },
            ],
            &[],
            "UTC",
        );

        assert!(matches!(
            screen.transactions[0].result,
            Err(LedgerError::InvalidAmount(_))
        ));
        assert_eq!(
            screen.transactions[1].result,
            Err(LedgerError::UnknownAccount(99))
        );
        assert_eq!(screen.transactions[1].full_name, None);
        assert_eq!(
            sequence_ids(&screen),
            vec![None, None, Some("1".to_string())]
        );
    }

    #[test]
    fn execute__decodes_codes_in_requested_timezone() {
        let mut bank = bank();
        let codes = vec![
            "D-1-20230926054249-1".to_string(),
            "D-1-2023".to_string(),
        ];
        let screen = execute(&mut bank, &[], &codes, "MSK");

        assert_eq!(
            screen.decoded[0].result.as_ref().unwrap().transaction_time_local(),
            "2023-09-26 08:57:49(MSK)"
        );
        assert!(matches!(
            screen.decoded[1].result,
            Err(LedgerError::InvalidConfirmationCode(_))
        ));
        assert_eq!(screen.interest_rate, dec!(0.5));
    }

    #[test]
    fn execute__unknown_decoding_timezone() {
        let mut bank = bank();
        let codes = vec!["D-1-20230926054249-1".to_string()];
        let screen = execute(&mut bank, &[], &codes, "MARS");
        assert_eq!(
            screen.decoded[0].result,
            Err(LedgerError::UnknownTimezone("MARS".to_string()))
        );
    }
}
