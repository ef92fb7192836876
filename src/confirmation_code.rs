use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::accounts::AccountNumber;
use crate::errors::LedgerError;
use crate::timezone::TimeZone;
use crate::transaction_id::SequenceId;

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Interest,
    Declined,
}

impl TransactionType {
    pub fn code(&self) -> char {
        match self {
            TransactionType::Deposit => 'D',
            TransactionType::Withdrawal => 'W',
            TransactionType::Interest => 'I',
            TransactionType::Declined => 'X',
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "Deposit accepted",
            TransactionType::Withdrawal => "Withdrawal accepted",
            TransactionType::Interest => "Interest paid",
            TransactionType::Declined => "Declined",
        }
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "D" => Ok(TransactionType::Deposit),
            "W" => Ok(TransactionType::Withdrawal),
            "I" => Ok(TransactionType::Interest),
            "X" => Ok(TransactionType::Declined),
            other => Err(LedgerError::InvalidConfirmationCode(format!(
                "Unknown transaction type '{}'",
                other
            ))),
        }
    }
}

/// Renders the code that identifies one transaction attempt:
/// `{type}-{account number}-{UTC YYYYMMDDHHMMSS}-{sequence id}`.
pub fn encode(
    transaction_type: TransactionType,
    account_number: AccountNumber,
    at: &DateTime<Utc>,
    sequence_id: SequenceId,
) -> String {
    format!(
        "{}-{}-{}-{}",
        transaction_type.code(),
        account_number,
        at.format(TIMESTAMP_FORMAT),
        sequence_id
    )
}

/// A decoded confirmation code, read in a given timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationCode {
    transaction_type: TransactionType,
    account_number: String,
    transaction_time_utc: NaiveDateTime,
    sequence_id: String,
    timezone: Arc<TimeZone>,
}

impl ConfirmationCode {
    pub fn parse(code: &str, timezone: Arc<TimeZone>) -> Result<ConfirmationCode, LedgerError> {
        let parts = code.split('-').collect::<Vec<&str>>();
        let [transaction_type, account_number, timestamp, sequence_id] = parts[..] else {
            return Err(LedgerError::InvalidConfirmationCode(format!(
                "'{}' must have 4 parts separated by '-', found {}",
                code,
                parts.len()
            )));
        };

        Ok(ConfirmationCode {
            transaction_type: transaction_type.parse()?,
            account_number: account_number.to_string(),
            transaction_time_utc: parse_timestamp(timestamp)?,
            sequence_id: sequence_id.to_string(),
            timezone,
        })
    }

    pub fn parse_utc(code: &str) -> Result<ConfirmationCode, LedgerError> {
        ConfirmationCode::parse(code, Arc::new(TimeZone::utc()))
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn sequence_id(&self) -> &str {
        &self.sequence_id
    }

    pub fn timezone(&self) -> &TimeZone {
        &self.timezone
    }

    pub fn transaction_time_utc(&self) -> NaiveDateTime {
        self.transaction_time_utc
    }

    pub fn transaction_time_local(&self) -> String {
        let local_time = self.transaction_time_utc + self.timezone.offset();
        format!(
            "{}({})",
            local_time.format(LOCAL_TIME_FORMAT),
            self.timezone.name()
        )
    }
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, LedgerError> {
    // chrono accepts single digit fields, the wire format does not
    if raw.len() != 14 || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(LedgerError::MalformedTimestamp(raw.to_string()));
    }
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|_| LedgerError::MalformedTimestamp(raw.to_string()))
}

impl FromStr for ConfirmationCode {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfirmationCode::parse_utc(s)
    }
}

impl Display for ConfirmationCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.transaction_type.code(),
            self.account_number,
            self.transaction_time_utc.format(TIMESTAMP_FORMAT),
            self.sequence_id
        )
    }
}
