use rust_decimal::Decimal;

use crate::errors::LedgerError;

pub type Figure = Decimal;

/// Turns user input into a figure. Anything that is not a plain decimal number
/// is refused before it can reach an account.
pub fn parse_amount(raw: &str) -> Result<Figure, LedgerError> {
    Decimal::from_str_exact(raw.trim())
        .map_err(|_| LedgerError::InvalidAmount(format!("'{}' is not a number", raw)))
}

pub fn is_positive(figure: &Figure) -> bool {
    figure > &Decimal::ZERO
}
