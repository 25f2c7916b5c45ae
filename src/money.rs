//! Helpers for monetary amounts.
//!
//! Amounts are [Decimal]s everywhere. SQLite has no decimal type, so amounts
//! are stored as TEXT and summed in Rust rather than with SQL `SUM`, which
//! would go through floating point.

use rusqlite::{Row, types::Type};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::Error;

/// Read a TEXT encoded decimal from column `index` of `row`.
pub fn read_decimal(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let raw: String = row.get(index)?;

    raw.parse::<Decimal>()
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error)))
}

/// Read a nullable TEXT encoded decimal from column `index` of `row`.
pub fn read_optional_decimal(row: &Row, index: usize) -> Result<Option<Decimal>, rusqlite::Error> {
    let raw: Option<String> = row.get(index)?;

    raw.map(|raw| {
        raw.parse::<Decimal>().map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
        })
    })
    .transpose()
}

/// Parse a JSON number or numeric string, falling back to zero.
///
/// Missing values, blank strings and anything that does not parse as a
/// number all become zero.
pub fn parse_or_zero(value: Option<&Value>) -> Decimal {
    let parsed = match value {
        Some(Value::Number(number)) => parse_number_text(&number.to_string()),
        Some(Value::String(text)) => parse_number_text(text.trim()),
        _ => None,
    };

    parsed.unwrap_or(Decimal::ZERO)
}

fn parse_number_text(text: &str) -> Option<Decimal> {
    text.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

/// Sum `amounts` exactly.
///
/// # Errors
/// Returns [Error::Validation] if the sum does not fit in a [Decimal].
pub fn total<'a>(amounts: impl IntoIterator<Item = &'a Decimal>) -> Result<Decimal, Error> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, amount| sum.checked_add(*amount))
        .map(|sum| sum.normalize())
        .ok_or_else(Error::amount_overflow)
}

/// `minuend - subtrahend`.
///
/// # Errors
/// Returns [Error::Validation] if the result does not fit in a [Decimal].
pub fn difference(minuend: Decimal, subtrahend: Decimal) -> Result<Decimal, Error> {
    minuend
        .checked_sub(subtrahend)
        .map(|difference| difference.normalize())
        .ok_or_else(Error::amount_overflow)
}

/// `part` as a percentage of `whole`, or zero when `whole` is not positive.
///
/// # Errors
/// Returns [Error::Validation] if the percentage does not fit in a [Decimal].
pub fn percentage_of(part: Decimal, whole: Decimal) -> Result<Decimal, Error> {
    if whole <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|percentage| percentage.normalize())
        .ok_or_else(Error::amount_overflow)
}
