use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sales_core::{ConsultantShare, ConsultantShareError, FieldError, FieldKind, FieldValue, InputField};
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Errors raised while turning `field=value` text into a field update.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("expected field=value, got '{0}'")]
    MissingEquals(String),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("consultant share must be a whole percentage, got '{0}'")]
    InvalidShare(String),

    #[error(transparent)]
    Share(#[from] ConsultantShareError),

    #[error("field '{field}' must not be negative, got {value}")]
    NegativeCount { field: InputField, value: Decimal },
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| ParseDecimalError {
        input: s.to_string(),
        source: e,
    })
}

/// Parses a numeric entry, coercing anything unparseable to 0.
///
/// The calculator never rejects a typed amount; bad input counts as zero
/// and is logged.
pub fn coerce_decimal(s: &str) -> Decimal {
    parse_decimal(s).unwrap_or_else(|e| {
        tracing::warn!(input = %s, "treating invalid amount as 0: {}", e);
        Decimal::ZERO
    })
}

/// Parses a count entry: fractional input is truncated and unparseable or
/// out-of-range input becomes 0. Negative input is returned as an error.
pub fn coerce_count(
    field: InputField,
    s: &str,
) -> Result<u32, AssignmentError> {
    let value = coerce_decimal(s).trunc();
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AssignmentError::NegativeCount { field, value });
    }
    Ok(value.to_u32().unwrap_or_else(|| {
        tracing::warn!(input = %s, %field, "count out of range; treating as 0");
        0
    }))
}

/// Parses a consultant share given as a whole percentage (`"62"`).
pub fn parse_share(s: &str) -> Result<ConsultantShare, AssignmentError> {
    let percent: u32 = s
        .trim()
        .parse()
        .map_err(|_| AssignmentError::InvalidShare(s.to_string()))?;
    Ok(ConsultantShare::try_from(percent)?)
}

/// Converts raw text for `field` into the value kind the field accepts.
pub fn field_value(
    field: InputField,
    raw: &str,
) -> Result<FieldValue, AssignmentError> {
    Ok(match field.value_kind() {
        FieldKind::Text => FieldValue::Text(raw.to_string()),
        FieldKind::Number => FieldValue::Number(coerce_decimal(raw)),
        FieldKind::Count => FieldValue::Count(coerce_count(field, raw)?),
        FieldKind::Share => FieldValue::Share(parse_share(raw)?),
    })
}

/// Parses a `field=value` assignment such as `watts_per_panel=450`.
pub fn parse_assignment(s: &str) -> Result<(InputField, FieldValue), AssignmentError> {
    let (name, raw) = s
        .split_once('=')
        .ok_or_else(|| AssignmentError::MissingEquals(s.to_string()))?;
    let field: InputField = name.trim().parse()?;
    Ok((field, field_value(field, raw)?))
}
