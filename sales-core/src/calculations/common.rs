//! Common formatting helpers for sales calculations.
//!
//! This module provides the shared decimal rendering used by the result
//! presenter and the summary serializer: floor-based truncation to a fixed
//! number of decimal places and plain rendering of raw input amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Default number of decimal places kept by [`format_decimal`] callers
/// that display rates and sizes.
pub const RATE_DECIMALS: u32 = 3;

/// Number of decimal places kept for currency amounts.
pub const CURRENCY_DECIMALS: u32 = 2;

/// Truncates a decimal value to `max_decimals` places using floor semantics.
///
/// This is equivalent to `floor(value * 10^max_decimals) / 10^max_decimals`.
/// Positive values are truncated toward zero; negative values move toward
/// negative infinity (`-1.2345` becomes `-1.235` at three places).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use sales_core::calculations::common::truncate_floor;
///
/// assert_eq!(truncate_floor(dec!(3.14159), 3), dec!(3.141));
/// assert_eq!(truncate_floor(dec!(-1.2345), 3), dec!(-1.235));
/// ```
pub fn truncate_floor(
    value: Decimal,
    max_decimals: u32,
) -> Decimal {
    value.round_dp_with_strategy(max_decimals, RoundingStrategy::ToNegativeInfinity)
}

/// Truncates a value with [`truncate_floor`] and renders it without
/// trailing zero padding.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use sales_core::calculations::common::format_decimal;
///
/// assert_eq!(format_decimal(dec!(3.14159), 3), "3.141");
/// assert_eq!(format_decimal(dec!(3.140000), 3), "3.14");
/// assert_eq!(format_decimal(dec!(21250), 3), "21250");
/// assert_eq!(format_decimal(dec!(0), 3), "0");
/// ```
pub fn format_decimal(
    value: Decimal,
    max_decimals: u32,
) -> String {
    truncate_floor(value, max_decimals).normalize().to_string()
}

/// Formats a currency amount as `$` followed by the two-place truncation.
///
/// ```
/// use rust_decimal_macros::dec;
/// use sales_core::calculations::common::format_currency;
///
/// assert_eq!(format_currency(dec!(6075.009)), "$6075");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format!("${}", format_decimal(value, CURRENCY_DECIMALS))
}

/// Renders a raw input amount in its shortest decimal form (`3.50` → `3.5`).
pub fn display_amount(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Renders a raw input amount, or an empty string when it holds the zero
/// "not set" sentinel.
pub fn display_if_set(value: Decimal) -> String {
    if value.is_zero() {
        String::new()
    } else {
        display_amount(value)
    }
}
