//! Copy-paste summary of a sale.
//!
//! The summary is a fixed multi-line Spanish template meant to be pasted into
//! an external messaging app. Its shape depends on the profile variant:
//!
//! | Line | Standard | Installer split |
//! |------|----------|-----------------|
//! | 1 | `Sistema: …` | same |
//! | 2 | `Nombre del Cliente: …` | same |
//! | 3 | `EPC de venta: …` (blank if unset) | same |
//! | 4 | `Ganancia Consultor por kw: …` | `Ganancia por KW: …` |
//! | 5 | `Ganancia Consultor (-10%): $…` | consultant, manager, installer commissions, adders |
//! | 6 | `Pago Cliente: $…` (blank if unset) | same |
//! | 7 | `Pago Cliente con subvención: $…` (subsidy profiles only) | n/a |
//! | last | `Fecha: d/m/yyyy` | same |

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calculations::common::{
    CURRENCY_DECIMALS, RATE_DECIMALS, display_amount, display_if_set, format_decimal,
};
use crate::calculations::{CalculationResult, InstallerSplit, InstallerSplitTerms};
use crate::models::{InputData, Profile, ProfileVariant};

/// Write-only sink for the rendered summary.
///
/// Writes are fire-and-forget: implementations log failures and never
/// report them back to the caller.
pub trait Clipboard {
    fn write_text(
        &self,
        text: &str,
    );
}

/// Renders the date the way the summary's readers expect it (`18/10/2026`).
pub fn format_summary_date(date: NaiveDate) -> String {
    date.format("%-d/%-m/%Y").to_string()
}

/// Renders the summary for `input` and its calculation result.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use sales_core::{InputData, Profile};
/// use sales_core::calculations::SalesCutEngine;
/// use sales_core::summary::render_summary;
///
/// let mut input = InputData::seeded(&Profile::Elias.defaults());
/// input.client_name = "Ana".to_string();
/// input.watts_per_panel = dec!(400);
/// input.panel_count = 12;
///
/// let calc = SalesCutEngine::new(Profile::Elias).calculate(&input);
/// let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
/// let text = render_summary(&input, &calc, Profile::Elias, date);
///
/// assert!(text.starts_with("Sistema: 12 Placas - 400 Watts + Baterías: 0\n"));
/// assert!(text.ends_with("Fecha: 5/3/2026"));
/// ```
pub fn render_summary(
    input: &InputData,
    calc: &CalculationResult,
    profile: Profile,
    date: NaiveDate,
) -> String {
    let mut lines = vec![
        format!(
            "Sistema: {} Placas - {} Watts + Baterías: {}",
            input.panel_count,
            display_amount(input.watts_per_panel),
            input.battery_count
        ),
        format!("Nombre del Cliente: {}", input.client_name),
        format!("EPC de venta: {}", display_if_set(input.sale_price)),
    ];

    match (profile.variant(), &calc.installer_split) {
        (ProfileVariant::InstallerSplit, Some(split)) => {
            installer_lines(&mut lines, input, calc, split);
        }
        _ => standard_lines(&mut lines, input, calc, profile),
    }

    lines.push(format!("Fecha: {}", format_summary_date(date)));
    lines.join("\n")
}

fn standard_lines(
    lines: &mut Vec<String>,
    input: &InputData,
    calc: &CalculationResult,
    profile: Profile,
) {
    lines.push(format!(
        "Ganancia Consultor por kw: {}",
        format_decimal(calc.rate_differential, RATE_DECIMALS)
    ));
    lines.push(format!(
        "Ganancia Consultor (-10%): ${}",
        format_decimal(calc.net_consultant_profit, CURRENCY_DECIMALS)
    ));
    lines.push(format!(
        "Pago Cliente: ${}",
        display_if_set(input.client_payment)
    ));
    if profile.has_subsidy() {
        lines.push(format!(
            "Pago Cliente con subvención: ${}",
            display_amount(input.client_payment.saturating_sub(input.subsidy_amount))
        ));
    }
}

fn installer_lines(
    lines: &mut Vec<String>,
    input: &InputData,
    calc: &CalculationResult,
    split: &InstallerSplit,
) {
    let share = input.consultant_share;
    let installer_percent =
        display_amount(InstallerSplitTerms::CONTRACT.installer_share * Decimal::ONE_HUNDRED);

    lines.push(format!(
        "Ganancia por KW: {}",
        format_decimal(calc.rate_differential, RATE_DECIMALS)
    ));
    lines.push(format!(
        "Ganancia de Consultor ({}%): ${}",
        share.percent(),
        format_decimal(split.consultant_commission, CURRENCY_DECIMALS)
    ));
    lines.push(format!(
        "Ganancia de Gerente ({}%): ${}",
        share.manager_percent(),
        format_decimal(split.manager_commission, CURRENCY_DECIMALS)
    ));
    lines.push(format!(
        "Comisión Instaladora ({installer_percent}%): ${}",
        format_decimal(split.installer_commission, CURRENCY_DECIMALS)
    ));
    lines.push(format!("Adders: ${}", display_amount(input.adders)));
    lines.push(format!(
        "Pago Cliente: ${}",
        display_if_set(input.client_payment)
    ));
}

/// Renders the summary, hands it to `clipboard`, and returns it for display.
pub fn copy_summary(
    clipboard: &dyn Clipboard,
    input: &InputData,
    calc: &CalculationResult,
    profile: Profile,
    date: NaiveDate,
) -> String {
    let text = render_summary(input, calc, profile, date);
    clipboard.write_text(&text);
    tracing::info!(profile = %profile, lines = text.lines().count(), "summary copied");
    text
}
