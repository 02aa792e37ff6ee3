//! Display strings derived from a [`CalculationResult`].

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::common::{CURRENCY_DECIMALS, RATE_DECIMALS, format_decimal};
use super::engine::CalculationResult;

/// Formatted results shown to the user.
///
/// Sizes, rates and the equipment cost keep three truncated decimals;
/// profits and commissions keep two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesResults {
    pub size_kw: String,
    pub total_equipment_cost: String,
    pub net_consultant_profit: String,
    pub break_even_rate: String,
    pub rate_differential: String,
    pub split: Option<SplitResults>,
}

/// Formatted installer-split commissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitResults {
    pub gross_profit: String,
    pub installer_commission: String,
    pub consultant_commission: String,
    pub manager_commission: String,
}

/// Formats every displayed quantity of `calc`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use sales_core::{InputData, Profile};
/// use sales_core::calculations::{SalesCutEngine, present};
///
/// let mut input = InputData::seeded(&Profile::Other.defaults());
/// input.watts_per_panel = dec!(450);
/// input.panel_count = 10;
///
/// let results = present(&SalesCutEngine::new(Profile::Other).calculate(&input));
///
/// assert_eq!(results.size_kw, "4.5");
/// ```
pub fn present(calc: &CalculationResult) -> SalesResults {
    let rate = |value: Decimal| format_decimal(value, RATE_DECIMALS);
    let currency = |value: Decimal| format_decimal(value, CURRENCY_DECIMALS);

    SalesResults {
        size_kw: rate(calc.system_size_watts / Decimal::ONE_THOUSAND),
        total_equipment_cost: rate(calc.total_equipment_cost),
        net_consultant_profit: currency(calc.net_consultant_profit),
        break_even_rate: rate(calc.break_even_rate),
        rate_differential: rate(calc.rate_differential),
        split: calc.installer_split.as_ref().map(|split| SplitResults {
            gross_profit: currency(split.gross_profit),
            installer_commission: currency(split.installer_commission),
            consultant_commission: currency(split.consultant_commission),
            manager_commission: currency(split.manager_commission),
        }),
    }
}

impl fmt::Display for SalesResults {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Tamaño (kW): {}", self.size_kw)?;
        writeln!(f, "Costo Total del Equipo: ${}", self.total_equipment_cost)?;
        writeln!(f, "EPC Mínimo: {}", self.break_even_rate)?;
        match &self.split {
            Some(split) => {
                writeln!(f, "Ganancia Bruta: ${}", split.gross_profit)?;
                writeln!(f, "Comisión Instaladora (20%): ${}", split.installer_commission)?;
                writeln!(f, "Comisión Consultor: ${}", split.consultant_commission)?;
                write!(f, "Comisión Gerente: ${}", split.manager_commission)
            }
            None => {
                writeln!(
                    f,
                    "Ganancia del Consultor Neta (-10%): ${}",
                    self.net_consultant_profit
                )?;
                write!(f, "Diferencial: {}", self.rate_differential)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::engine::InstallerSplit;

    fn standard_calc() -> CalculationResult {
        CalculationResult {
            system_size_watts: dec!(4500),
            panel_cost: dec!(11250),
            total_equipment_cost: dec!(21250),
            break_even_rate: dec!(21250) / dec!(4500),
            rate_differential: dec!(2.5),
            net_consultant_profit: dec!(10125.4567),
            installer_split: None,
        }
    }

    #[test]
    fn present_uses_three_places_for_rates_and_costs() {
        let results = present(&standard_calc());

        assert_eq!(results.size_kw, "4.5");
        assert_eq!(results.total_equipment_cost, "21250");
        assert_eq!(results.break_even_rate, "4.722");
        assert_eq!(results.rate_differential, "2.5");
    }

    #[test]
    fn present_uses_two_places_for_profit() {
        let results = present(&standard_calc());

        assert_eq!(results.net_consultant_profit, "10125.45");
        assert_eq!(results.split, None);
    }

    #[test]
    fn present_zero_size_is_plain_zero() {
        let calc = CalculationResult {
            system_size_watts: Decimal::ZERO,
            ..standard_calc()
        };

        assert_eq!(present(&calc).size_kw, "0");
    }

    #[test]
    fn present_formats_installer_split() {
        let calc = CalculationResult {
            installer_split: Some(InstallerSplit {
                sale_price_total: dec!(31500),
                gross_profit: dec!(6660),
                installer_commission: dec!(1332.999),
                remainder_after_installer: dec!(5328),
                distributable_amount: dec!(5178),
                consultant_commission: dec!(3210.3666),
                manager_commission: dec!(1967.6334),
            }),
            ..standard_calc()
        };

        let split = present(&calc).split.unwrap();

        assert_eq!(
            split,
            SplitResults {
                gross_profit: "6660".to_string(),
                installer_commission: "1332.99".to_string(),
                consultant_commission: "3210.36".to_string(),
                manager_commission: "1967.63".to_string(),
            }
        );
    }

    #[test]
    fn display_standard_block_shows_net_profit_and_differential() {
        let text = present(&standard_calc()).to_string();

        assert_eq!(
            text,
            "Tamaño (kW): 4.5\n\
             Costo Total del Equipo: $21250\n\
             EPC Mínimo: 4.722\n\
             Ganancia del Consultor Neta (-10%): $10125.45\n\
             Diferencial: 2.5"
        );
    }
}
