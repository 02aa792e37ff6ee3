//! Sales-cut calculation engine.
//!
//! Derives system size, equipment cost, break-even rate and commissions from
//! a snapshot of [`InputData`] for a given [`Profile`]. The engine is pure:
//! every call recomputes the full [`CalculationResult`] and nothing is cached.
//!
//! # Steps
//!
//! | Step | Quantity | Standard | Installer split |
//! |------|----------|----------|-----------------|
//! | 1 | System size (W) | watts per panel × panels | same |
//! | 2 | Panel cost | size × base rate | size × 1.52 |
//! | 2 | Total equipment cost | panel cost + battery price × batteries | panel cost + 9000 × batteries |
//! | 2 | Break-even base | total cost ÷ size | (size × 1.52 + 9000) ÷ size |
//! | 3 | Break-even rate / differential | sale-price branch | same |
//! | 3 | Net consultant profit | differential × size × 90% | same (not surfaced) |
//! | 4 | Gross profit split | n/a | installer 20%, rest less lead fee and adders split consultant/manager |
//!
//! A zero system size yields a zero break-even base instead of dividing.
//! Arithmetic saturates at `Decimal::MAX`/`Decimal::MIN`, so out-of-range
//! inputs produce clamped figures rather than a panic.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use sales_core::{InputData, Profile};
//! use sales_core::calculations::SalesCutEngine;
//!
//! let mut input = InputData::seeded(&Profile::Other.defaults());
//! input.watts_per_panel = dec!(450);
//! input.panel_count = 10;
//! input.base_rate = dec!(2.5);
//! input.consultant_margin = dec!(1.5);
//!
//! let result = SalesCutEngine::new(Profile::Other).calculate(&input);
//!
//! assert_eq!(result.system_size_watts, dec!(4500));
//! assert_eq!(result.panel_cost, dec!(11250));
//! assert_eq!(result.rate_differential, dec!(1.5));
//! assert_eq!(result.net_consultant_profit, dec!(6075));
//! assert!(result.installer_split.is_none());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{InputData, Profile, ProfileVariant};

/// Share of the gross differential the consultant keeps after the flat 10% deduction.
pub const NET_PROFIT_FACTOR: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// Contractually fixed pricing of the installer-split variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerSplitTerms {
    /// Price per watt of panels, regardless of the base-rate input.
    pub panel_rate: Decimal,
    /// Price per battery, regardless of the battery-price input.
    pub battery_price: Decimal,
    /// Installer's fraction of gross profit.
    pub installer_share: Decimal,
}

impl InstallerSplitTerms {
    /// The contracted terms: 1.52 per watt, 9000 per battery, 20% to the installer.
    pub const CONTRACT: InstallerSplitTerms = InstallerSplitTerms {
        panel_rate: Decimal::from_parts(152, 0, 0, false, 2),
        battery_price: Decimal::from_parts(9000, 0, 0, false, 0),
        installer_share: Decimal::from_parts(20, 0, 0, false, 2),
    };
}

/// Commission split produced only for the installer-split variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerSplit {
    /// System size × sale price per watt.
    pub sale_price_total: Decimal,
    /// Sale price total minus total equipment cost.
    pub gross_profit: Decimal,
    /// Installer's fixed share of gross profit.
    pub installer_commission: Decimal,
    /// Gross profit left after the installer's share.
    pub remainder_after_installer: Decimal,
    /// Remainder less the lead fee and adders.
    pub distributable_amount: Decimal,
    pub consultant_commission: Decimal,
    /// Always `distributable_amount - consultant_commission`.
    pub manager_commission: Decimal,
}

/// Every quantity derived from one input snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub system_size_watts: Decimal,
    pub panel_cost: Decimal,
    pub total_equipment_cost: Decimal,
    /// Minimum price per watt, including the consultant margin when no sale price is set.
    pub break_even_rate: Decimal,
    /// Markup per watt; negative when the sale price is below break-even.
    pub rate_differential: Decimal,
    /// Differential × size less the flat 10% deduction.
    pub net_consultant_profit: Decimal,
    /// Present only for [`ProfileVariant::InstallerSplit`].
    pub installer_split: Option<InstallerSplit>,
}

/// Equipment figures from step 2, before the sale-price branch.
struct EquipmentCost {
    panel_cost: Decimal,
    total: Decimal,
    break_even_base: Decimal,
}

/// Calculator applying the formula set of one profile variant.
#[derive(Debug, Clone)]
pub struct SalesCutEngine {
    variant: ProfileVariant,
    terms: InstallerSplitTerms,
}

impl SalesCutEngine {
    /// Creates an engine for the profile's variant with the contracted split terms.
    pub fn new(profile: Profile) -> Self {
        Self {
            variant: profile.variant(),
            terms: InstallerSplitTerms::CONTRACT,
        }
    }

    /// Computes every derived quantity for `input`.
    ///
    /// Total: never fails, never divides by zero.
    pub fn calculate(
        &self,
        input: &InputData,
    ) -> CalculationResult {
        // Step 1
        let size = self.system_size(input);

        // Step 2
        let equipment = match self.variant {
            ProfileVariant::Standard => self.standard_equipment(input, size),
            ProfileVariant::InstallerSplit => self.installer_equipment(input, size),
        };

        // Step 3
        let (break_even_rate, rate_differential) =
            self.break_even_and_differential(input, equipment.break_even_base);
        let net_consultant_profit = rate_differential
            .saturating_mul(size)
            .saturating_mul(NET_PROFIT_FACTOR);

        // Step 4
        let installer_split = match self.variant {
            ProfileVariant::Standard => None,
            ProfileVariant::InstallerSplit => {
                Some(self.split_gross_profit(input, size, equipment.total))
            }
        };

        CalculationResult {
            system_size_watts: size,
            panel_cost: equipment.panel_cost,
            total_equipment_cost: equipment.total,
            break_even_rate,
            rate_differential,
            net_consultant_profit,
            installer_split,
        }
    }

    fn system_size(
        &self,
        input: &InputData,
    ) -> Decimal {
        input
            .watts_per_panel
            .saturating_mul(Decimal::from(input.panel_count))
    }

    /// Equipment cost from the editable base rate and battery price.
    fn standard_equipment(
        &self,
        input: &InputData,
        size: Decimal,
    ) -> EquipmentCost {
        let panel_cost = size.saturating_mul(input.base_rate);
        let total = panel_cost.saturating_add(
            input
                .battery_unit_price
                .saturating_mul(Decimal::from(input.battery_count)),
        );
        let break_even_base = per_watt(total, size, input.battery_count);

        debug!(
            %size,
            base_rate = %input.base_rate,
            %total,
            %break_even_base,
            "standard equipment cost"
        );

        EquipmentCost {
            panel_cost,
            total,
            break_even_base,
        }
    }

    /// Equipment cost from the fixed contract terms; the base-rate and
    /// battery-price inputs are ignored.
    ///
    /// The break-even base always prices in exactly one battery,
    /// independent of the battery count.
    fn installer_equipment(
        &self,
        input: &InputData,
        size: Decimal,
    ) -> EquipmentCost {
        let panel_cost = size.saturating_mul(self.terms.panel_rate);
        let total = panel_cost.saturating_add(
            self.terms
                .battery_price
                .saturating_mul(Decimal::from(input.battery_count)),
        );
        let break_even_base = per_watt(
            panel_cost.saturating_add(self.terms.battery_price),
            size,
            input.battery_count,
        );

        debug!(
            %size,
            %total,
            %break_even_base,
            "installer-split equipment cost"
        );

        EquipmentCost {
            panel_cost,
            total,
            break_even_base,
        }
    }

    /// Applies the sale-price branch, returning `(break_even_rate, rate_differential)`.
    ///
    /// Without a sale price the consultant margin is added to the break-even
    /// rate and becomes the differential. With one, the differential is the
    /// sale price minus the break-even base.
    fn break_even_and_differential(
        &self,
        input: &InputData,
        break_even_base: Decimal,
    ) -> (Decimal, Decimal) {
        match input.sale_price_per_watt() {
            None => {
                debug!(margin = %input.consultant_margin, "no sale price; using consultant margin");
                (
                    break_even_base.saturating_add(input.consultant_margin),
                    input.consultant_margin,
                )
            }
            Some(sale_price) => {
                let differential = sale_price.saturating_sub(break_even_base);
                if differential.is_sign_negative() && !differential.is_zero() {
                    warn!(
                        %sale_price,
                        %break_even_base,
                        %differential,
                        "sale price is below break-even"
                    );
                }
                (break_even_base, differential)
            }
        }
    }

    /// Splits gross profit between installer, consultant and manager.
    fn split_gross_profit(
        &self,
        input: &InputData,
        size: Decimal,
        total_equipment_cost: Decimal,
    ) -> InstallerSplit {
        let sale_price_total = size.saturating_mul(input.sale_price);
        let gross_profit = sale_price_total.saturating_sub(total_equipment_cost);
        let installer_commission = gross_profit.saturating_mul(self.terms.installer_share);
        let remainder_after_installer =
            gross_profit.saturating_mul(Decimal::ONE - self.terms.installer_share);
        let distributable_amount = remainder_after_installer
            .saturating_sub(input.lead_fee)
            .saturating_sub(input.adders);
        let consultant_commission =
            distributable_amount.saturating_mul(input.consultant_share.fraction());
        let manager_commission = distributable_amount.saturating_sub(consultant_commission);

        debug!(
            %gross_profit,
            %distributable_amount,
            share = input.consultant_share.percent(),
            "installer split"
        );

        InstallerSplit {
            sale_price_total,
            gross_profit,
            installer_commission,
            remainder_after_installer,
            distributable_amount,
            consultant_commission,
            manager_commission,
        }
    }
}

/// Divides a cost by the system size, yielding zero for an empty system.
///
/// A quotient past the `Decimal` range saturates toward the sign of `cost`.
fn per_watt(
    cost: Decimal,
    size: Decimal,
    battery_count: u32,
) -> Decimal {
    if size > Decimal::ZERO {
        return cost.checked_div(size).unwrap_or_else(|| {
            warn!(%cost, %size, "break-even base out of range; saturating");
            if cost.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        });
    }
    if battery_count > 0 {
        warn!(
            %cost,
            battery_count,
            "system size is zero; break-even base set to 0"
        );
    }
    Decimal::ZERO
}

/// Computes the result for an opaque profile identifier.
///
/// Unknown or missing identifiers use the default profile, as
/// [`Profile::resolve`] does.
pub fn compute(
    input: &InputData,
    profile_id: Option<&str>,
) -> CalculationResult {
    SalesCutEngine::new(Profile::resolve(profile_id)).calculate(input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;
    use crate::calculations::common::format_decimal;
    use crate::models::ConsultantShare;

    fn input_for(profile: Profile) -> InputData {
        InputData::seeded(&profile.defaults())
    }

    /// 450 W × 10 panels at 2.5 per watt, the reference standard setup.
    fn standard_reference() -> InputData {
        InputData {
            watts_per_panel: dec!(450),
            panel_count: 10,
            base_rate: dec!(2.5),
            ..input_for(Profile::Other)
        }
    }

    /// 450 W × 10 panels with 2 batteries for the installer-split profile.
    fn installer_reference() -> InputData {
        InputData {
            watts_per_panel: dec!(450),
            panel_count: 10,
            battery_count: 2,
            ..input_for(Profile::JRamos)
        }
    }

    /// Initializes tracing subscriber for tests that exercise log output.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    // =========================================================================
    // System size tests
    // =========================================================================

    #[test]
    fn size_is_watts_times_panels_for_every_profile() {
        for profile in Profile::ALL {
            let input = InputData {
                watts_per_panel: dec!(333),
                panel_count: 3,
                ..input_for(profile)
            };

            let result = SalesCutEngine::new(profile).calculate(&input);

            assert_eq!(result.system_size_watts, dec!(999));
        }
    }

    #[test]
    fn zero_watts_gives_zero_size_and_break_even() {
        for profile in Profile::ALL {
            let input = InputData {
                panel_count: 10,
                ..input_for(profile)
            };

            let result = SalesCutEngine::new(profile).calculate(&input);

            assert_eq!(result.system_size_watts, Decimal::ZERO);
            assert_eq!(result.break_even_rate, Decimal::ZERO);
        }
    }

    #[test]
    fn zero_panels_with_batteries_does_not_divide() {
        let _guard = init_test_tracing();
        let input = InputData {
            watts_per_panel: dec!(450),
            battery_count: 2,
            ..input_for(Profile::Horizon)
        };

        let result = SalesCutEngine::new(Profile::Horizon).calculate(&input);

        assert_eq!(result.total_equipment_cost, dec!(22400));
        assert_eq!(result.break_even_rate, Decimal::ZERO);
    }

    // =========================================================================
    // Standard variant tests
    // =========================================================================

    #[test]
    fn standard_panel_cost_uses_base_rate() {
        let result = SalesCutEngine::new(Profile::Other).calculate(&standard_reference());

        assert_eq!(result.panel_cost, dec!(11250));
    }

    #[test]
    fn standard_total_includes_batteries() {
        let input = InputData {
            battery_unit_price: dec!(5000),
            battery_count: 2,
            ..standard_reference()
        };

        let result = SalesCutEngine::new(Profile::Other).calculate(&input);

        assert_eq!(result.total_equipment_cost, dec!(21250));
        assert_eq!(result.break_even_rate, dec!(21250) / dec!(4500));
        assert_eq!(format_decimal(result.break_even_rate, 3), "4.722");
    }

    #[test]
    fn margin_without_sale_price_becomes_differential() {
        let input = InputData {
            consultant_margin: dec!(1.5),
            ..standard_reference()
        };

        let result = SalesCutEngine::new(Profile::Other).calculate(&input);

        assert_eq!(result.rate_differential, dec!(1.5));
        assert_eq!(result.break_even_rate, dec!(4.0));
        assert_eq!(result.net_consultant_profit, dec!(6075));
    }

    #[test]
    fn sale_price_replaces_margin() {
        let input = InputData {
            consultant_margin: dec!(1.5),
            sale_price: dec!(3.5),
            ..standard_reference()
        };

        let result = SalesCutEngine::new(Profile::Other).calculate(&input);

        assert_eq!(result.break_even_rate, dec!(2.5));
        assert_eq!(result.rate_differential, dec!(1.0));
        assert_eq!(result.net_consultant_profit, dec!(4050));
    }

    #[test]
    fn sale_price_below_break_even_gives_negative_differential() {
        let _guard = init_test_tracing();
        let input = InputData {
            battery_unit_price: dec!(5000),
            battery_count: 2,
            sale_price: dec!(3.5),
            ..standard_reference()
        };

        let result = SalesCutEngine::new(Profile::Other).calculate(&input);

        let break_even = dec!(21250) / dec!(4500);
        let expected_differential = dec!(3.5) - break_even;
        assert_eq!(result.rate_differential, expected_differential);
        assert_eq!(
            result.net_consultant_profit,
            expected_differential * dec!(4500) * dec!(0.9)
        );
        assert!(result.rate_differential < Decimal::ZERO);
    }

    #[test]
    fn standard_variant_has_no_split() {
        let result = SalesCutEngine::new(Profile::Horizon).calculate(&standard_reference());

        assert_eq!(result.installer_split, None);
    }

    #[test]
    fn break_even_formats_with_truncation() {
        let input = InputData {
            watts_per_panel: dec!(333),
            panel_count: 3,
            base_rate: dec!(3.14159),
            ..input_for(Profile::Other)
        };

        let result = SalesCutEngine::new(Profile::Other).calculate(&input);

        assert_eq!(format_decimal(result.break_even_rate, 3), "3.141");
    }

    // =========================================================================
    // Installer-split variant tests
    // =========================================================================

    #[test]
    fn installer_costs_use_contract_terms() {
        let result = SalesCutEngine::new(Profile::JRamos).calculate(&installer_reference());

        assert_eq!(result.panel_cost, dec!(6840));
        assert_eq!(result.total_equipment_cost, dec!(24840));
        // One battery is priced into the break-even base: (6840 + 9000) / 4500.
        assert_eq!(result.break_even_rate, dec!(3.52));
    }

    #[test]
    fn installer_ignores_base_rate_and_battery_price_inputs() {
        let edited = InputData {
            base_rate: dec!(5),
            battery_unit_price: dec!(1),
            ..installer_reference()
        };

        let engine = SalesCutEngine::new(Profile::JRamos);

        assert_eq!(engine.calculate(&edited), engine.calculate(&installer_reference()));
    }

    #[test]
    fn installer_split_with_sale_price() {
        let input = InputData {
            sale_price: dec!(7),
            ..installer_reference()
        };

        let result = SalesCutEngine::new(Profile::JRamos).calculate(&input);
        let split = result.installer_split.unwrap();

        assert_eq!(result.rate_differential, dec!(3.48));
        assert_eq!(result.net_consultant_profit, dec!(14094));
        assert_eq!(split.sale_price_total, dec!(31500));
        assert_eq!(split.gross_profit, dec!(6660));
        assert_eq!(split.installer_commission, dec!(1332));
        assert_eq!(split.remainder_after_installer, dec!(5328));
        assert_eq!(split.distributable_amount, dec!(5178));
        assert_eq!(split.consultant_commission, dec!(3210.36));
        assert_eq!(split.manager_commission, dec!(1967.64));
    }

    #[test]
    fn installer_split_deducts_adders() {
        let input = InputData {
            sale_price: dec!(7),
            adders: dec!(500),
            ..installer_reference()
        };

        let result = SalesCutEngine::new(Profile::JRamos).calculate(&input);

        assert_eq!(
            result.installer_split.unwrap().distributable_amount,
            dec!(4678)
        );
    }

    #[test]
    fn installer_split_without_sale_price_is_negative_gross() {
        let result = SalesCutEngine::new(Profile::JRamos).calculate(&installer_reference());
        let split = result.installer_split.unwrap();

        assert_eq!(split.sale_price_total, Decimal::ZERO);
        assert_eq!(split.gross_profit, dec!(-24840));
    }

    #[test]
    fn consultant_and_manager_sum_to_distributable_for_every_share() {
        for share in ConsultantShare::ALL {
            let input = InputData {
                sale_price: dec!(6.87),
                adders: dec!(123.45),
                consultant_share: share,
                ..installer_reference()
            };

            let result = SalesCutEngine::new(Profile::JRamos).calculate(&input);
            let split = result.installer_split.unwrap();

            assert_eq!(
                split.consultant_commission + split.manager_commission,
                split.distributable_amount,
                "share {}",
                share.percent()
            );
        }
    }

    // =========================================================================
    // Out-of-range input tests
    // =========================================================================

    fn huge_watts() -> Decimal {
        "100000000000000000000".parse().unwrap()
    }

    #[test]
    fn oversized_system_saturates_instead_of_panicking() {
        for profile in Profile::ALL {
            let input = InputData {
                watts_per_panel: huge_watts(),
                panel_count: 1_000_000_000,
                battery_count: 3,
                sale_price: dec!(4),
                ..input_for(profile)
            };

            let result = SalesCutEngine::new(profile).calculate(&input);

            assert_eq!(result.system_size_watts, Decimal::MAX);
            assert_eq!(result.total_equipment_cost, Decimal::MAX);
            assert!(!result.net_consultant_profit.is_sign_negative());
        }
    }

    #[test]
    fn oversized_installer_split_saturates_every_share() {
        let input = InputData {
            watts_per_panel: huge_watts(),
            panel_count: 1_000_000_000,
            ..installer_reference()
        };

        let split = SalesCutEngine::new(Profile::JRamos)
            .calculate(&input)
            .installer_split
            .unwrap();

        assert_eq!(split.sale_price_total, Decimal::ZERO);
        assert_eq!(split.gross_profit, Decimal::MIN);
        assert!(split.distributable_amount < Decimal::ZERO);
    }

    #[test]
    fn tiny_size_with_batteries_saturates_break_even() {
        let _guard = init_test_tracing();
        let input = InputData {
            watts_per_panel: Decimal::new(1, 28),
            panel_count: 1,
            battery_count: 1,
            ..input_for(Profile::Other)
        };

        let result = SalesCutEngine::new(Profile::Other).calculate(&input);

        assert_eq!(result.break_even_rate, Decimal::MAX);
        assert_eq!(result.rate_differential, Decimal::ZERO);
    }

    // =========================================================================
    // compute tests
    // =========================================================================

    #[test]
    fn compute_resolves_profile_identifier() {
        let input = installer_reference();

        assert!(compute(&input, Some("JRamos")).installer_split.is_some());
        assert!(compute(&input, Some("Nobody")).installer_split.is_none());
        assert!(compute(&input, None).installer_split.is_none());
    }

    #[test]
    fn compute_is_repeatable() {
        let input = InputData {
            sale_price: dec!(4.1),
            ..installer_reference()
        };

        assert_eq!(compute(&input, Some("JRamos")), compute(&input, Some("JRamos")));
    }
}
