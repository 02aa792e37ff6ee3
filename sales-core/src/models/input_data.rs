use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ConsultantShare, ProfileDefaults};

/// Errors raised when a field update is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{field}' expects {expected}")]
    TypeMismatch {
        field: InputField,
        expected: &'static str,
    },

    #[error("field '{0}' is read-only")]
    ReadOnly(InputField),

    #[error("field '{field}' must not be negative, got {value}")]
    Negative { field: InputField, value: Decimal },
}

/// Inputs entered for one sale. Owned by a single session.
///
/// `sale_price` and `client_payment` use zero to mean "not yet set".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputData {
    pub client_name: String,
    pub watts_per_panel: Decimal,
    pub panel_count: u32,
    /// Baseline price per watt ("redline").
    pub base_rate: Decimal,
    pub battery_unit_price: Decimal,
    pub battery_count: u32,
    /// Per-watt markup the consultant wants when no sale price is given.
    pub consultant_margin: Decimal,
    /// Price per watt actually sold.
    pub sale_price: Decimal,
    pub client_payment: Decimal,
    pub subsidy_amount: Decimal,
    pub lead_fee: Decimal,
    pub adders: Decimal,
    pub consultant_share: ConsultantShare,
}

impl InputData {
    /// Fresh inputs for a profile: defaults applied, every user entry cleared.
    pub fn seeded(defaults: &ProfileDefaults) -> Self {
        Self {
            client_name: String::new(),
            watts_per_panel: Decimal::ZERO,
            panel_count: 0,
            base_rate: defaults.base_rate,
            battery_unit_price: defaults.battery_unit_price,
            battery_count: 0,
            consultant_margin: Decimal::ZERO,
            sale_price: Decimal::ZERO,
            client_payment: Decimal::ZERO,
            subsidy_amount: defaults.subsidy_amount,
            lead_fee: defaults.lead_fee,
            adders: Decimal::ZERO,
            consultant_share: defaults.consultant_share,
        }
    }

    /// Sale price per watt, or `None` while unset.
    pub fn sale_price_per_watt(&self) -> Option<Decimal> {
        (!self.sale_price.is_zero()).then_some(self.sale_price)
    }

    /// Client payment, or `None` while unset.
    pub fn client_payment_amount(&self) -> Option<Decimal> {
        (!self.client_payment.is_zero()).then_some(self.client_payment)
    }

    /// Applies a single field update.
    ///
    /// # Errors
    ///
    /// - [`FieldError::ReadOnly`] for `lead_fee`
    /// - [`FieldError::TypeMismatch`] when the value kind does not fit the field
    /// - [`FieldError::Negative`] for a negative amount
    pub fn update(
        &mut self,
        field: InputField,
        value: FieldValue,
    ) -> Result<(), FieldError> {
        match (field, value) {
            (InputField::LeadFee, _) => return Err(FieldError::ReadOnly(field)),
            (InputField::ClientName, FieldValue::Text(text)) => self.client_name = text,
            (InputField::PanelCount, FieldValue::Count(count)) => self.panel_count = count,
            (InputField::BatteryCount, FieldValue::Count(count)) => self.battery_count = count,
            (InputField::ConsultantShare, FieldValue::Share(share)) => {
                self.consultant_share = share
            }
            (_, FieldValue::Number(number)) => {
                if number.is_sign_negative() && !number.is_zero() {
                    return Err(FieldError::Negative {
                        field,
                        value: number,
                    });
                }
                let slot = self
                    .amount_mut(field)
                    .ok_or(FieldError::TypeMismatch {
                        field,
                        expected: field.kind(),
                    })?;
                *slot = number;
            }
            _ => {
                return Err(FieldError::TypeMismatch {
                    field,
                    expected: field.kind(),
                });
            }
        }
        Ok(())
    }

    fn amount_mut(
        &mut self,
        field: InputField,
    ) -> Option<&mut Decimal> {
        match field {
            InputField::WattsPerPanel => Some(&mut self.watts_per_panel),
            InputField::BaseRate => Some(&mut self.base_rate),
            InputField::BatteryUnitPrice => Some(&mut self.battery_unit_price),
            InputField::ConsultantMargin => Some(&mut self.consultant_margin),
            InputField::SalePrice => Some(&mut self.sale_price),
            InputField::ClientPayment => Some(&mut self.client_payment),
            InputField::SubsidyAmount => Some(&mut self.subsidy_amount),
            InputField::Adders => Some(&mut self.adders),
            InputField::ClientName
            | InputField::PanelCount
            | InputField::BatteryCount
            | InputField::LeadFee
            | InputField::ConsultantShare => None,
        }
    }
}

/// A value handed to [`InputData::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Number(Decimal),
    Count(u32),
    Share(ConsultantShare),
}

/// Names of the editable input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    ClientName,
    WattsPerPanel,
    PanelCount,
    BaseRate,
    BatteryUnitPrice,
    BatteryCount,
    ConsultantMargin,
    SalePrice,
    ClientPayment,
    SubsidyAmount,
    LeadFee,
    Adders,
    ConsultantShare,
}

/// Kind of value a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Count,
    Share,
}

impl InputField {
    pub fn all() -> &'static [InputField] {
        &[
            InputField::ClientName,
            InputField::WattsPerPanel,
            InputField::PanelCount,
            InputField::BaseRate,
            InputField::BatteryUnitPrice,
            InputField::BatteryCount,
            InputField::ConsultantMargin,
            InputField::SalePrice,
            InputField::ClientPayment,
            InputField::SubsidyAmount,
            InputField::LeadFee,
            InputField::Adders,
            InputField::ConsultantShare,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientName => "client_name",
            Self::WattsPerPanel => "watts_per_panel",
            Self::PanelCount => "panel_count",
            Self::BaseRate => "base_rate",
            Self::BatteryUnitPrice => "battery_unit_price",
            Self::BatteryCount => "battery_count",
            Self::ConsultantMargin => "consultant_margin",
            Self::SalePrice => "sale_price",
            Self::ClientPayment => "client_payment",
            Self::SubsidyAmount => "subsidy_amount",
            Self::LeadFee => "lead_fee",
            Self::Adders => "adders",
            Self::ConsultantShare => "consultant_share",
        }
    }

    pub fn value_kind(&self) -> FieldKind {
        match self {
            Self::ClientName => FieldKind::Text,
            Self::PanelCount | Self::BatteryCount => FieldKind::Count,
            Self::ConsultantShare => FieldKind::Share,
            _ => FieldKind::Number,
        }
    }

    fn kind(&self) -> &'static str {
        match self.value_kind() {
            FieldKind::Text => "text",
            FieldKind::Number => "a decimal amount",
            FieldKind::Count => "a whole count",
            FieldKind::Share => "a consultant share",
        }
    }
}

impl FromStr for InputField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for InputField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::Profile;

    fn fresh() -> InputData {
        InputData::seeded(&Profile::Other.defaults())
    }

    // =========================================================================
    // seeded tests
    // =========================================================================

    #[test]
    fn seeded_applies_profile_defaults() {
        let data = InputData::seeded(&Profile::JRamos.defaults());

        assert_eq!(data.client_name, "");
        assert_eq!(data.base_rate, dec!(1.52));
        assert_eq!(data.battery_unit_price, dec!(9000));
        assert_eq!(data.subsidy_amount, dec!(400));
        assert_eq!(data.lead_fee, dec!(150));
        assert_eq!(data.consultant_share, ConsultantShare::SixtyTwo);
        assert_eq!(data.watts_per_panel, Decimal::ZERO);
        assert_eq!(data.panel_count, 0);
        assert_eq!(data.sale_price_per_watt(), None);
        assert_eq!(data.client_payment_amount(), None);
    }

    // =========================================================================
    // update tests
    // =========================================================================

    #[test]
    fn update_sets_each_value_kind() {
        let mut data = fresh();

        data.update(InputField::ClientName, FieldValue::Text("Juan Pérez".into()))
            .unwrap();
        data.update(InputField::WattsPerPanel, FieldValue::Number(dec!(450)))
            .unwrap();
        data.update(InputField::PanelCount, FieldValue::Count(10))
            .unwrap();
        data.update(
            InputField::ConsultantShare,
            FieldValue::Share(ConsultantShare::SixtySix),
        )
        .unwrap();

        assert_eq!(data.client_name, "Juan Pérez");
        assert_eq!(data.watts_per_panel, dec!(450));
        assert_eq!(data.panel_count, 10);
        assert_eq!(data.consultant_share, ConsultantShare::SixtySix);
    }

    #[test]
    fn update_sale_price_back_to_zero_unsets_it() {
        let mut data = fresh();
        data.update(InputField::SalePrice, FieldValue::Number(dec!(3.5)))
            .unwrap();
        assert_eq!(data.sale_price_per_watt(), Some(dec!(3.5)));

        data.update(InputField::SalePrice, FieldValue::Number(dec!(0)))
            .unwrap();

        assert_eq!(data.sale_price_per_watt(), None);
    }

    #[test]
    fn update_rejects_lead_fee() {
        let mut data = fresh();

        let result = data.update(InputField::LeadFee, FieldValue::Number(dec!(0)));

        assert_eq!(result, Err(FieldError::ReadOnly(InputField::LeadFee)));
        assert_eq!(data.lead_fee, dec!(150));
    }

    #[test]
    fn update_rejects_mismatched_kind() {
        let mut data = fresh();

        let result = data.update(InputField::PanelCount, FieldValue::Number(dec!(3)));

        assert_eq!(
            result,
            Err(FieldError::TypeMismatch {
                field: InputField::PanelCount,
                expected: "a whole count",
            })
        );
    }

    #[test]
    fn update_rejects_text_for_amount() {
        let mut data = fresh();

        let result = data.update(InputField::Adders, FieldValue::Text("100".into()));

        assert!(matches!(result, Err(FieldError::TypeMismatch { .. })));
    }

    #[test]
    fn update_rejects_negative_amount() {
        let mut data = fresh();

        let result = data.update(InputField::Adders, FieldValue::Number(dec!(-5)));

        assert_eq!(
            result,
            Err(FieldError::Negative {
                field: InputField::Adders,
                value: dec!(-5),
            })
        );
        assert_eq!(data.adders, Decimal::ZERO);
    }

    // =========================================================================
    // InputField parsing tests
    // =========================================================================

    #[test]
    fn field_names_parse_back() {
        for field in InputField::all() {
            assert_eq!(field.as_str().parse::<InputField>(), Ok(*field));
        }
    }

    #[test]
    fn unknown_field_name_is_rejected() {
        assert_eq!(
            "redline".parse::<InputField>(),
            Err(FieldError::UnknownField("redline".to_string()))
        );
    }
}
