use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ConsultantShare;

/// Partner organization a user signs in as.
///
/// Profiles are resolved from an opaque identifier handed over by the
/// identity provider. Unknown identifiers fall back to [`Profile::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Profile {
    Horizon,
    Elias,
    RrAdvisor,
    JRamos,
    #[default]
    Other,
}

/// Which formula set the calculation engine applies for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileVariant {
    /// Equipment cost from the editable base rate, flat 10% net-profit deduction.
    Standard,
    /// Contractually fixed pricing, gross profit split between installer,
    /// consultant and manager.
    InstallerSplit,
}

/// Values an input session is seeded with for a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDefaults {
    pub base_rate: Decimal,
    pub battery_unit_price: Decimal,
    pub subsidy_amount: Decimal,
    pub lead_fee: Decimal,
    pub consultant_share: ConsultantShare,
}

impl Profile {
    /// Every profile with a dedicated defaults row, followed by the fallback.
    pub const ALL: [Profile; 5] = [
        Self::Horizon,
        Self::Elias,
        Self::RrAdvisor,
        Self::JRamos,
        Self::Other,
    ];

    /// Resolves an identity-provider key to a profile.
    ///
    /// Matching is exact and case-sensitive. `None` and unknown keys
    /// silently resolve to [`Profile::Other`].
    ///
    /// ```
    /// use sales_core::Profile;
    ///
    /// assert_eq!(Profile::resolve(Some("RR-Advisor")), Profile::RrAdvisor);
    /// assert_eq!(Profile::resolve(Some("horizon")), Profile::Other);
    /// assert_eq!(Profile::resolve(None), Profile::Other);
    /// ```
    pub fn resolve(id: Option<&str>) -> Self {
        match id {
            Some("Horizon") => Self::Horizon,
            Some("Elias") => Self::Elias,
            Some("RR-Advisor") => Self::RrAdvisor,
            Some("JRamos") => Self::JRamos,
            _ => Self::Other,
        }
    }

    /// Canonical identifier for this profile.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Horizon => "Horizon",
            Self::Elias => "Elias",
            Self::RrAdvisor => "RR-Advisor",
            Self::JRamos => "JRamos",
            Self::Other => "default",
        }
    }

    pub fn variant(&self) -> ProfileVariant {
        match self {
            Self::JRamos => ProfileVariant::InstallerSplit,
            Self::Horizon | Self::Elias | Self::RrAdvisor | Self::Other => {
                ProfileVariant::Standard
            }
        }
    }

    /// Whether the summary carries a "payment with subsidy" line.
    pub fn has_subsidy(&self) -> bool {
        matches!(self, Self::Horizon)
    }

    /// Default row for this profile.
    ///
    /// Subsidy, lead fee and consultant share are seeded identically for
    /// every profile; only the profiles whose formulas read them are
    /// affected by their values.
    pub fn defaults(&self) -> ProfileDefaults {
        let (base_rate, battery_unit_price) = match self {
            Self::Horizon | Self::Elias => (Decimal::new(210, 2), Decimal::new(11200, 0)),
            Self::RrAdvisor => (Decimal::new(220, 2), Decimal::new(11200, 0)),
            Self::JRamos => (Decimal::new(152, 2), Decimal::new(9000, 0)),
            Self::Other => (Decimal::new(235, 2), Decimal::new(11200, 0)),
        };

        ProfileDefaults {
            base_rate,
            battery_unit_price,
            subsidy_amount: Decimal::new(400, 0),
            lead_fee: Decimal::new(150, 0),
            consultant_share: ConsultantShare::default(),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.id())
    }
}
