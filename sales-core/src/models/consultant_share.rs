use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a percentage is not one of the allowed consultant shares.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsultantShareError {
    #[error("consultant share must be one of 50, 60, 62, 64, 66; got {0}")]
    NotAllowed(u32),

    #[error("consultant share slider position {0} is out of range")]
    InvalidIndex(usize),
}

/// Consultant percentage of the distributable amount in the installer split.
///
/// The business only allows five fixed points; the manager receives the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ConsultantShare {
    Fifty,
    Sixty,
    #[default]
    SixtyTwo,
    SixtyFour,
    SixtySix,
}

impl ConsultantShare {
    /// All allowed shares in slider order.
    pub const ALL: [ConsultantShare; 5] = [
        Self::Fifty,
        Self::Sixty,
        Self::SixtyTwo,
        Self::SixtyFour,
        Self::SixtySix,
    ];

    /// Maps a slider position to its share.
    pub fn from_index(index: usize) -> Result<Self, ConsultantShareError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(ConsultantShareError::InvalidIndex(index))
    }

    /// Slider position of this share.
    pub fn index(&self) -> usize {
        match self {
            Self::Fifty => 0,
            Self::Sixty => 1,
            Self::SixtyTwo => 2,
            Self::SixtyFour => 3,
            Self::SixtySix => 4,
        }
    }

    /// Consultant percentage as a whole number.
    pub fn percent(&self) -> u32 {
        match self {
            Self::Fifty => 50,
            Self::Sixty => 60,
            Self::SixtyTwo => 62,
            Self::SixtyFour => 64,
            Self::SixtySix => 66,
        }
    }

    /// Manager percentage, `100 - percent()`.
    pub fn manager_percent(&self) -> u32 {
        100 - self.percent()
    }

    /// Consultant fraction of the distributable amount (`0.62` for 62%).
    pub fn fraction(&self) -> Decimal {
        Decimal::from(self.percent()) / Decimal::ONE_HUNDRED
    }
}

impl TryFrom<u32> for ConsultantShare {
    type Error = ConsultantShareError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|share| share.percent() == value)
            .ok_or(ConsultantShareError::NotAllowed(value))
    }
}

impl From<ConsultantShare> for u32 {
    fn from(share: ConsultantShare) -> Self {
        share.percent()
    }
}
