//! In-memory sales session.
//!
//! A session owns the inputs entered for one sale under one profile. Every
//! read of the results recomputes them from the current snapshot; nothing
//! derived is stored.

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::calculations::{CalculationResult, SalesCutEngine, SalesResults, present};
use crate::models::{FieldError, FieldValue, InputData, InputField, Profile};
use crate::summary::{Clipboard, copy_summary, render_summary};

/// Inputs for one sale under one profile.
///
/// ```
/// use rust_decimal_macros::dec;
/// use sales_core::{FieldValue, InputField, Profile, SalesSession};
///
/// let mut session = SalesSession::new(Profile::Horizon);
/// session.update(InputField::WattsPerPanel, FieldValue::Number(dec!(450))).unwrap();
/// session.update(InputField::PanelCount, FieldValue::Count(10)).unwrap();
///
/// assert_eq!(session.results().size_kw, "4.5");
///
/// session.reset();
/// assert_eq!(session.results().size_kw, "0");
/// ```
#[derive(Debug, Clone)]
pub struct SalesSession {
    profile: Profile,
    engine: SalesCutEngine,
    data: InputData,
}

impl SalesSession {
    /// Starts a session seeded with the profile's defaults.
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            engine: SalesCutEngine::new(profile),
            data: InputData::seeded(&profile.defaults()),
        }
    }

    /// Starts a session for an opaque profile identifier.
    pub fn for_profile_id(profile_id: Option<&str>) -> Self {
        Self::new(Profile::resolve(profile_id))
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn data(&self) -> &InputData {
        &self.data
    }

    /// Updates one input field.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] when the update is rejected; the inputs are
    /// left unchanged.
    pub fn update(
        &mut self,
        field: InputField,
        value: FieldValue,
    ) -> Result<(), FieldError> {
        debug!(profile = %self.profile, %field, ?value, "updating field");
        self.data.update(field, value)
    }

    pub fn calculations(&self) -> CalculationResult {
        self.engine.calculate(&self.data)
    }

    pub fn results(&self) -> SalesResults {
        present(&self.calculations())
    }

    /// Renders the copy-paste summary dated `date`.
    pub fn summary(
        &self,
        date: NaiveDate,
    ) -> String {
        render_summary(&self.data, &self.calculations(), self.profile, date)
    }

    /// Renders today's summary, writes it to `clipboard` and returns it.
    pub fn copy_summary(
        &self,
        clipboard: &dyn Clipboard,
    ) -> String {
        copy_summary(
            clipboard,
            &self.data,
            &self.calculations(),
            self.profile,
            Local::now().date_naive(),
        )
    }

    /// Restores the inputs to the profile's defaults, clearing every entry.
    pub fn reset(&mut self) {
        debug!(profile = %self.profile, "resetting session");
        self.data = InputData::seeded(&self.profile.defaults());
    }
}
