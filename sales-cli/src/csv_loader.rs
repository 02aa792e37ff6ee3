//! CSV loader for batches of sales inputs.
//!
//! ## CSV Format
//!
//! Each row describes one sale. Column names are the input field names;
//! column order does not matter and every column is optional. Empty cells
//! leave the profile default in place.
//!
//! | Column | Type | Notes |
//! |----------------------|---------|------------------------------------------|
//! | `client_name` | string | |
//! | `watts_per_panel` | decimal | e.g. `450` |
//! | `panel_count` | integer | fractional input is truncated |
//! | `base_rate` | decimal | price per watt baseline |
//! | `battery_unit_price` | decimal | |
//! | `battery_count` | integer | |
//! | `consultant_margin` | decimal | used only without `sale_price` |
//! | `sale_price` | decimal | `0` or empty means "not set" |
//! | `client_payment` | decimal | |
//! | `subsidy_amount` | decimal | |
//! | `adders` | decimal | |
//! | `consultant_share` | integer | one of `50`, `60`, `62`, `64`, `66` |
//!
//! Invalid decimals are read as `0`, the same as typed input.
//!
//! ### Example
//!
//! ```csv
//! client_name,watts_per_panel,panel_count,battery_count,sale_price
//! Juan Pérez,450,10,2,3.5
//! Ana Ruiz,400,12,,
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sales_core::{FieldError, FieldValue, InputField, Profile, SalesSession};
use serde::Deserialize;

use crate::utils::{AssignmentError, field_value};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct CsvRow {
    client_name: Option<String>,
    watts_per_panel: Option<String>,
    panel_count: Option<String>,
    base_rate: Option<String>,
    battery_unit_price: Option<String>,
    battery_count: Option<String>,
    consultant_margin: Option<String>,
    sale_price: Option<String>,
    client_payment: Option<String>,
    subsidy_amount: Option<String>,
    adders: Option<String>,
    consultant_share: Option<String>,
}

impl CsvRow {
    /// Non-empty cells paired with the field they fill, in field order.
    fn cells(&self) -> Vec<(InputField, &str)> {
        [
            (InputField::ClientName, &self.client_name),
            (InputField::WattsPerPanel, &self.watts_per_panel),
            (InputField::PanelCount, &self.panel_count),
            (InputField::BaseRate, &self.base_rate),
            (InputField::BatteryUnitPrice, &self.battery_unit_price),
            (InputField::BatteryCount, &self.battery_count),
            (InputField::ConsultantMargin, &self.consultant_margin),
            (InputField::SalePrice, &self.sale_price),
            (InputField::ClientPayment, &self.client_payment),
            (InputField::SubsidyAmount, &self.subsidy_amount),
            (InputField::Adders, &self.adders),
            (InputField::ConsultantShare, &self.consultant_share),
        ]
        .into_iter()
        .filter_map(|(field, cell)| {
            cell.as_deref()
                .filter(|value| !value.trim().is_empty())
                .map(|value| (field, value))
        })
        .collect()
    }
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("could not open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: {source}")]
    Value {
        row: usize,
        #[source]
        source: AssignmentError,
    },

    #[error("row {row}: {source}")]
    Rejected {
        row: usize,
        #[source]
        source: FieldError,
    },
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Field updates for one CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesRow {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub updates: Vec<(InputField, FieldValue)>,
}

impl SalesRow {
    /// Builds a fresh session for `profile` with this row applied.
    pub fn to_session(
        &self,
        profile: Profile,
    ) -> Result<SalesSession, CsvLoadError> {
        let mut session = SalesSession::new(profile);
        for (field, value) in &self.updates {
            session
                .update(*field, value.clone())
                .map_err(|source| CsvLoadError::Rejected {
                    row: self.row,
                    source,
                })?;
        }
        Ok(session)
    }
}

/// Parse every row from a reader.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<SalesRow>, CsvLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();

    for (index, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let record = result?;
        let row = index + 1;
        let updates = record
            .cells()
            .into_iter()
            .map(|(field, raw)| {
                field_value(field, raw)
                    .map(|value| (field, value))
                    .map_err(|source| CsvLoadError::Value { row, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(SalesRow { row, updates });
    }

    tracing::debug!(rows = rows.len(), "loaded sales rows");
    Ok(rows)
}

/// Convenience wrapper that opens a file by path.
pub fn load_from_file(path: &Path) -> Result<Vec<SalesRow>, CsvLoadError> {
    let file = File::open(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_reader(file)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
