//! Commission and pricing calculator for solar-equipment sales.
//!
//! Inputs for one sale live in a [`SalesSession`] seeded from the active
//! [`Profile`]. The [`calculations`] module derives sizes, costs and
//! commissions, and [`summary`] renders the copy-paste report.

pub mod accounts;
pub mod calculations;
pub mod models;
pub mod session;
pub mod summary;

pub use accounts::{Account, AccountBook};
pub use calculations::{CalculationResult, SalesCutEngine, SalesResults};
pub use models::*;
pub use session::SalesSession;
pub use summary::Clipboard;
