//! Sales-cut calculation modules.
//!
//! This module provides the calculation engine, the decimal formatting it
//! relies on, and the presenter that turns raw results into display strings.

pub mod common;
pub mod engine;
pub mod results;

pub use engine::{
    CalculationResult, InstallerSplit, InstallerSplitTerms, NET_PROFIT_FACTOR, SalesCutEngine,
    compute,
};
pub use results::{SalesResults, SplitResults, present};
