pub mod app;
pub mod clipboard;
pub mod config;
pub mod csv_loader;
pub mod logging;
pub mod utils;
