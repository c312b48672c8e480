//! # Printer Module
//!
//! This module provides printer-specific configurations.
//!
//! ## Modules
//!
//! - [`config`]: Printer hardware and firmware profiles

pub mod config;

pub use config::PrinterConfig;
