//! # Cebra - ZPL Label Printer Library
//!
//! Cebra is a Rust library for building Zebra Programming Language (ZPL II)
//! command streams. It provides:
//!
//! - **Command builder**: validated, firmware-aware ZPL commands
//! - **Firmware gate**: `V<major>.<minor>.<patch>` matching with wildcards
//! - **Label jobs**: JSON documents rendered into ZPL
//! - **Transport**: raw writes to a printer device
//!
//! ## Quick Start
//!
//! ```no_run
//! use cebra::{printer::PrinterConfig, protocol::ZplBuilder, transport::DeviceTransport};
//!
//! // Get printer configuration
//! let config = PrinterConfig::TLP2844Z;
//!
//! // Build a label for the printer's firmware
//! let mut zpl = ZplBuilder::new(config.firmware)?;
//! zpl.start_format()?;
//! zpl.change_encoding("cp850")?;
//! zpl.print_width(config.width_dots as u32)?;
//! zpl.text(300, 100, 50, 50, "Hallo")?;
//! zpl.data_matrix_at(50, 50, 9, "a5d7ffa0-fa01-4f12-be44-834ac4df2dd0")?;
//! zpl.end_format()?;
//!
//! // Send to printer
//! let mut transport = DeviceTransport::open("/dev/usb/lp0")?;
//! transport.write_all(&zpl.finalize())?;
//!
//! # Ok::<(), cebra::CebraError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ZPL command builder |
//! | [`firmware`] | Firmware versions and restrictions |
//! | [`layout`] | Composite field helpers |
//! | [`json_api`] | JSON label jobs |
//! | [`label`] | Built-in label templates |
//! | [`transport`] | Communication backends |
//! | [`printer`] | Printer configurations |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! Currently tested with:
//! - Zebra TLP 2844-Z (firmware V45.11.7ZA, 203 DPI, USB)
//!
//! Other ZPL II printers should work once their firmware version is given.

pub mod error;
pub mod firmware;
pub mod json_api;
pub mod label;
pub mod layout;
pub mod printer;
pub mod protocol;
pub mod transport;

// Re-exports for convenience
pub use error::CebraError;
pub use firmware::VersionGate;
pub use printer::PrinterConfig;
pub use protocol::ZplBuilder;
pub use transport::DeviceTransport;
