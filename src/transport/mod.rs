//! # Printer Transport Layer
//!
//! This module provides communication backends for sending data to printers.
//!
//! ## Available Transports
//!
//! - [`device`]: Raw writes to a printer device node (USB `lp`, serial)
//!
//! ## Future Transports
//!
//! - Network (TCP port 9100)

pub mod device;

pub use device::DeviceTransport;
