//! # ZPL Protocol Implementation
//!
//! This module provides the command builder for the Zebra Programming
//! Language (ZPL II) used by Zebra label printers.
//!
//! ## Module Structure
//!
//! - [`command`]: Chunk encoding (prefix, mnemonic, delimited arguments)
//! - [`builder`]: [`ZplBuilder`] and the field, font and layout commands
//! - [`barcode`]: Data Matrix (`^BX`)
//! - [`encoding`]: International font encoding (`^CI`) table
//! - [`graphics`]: Graphic fields (`^GF`) and bitmap packing
//! - [`cp850`]: CP850 text encoder
//!
//! ## Usage Example
//!
//! ```
//! use cebra::protocol::{Orientation, ZplBuilder};
//!
//! let mut zpl = ZplBuilder::new("V45.11.7ZA")?;
//! zpl.start_format()?;
//! zpl.field_origin(300, 100, 0)?;
//! zpl.scalable_font('0', Orientation::Normal, 50, 50)?;
//! zpl.field_data("Hallo")?;
//! zpl.field_separator()?;
//! zpl.end_format()?;
//!
//! assert_eq!(zpl.finalize(), b"^XA^FO300,100^A0N,50,50^FDHallo^FS^XZ");
//! # Ok::<(), cebra::CebraError>(())
//! ```
//!
//! ## Protocol Reference
//!
//! Based on the "ZPL II Programming Guide" by Zebra Technologies.

pub mod barcode;
pub mod builder;
pub mod command;
pub mod cp850;
pub mod encoding;
pub mod graphics;

pub use barcode::DataMatrix;
pub use builder::{FieldPayload, LineColor, MediaType, Orientation, ZplBuilder};
pub use command::{Arg, CommandKind};
pub use encoding::{CHARACTER_SETS, CharacterSet, character_set};
pub use graphics::{Bitmap, GraphicFormat};
