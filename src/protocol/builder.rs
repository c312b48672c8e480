//! # ZPL Builder
//!
//! [`ZplBuilder`] collects encoded commands for one label program. Each
//! named operation validates its parameters, asks the [`VersionGate`] which
//! encoding the target firmware understands, and appends exactly one chunk.
//!
//! ## Control Characters
//!
//! The prefix, control prefix and delimiter live in the builder. Commands
//! that change them (`^CC`, `^CT`, `^CD`) are encoded with the character in
//! effect *before* the change; everything after uses the new one.
//!
//! ```
//! use cebra::protocol::ZplBuilder;
//!
//! let mut zpl = ZplBuilder::new("V45.11.7ZA")?;
//! zpl.change_command_prefix('!')?;
//! zpl.start_format()?;
//! assert_eq!(zpl.finalize(), b"^CC!!XA");
//! # Ok::<(), cebra::CebraError>(())
//! ```
//!
//! ## Atomicity
//!
//! Operations either append one chunk or return an error and leave the
//! builder untouched.

use tracing::{debug, trace};

use super::command::{self, Arg, COMMA, CARET, CommandKind, TILDE};
use crate::error::{CebraError, Result};
use crate::firmware::{FirmwareVersion, Variant, VersionGate};

/// Largest coordinate or dimension ZPL accepts
pub const MAX_DOTS: u32 = 32000;

/// Longest `^FD` payload
pub const MAX_FIELD_DATA: usize = 3072;

/// Firmware that accepts the justification parameter on `^FO` / `^FT`
pub const FIELD_JUSTIFICATION: &[&str] = &["V60.14.x", "V50.14.x"];

// ============================================================================
// PARAMETER TYPES
// ============================================================================

/// Field orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Normal
    #[default]
    Normal,
    /// Rotated 90° clockwise
    Rotated,
    /// Inverted 180°
    Inverted,
    /// Read from bottom up, 270°
    Bottom,
}

impl Orientation {
    pub fn as_char(self) -> char {
        match self {
            Self::Normal => 'N',
            Self::Rotated => 'R',
            Self::Inverted => 'I',
            Self::Bottom => 'B',
        }
    }
}

impl TryFrom<char> for Orientation {
    type Error = CebraError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'N' => Ok(Self::Normal),
            'R' => Ok(Self::Rotated),
            'I' => Ok(Self::Inverted),
            'B' => Ok(Self::Bottom),
            other => Err(CebraError::invalid(
                "orientation",
                format!("'{}' is not one of N, R, I, B", other),
            )),
        }
    }
}

/// Line color for `^GB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineColor {
    #[default]
    Black,
    White,
}

impl LineColor {
    pub fn as_char(self) -> char {
        match self {
            Self::Black => 'B',
            Self::White => 'W',
        }
    }
}

impl TryFrom<char> for LineColor {
    type Error = CebraError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'B' => Ok(Self::Black),
            'W' => Ok(Self::White),
            other => Err(CebraError::invalid(
                "graphic_box",
                format!("color '{}' is not B or W", other),
            )),
        }
    }
}

/// Media type for `^MT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    /// Thermal transfer (ribbon)
    ThermalTransfer,
    /// Direct thermal
    DirectThermal,
}

impl MediaType {
    pub fn as_char(self) -> char {
        match self {
            Self::ThermalTransfer => 'T',
            Self::DirectThermal => 'D',
        }
    }
}

impl TryFrom<char> for MediaType {
    type Error = CebraError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'T' => Ok(Self::ThermalTransfer),
            'D' => Ok(Self::DirectThermal),
            other => Err(CebraError::invalid(
                "media_type",
                format!("'{}' is not T or D", other),
            )),
        }
    }
}

/// Payload for `^FD`: text or pre-encoded bytes.
#[derive(Debug, Clone, Copy)]
pub enum FieldPayload<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
}

impl FieldPayload<'_> {
    /// Length in characters (text) or bytes.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.chars().count(),
            Self::Bytes(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }
}

impl<'a> From<&'a str> for FieldPayload<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for FieldPayload<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a [u8]> for FieldPayload<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for FieldPayload<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for FieldPayload<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldPosition {
    WithJustification,
    Legacy,
}

const FIELD_POSITION_FORMS: &[Variant<FieldPosition>] = &[Variant {
    requires: FIELD_JUSTIFICATION,
    form: FieldPosition::WithJustification,
}];

// ============================================================================
// VALIDATION HELPERS
// ============================================================================

pub(crate) fn check_range<T>(command: &'static str, field: &str, value: T, min: T, max: T) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if value < min || value > max {
        return Err(CebraError::invalid(
            command,
            format!("{} {} is outside {}..={}", field, value, min, max),
        ));
    }
    Ok(value)
}

pub(crate) fn check_control_char(command: &'static str, c: char) -> Result<u8> {
    if !c.is_ascii_graphic() {
        return Err(CebraError::invalid(
            command,
            format!("{:?} is not a printable ASCII character", c),
        ));
    }
    Ok(c as u8)
}

// ============================================================================
// BUILDER
// ============================================================================

/// Accumulates encoded ZPL commands for one label program.
#[derive(Debug, Clone)]
pub struct ZplBuilder {
    gate: VersionGate,
    chunks: Vec<Vec<u8>>,
    prefix: u8,
    control_prefix: u8,
    delimiter: u8,
}

impl ZplBuilder {
    /// Create a builder targeting the given firmware (e.g. `"V45.11.7ZA"`).
    pub fn new(firmware: &str) -> Result<Self> {
        Ok(Self {
            gate: VersionGate::new(firmware)?,
            chunks: Vec::new(),
            prefix: CARET,
            control_prefix: TILDE,
            delimiter: COMMA,
        })
    }

    pub fn firmware(&self) -> &FirmwareVersion {
        self.gate.firmware()
    }

    pub fn gate(&self) -> &VersionGate {
        &self.gate
    }

    /// Current format command prefix.
    pub fn prefix(&self) -> char {
        self.prefix as char
    }

    /// Current control command prefix.
    pub fn control_prefix(&self) -> char {
        self.control_prefix as char
    }

    /// Current argument delimiter.
    pub fn delimiter(&self) -> char {
        self.delimiter as char
    }

    /// Encoded commands in emission order.
    pub fn chunks(&self) -> &[Vec<u8>] {
        &self.chunks
    }

    /// Concatenate all chunks into the final byte stream.
    ///
    /// Calling this does not consume or change the builder.
    pub fn finalize(&self) -> Vec<u8> {
        self.chunks.concat()
    }

    /// Encode one command with the current control characters and append it.
    pub fn emit(&mut self, kind: CommandKind, mnemonic: &str, args: &[Arg<'_>]) -> Result<()> {
        let prefix = match kind {
            CommandKind::Format => self.prefix,
            CommandKind::Control => self.control_prefix,
        };
        let chunk = command::encode(prefix, self.delimiter, mnemonic, args)?;
        trace!(chunk = %String::from_utf8_lossy(&chunk), "emit");
        self.chunks.push(chunk);
        Ok(())
    }

    fn format(&mut self, mnemonic: &str, args: &[Arg<'_>]) -> Result<()> {
        self.emit(CommandKind::Format, mnemonic, args)
    }

    // ===== Format Bracketing =====

    /// `^XA` - start of a label format.
    pub fn start_format(&mut self) -> Result<()> {
        self.format("XA", &[])
    }

    /// `^XZ` - end of a label format.
    pub fn end_format(&mut self) -> Result<()> {
        self.format("XZ", &[])
    }

    // ===== Control Characters =====

    /// `^CC` - change the format command prefix.
    pub fn change_command_prefix(&mut self, prefix: char) -> Result<()> {
        let byte = check_control_char("change_command_prefix", prefix)?;
        self.format("CC", &[Arg::from(prefix)])?;
        self.prefix = byte;
        Ok(())
    }

    /// `^CT` - change the control command prefix.
    pub fn change_control_prefix(&mut self, prefix: char) -> Result<()> {
        let byte = check_control_char("change_control_prefix", prefix)?;
        self.format("CT", &[Arg::from(prefix)])?;
        self.control_prefix = byte;
        Ok(())
    }

    /// `^CD` - change the argument delimiter.
    pub fn change_delimiter(&mut self, delimiter: char) -> Result<()> {
        let byte = check_control_char("change_delimiter", delimiter)?;
        self.format("CD", &[Arg::from(delimiter)])?;
        self.delimiter = byte;
        Ok(())
    }

    // ===== Fonts =====

    /// `^A` - scalable/bitmapped font for the next field.
    ///
    /// `font` is a single `A`–`Z` or `0`–`9` font name.
    pub fn scalable_font(
        &mut self,
        font: char,
        orientation: Orientation,
        height: u32,
        width: u32,
    ) -> Result<()> {
        const COMMAND: &str = "scalable_font";
        if !(font.is_ascii_uppercase() || font.is_ascii_digit()) {
            return Err(CebraError::invalid(
                COMMAND,
                format!("font {:?} is not A-Z or 0-9", font),
            ));
        }
        check_range(COMMAND, "height", height, 1, MAX_DOTS)?;
        check_range(COMMAND, "width", width, 1, MAX_DOTS)?;

        let mnemonic = format!("A{}", font);
        self.format(
            &mnemonic,
            &[Arg::from(orientation.as_char()), Arg::from(height), Arg::from(width)],
        )
    }

    // ===== Field Positioning =====

    /// `^FO` - field origin.
    ///
    /// `justification` (0 left, 1 right, 2 auto) is only sent to firmware
    /// that understands it and is dropped otherwise.
    pub fn field_origin(&mut self, x: u32, y: u32, justification: u8) -> Result<()> {
        self.field_position("field_origin", "FO", x, y, justification)
    }

    /// `^FT` - field typeset (baseline positioning).
    pub fn field_typeset(&mut self, x: u32, y: u32, justification: u8) -> Result<()> {
        self.field_position("field_typeset", "FT", x, y, justification)
    }

    fn field_position(
        &mut self,
        command: &'static str,
        mnemonic: &str,
        x: u32,
        y: u32,
        justification: u8,
    ) -> Result<()> {
        check_range(command, "x", x, 0, MAX_DOTS)?;
        check_range(command, "y", y, 0, MAX_DOTS)?;
        check_range(command, "justification", justification, 0, 2)?;

        match self.gate.select(FIELD_POSITION_FORMS, &FieldPosition::Legacy)? {
            FieldPosition::WithJustification => {
                self.format(mnemonic, &[Arg::from(x), Arg::from(y), Arg::from(justification)])
            }
            FieldPosition::Legacy => {
                debug!(
                    firmware = %self.gate.firmware(),
                    "^{} without justification parameter",
                    mnemonic
                );
                self.format(mnemonic, &[Arg::from(x), Arg::from(y)])
            }
        }
    }

    /// `^LH` - label home (offset applied to all field origins).
    pub fn label_home(&mut self, x: u32, y: u32) -> Result<()> {
        check_range("label_home", "x", x, 0, MAX_DOTS)?;
        check_range("label_home", "y", y, 0, MAX_DOTS)?;
        self.format("LH", &[Arg::from(x), Arg::from(y)])
    }

    /// `^LT` - shift the whole label vertically by -120..=120 dot rows.
    pub fn label_top(&mut self, offset: i32) -> Result<()> {
        check_range("label_top", "offset", offset, -120, 120)?;
        self.format("LT", &[Arg::from(offset)])
    }

    /// `^PW` - print width in dots.
    pub fn print_width(&mut self, width: u32) -> Result<()> {
        if width < 2 {
            return Err(CebraError::invalid(
                "print_width",
                format!("width {} is below 2", width),
            ));
        }
        self.format("PW", &[Arg::from(width)])
    }

    // ===== Field Data =====

    /// `^FD` - field data, sent verbatim.
    ///
    /// Text is written as UTF-8; pass bytes for any other character set.
    /// At most 3072 characters (text) or bytes.
    pub fn field_data<'a>(&mut self, data: impl Into<FieldPayload<'a>>) -> Result<()> {
        let data = data.into();
        if data.len() > MAX_FIELD_DATA {
            return Err(CebraError::invalid(
                "field_data",
                format!("{} elements exceed the {} limit", data.len(), MAX_FIELD_DATA),
            ));
        }
        self.format("FD", &[Arg::from(data.as_bytes())])
    }

    /// `^FS` - field separator, ends the current field.
    pub fn field_separator(&mut self) -> Result<()> {
        self.format("FS", &[])
    }

    // ===== Graphics =====

    /// `^GB` - graphic box.
    ///
    /// Width and height must be at least `thickness`; a box whose width or
    /// height equals its thickness draws as a solid line.
    pub fn graphic_box(
        &mut self,
        width: u32,
        height: u32,
        thickness: u32,
        color: LineColor,
        rounding: u8,
    ) -> Result<()> {
        const COMMAND: &str = "graphic_box";
        check_range(COMMAND, "thickness", thickness, 1, MAX_DOTS)?;
        check_range(COMMAND, "width", width, thickness, MAX_DOTS)?;
        check_range(COMMAND, "height", height, thickness, MAX_DOTS)?;
        check_range(COMMAND, "rounding", rounding, 0, 8)?;

        self.format(
            "GB",
            &[
                Arg::from(width),
                Arg::from(height),
                Arg::from(thickness),
                Arg::from(color.as_char()),
                Arg::from(rounding),
            ],
        )
    }

    // ===== Media & Print Control =====

    /// `^MT` - media type.
    pub fn media_type(&mut self, media: MediaType) -> Result<()> {
        self.format("MT", &[Arg::from(media.as_char())])
    }

    /// `^PQ` - number of labels to print.
    pub fn print_quantity(&mut self, quantity: u32) -> Result<()> {
        check_range("print_quantity", "quantity", quantity, 1, 99_999_999)?;
        self.format("PQ", &[Arg::from(quantity)])
    }
}

// ============================================================================
// TESTS
// ============================================================================
