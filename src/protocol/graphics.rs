//! # ZPL Graphic Field (`^GF`)
//!
//! This module packs monochrome images and encodes them for the `^GF`
//! command.
//!
//! ## Bit Packing
//!
//! Rows are packed MSB first, one bit per dot, padded to a whole byte:
//! - Bit 7 (MSB) = leftmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! ```
//!
//! ## ASCII Hex Compression
//!
//! In ASCII (`A`) format every byte is two hex digits. ZPL can shrink this
//! with run-length codes placed before a hex digit:
//!
//! | Code | Repeat count |
//! |------|--------------|
//! | `G`–`Y` | 1–19 |
//! | `g`–`z` | 20–400, steps of 20 |
//! | `,` | fill rest of row with `0` |
//! | `!` | fill rest of row with `F` |
//! | `:` | repeat previous row |
//!
//! `hB` means 40 `B`s, `gGF` means 21 `F`s.

use image::GrayImage;

use super::builder::{ZplBuilder, check_range};
use super::command::{Arg, CommandKind};
use crate::error::{CebraError, Result};

/// Largest `^GF` byte count
pub const MAX_GRAPHIC_BYTES: u32 = 99_999;

/// Payload format of a `^GF` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicFormat {
    /// `A`: ASCII hex, optionally compressed
    Ascii,
    /// `B`: raw binary bytes
    Binary,
}

impl GraphicFormat {
    pub fn as_char(self) -> char {
        match self {
            Self::Ascii => 'A',
            Self::Binary => 'B',
        }
    }
}

impl TryFrom<char> for GraphicFormat {
    type Error = CebraError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'A' => Ok(Self::Ascii),
            'B' => Ok(Self::Binary),
            other => Err(CebraError::invalid(
                "graphic_field",
                format!("format '{}' is not A or B", other),
            )),
        }
    }
}

fn is_ascii_graphic_byte(b: u8) -> bool {
    matches!(b, b'0'..=b'9' | b'A'..=b'F' | b'a'..=b'f' | b'G'..=b'Y' | b'g'..=b'z' | b',' | b'!' | b':')
}

// ============================================================================
// BITMAP
// ============================================================================

/// A packed 1-bit image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Wrap already packed rows.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width.div_ceil(8) as usize * height as usize;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(CebraError::invalid(
                "bitmap",
                format!(
                    "{}x{} bitmap needs {} bytes, got {}",
                    width,
                    height,
                    expected,
                    data.len()
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a bitmap from a predicate returning `true` for black dots.
    pub fn from_fn(width: u32, height: u32, is_black: impl Fn(u32, u32) -> bool) -> Self {
        let row_bytes = width.div_ceil(8) as usize;
        let mut data = vec![0u8; row_bytes * height as usize];
        for y in 0..height {
            for x in 0..width {
                if is_black(x, y) {
                    data[y as usize * row_bytes + x as usize / 8] |= 0x80 >> (x % 8);
                }
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Threshold a grayscale image: pixels darker than `threshold` print.
    pub fn from_luma(image: &GrayImage, threshold: u8) -> Self {
        Self::from_fn(image.width(), image.height(), |x, y| {
            image.get_pixel(x, y).0[0] < threshold
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per packed row.
    pub fn row_bytes(&self) -> u32 {
        self.width.div_ceil(8)
    }

    /// Total packed bytes.
    pub fn total_bytes(&self) -> u32 {
        self.data.len() as u32
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn rows(&self) -> std::slice::Chunks<'_, u8> {
        self.data.chunks(self.row_bytes().max(1) as usize)
    }

    /// Uncompressed ASCII hex payload.
    pub fn to_hex(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * 2);
        for byte in &self.data {
            push_hex(&mut out, *byte);
        }
        out
    }

    /// ZPL-compressed ASCII hex payload.
    pub fn to_compressed_hex(&self) -> Vec<u8> {
        let mut out = Vec::new();
        let mut previous: Option<&[u8]> = None;
        for row in self.rows() {
            if previous == Some(row) {
                out.push(b':');
            } else {
                compress_row(&mut out, row);
            }
            previous = Some(row);
        }
        out
    }
}

fn push_hex(out: &mut Vec<u8>, byte: u8) {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    out.push(DIGITS[(byte >> 4) as usize]);
    out.push(DIGITS[(byte & 0x0F) as usize]);
}

fn compress_row(out: &mut Vec<u8>, row: &[u8]) {
    let mut hex = Vec::with_capacity(row.len() * 2);
    for byte in row {
        push_hex(&mut hex, *byte);
    }

    // Trailing run of 0 or F collapses to a fill code
    let last = hex[hex.len() - 1];
    let trailing = hex.iter().rev().take_while(|&&d| d == last).count();
    let (body, fill) = match last {
        b'0' if trailing >= 2 => (&hex[..hex.len() - trailing], Some(b',')),
        b'F' if trailing >= 2 => (&hex[..hex.len() - trailing], Some(b'!')),
        _ => (&hex[..], None),
    };

    let mut i = 0;
    while i < body.len() {
        let digit = body[i];
        let run = body[i..].iter().take_while(|&&d| d == digit).count();
        push_run(out, digit, run);
        i += run;
    }
    if let Some(code) = fill {
        out.push(code);
    }
}

fn push_run(out: &mut Vec<u8>, digit: u8, mut run: usize) {
    while run > 0 {
        let n = run.min(400);
        run -= n;
        if n > 1 {
            let twenties = n / 20;
            let ones = n % 20;
            if twenties > 0 {
                out.push(b'g' + (twenties - 1) as u8);
            }
            if ones > 0 {
                out.push(b'G' + (ones - 1) as u8);
            }
        }
        out.push(digit);
    }
}

impl ZplBuilder {
    /// `^GF` - graphic field.
    ///
    /// `data` is passed through unchanged. For [`GraphicFormat::Binary`] it
    /// must be exactly `total_bytes` long; for [`GraphicFormat::Ascii`] it
    /// may only contain hex digits and compression codes.
    pub fn graphic_field(
        &mut self,
        format: GraphicFormat,
        total_bytes: u32,
        row_bytes: u32,
        data: &[u8],
    ) -> Result<()> {
        const COMMAND: &str = "graphic_field";
        check_range(COMMAND, "total_bytes", total_bytes, 1, MAX_GRAPHIC_BYTES)?;
        check_range(COMMAND, "row_bytes", row_bytes, 1, total_bytes)?;
        if total_bytes % row_bytes != 0 {
            return Err(CebraError::invalid(
                COMMAND,
                format!("{} bytes is not a whole number of {}-byte rows", total_bytes, row_bytes),
            ));
        }

        match format {
            GraphicFormat::Binary if data.len() != total_bytes as usize => {
                return Err(CebraError::invalid(
                    COMMAND,
                    format!("binary payload is {} bytes, expected {}", data.len(), total_bytes),
                ));
            }
            GraphicFormat::Ascii if data.is_empty() || !data.iter().all(|&b| is_ascii_graphic_byte(b)) => {
                return Err(CebraError::invalid(
                    COMMAND,
                    "ASCII payload must be non-empty hex digits or compression codes",
                ));
            }
            _ => {}
        }

        self.emit(
            CommandKind::Format,
            "GF",
            &[
                Arg::from(format.as_char()),
                Arg::from(total_bytes),
                Arg::from(total_bytes),
                Arg::from(row_bytes),
                Arg::from(data),
            ],
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_packs_msb_first() {
        // 10 dots wide: 2 bytes per row
        let bitmap = Bitmap::from_fn(10, 1, |x, _| x == 0 || x == 9);
        assert_eq!(bitmap.data(), &[0x80, 0x40]);
        assert_eq!(bitmap.row_bytes(), 2);
    }

    #[test]
    fn test_new_checks_length() {
        assert!(Bitmap::new(16, 2, vec![0; 4]).is_ok());
        assert!(Bitmap::new(16, 2, vec![0; 3]).is_err());
        assert!(Bitmap::new(0, 2, vec![]).is_err());
    }

    #[test]
    fn test_from_luma_threshold() {
        let image = GrayImage::from_fn(8, 1, |x, _| image::Luma([if x < 4 { 0 } else { 255 }]));
        let bitmap = Bitmap::from_luma(&image, 128);
        assert_eq!(bitmap.data(), &[0xF0]);
    }

    #[test]
    fn test_to_hex() {
        let bitmap = Bitmap::new(16, 1, vec![0x0F, 0xA5]).unwrap();
        assert_eq!(bitmap.to_hex(), b"0FA5");
    }

    #[test]
    fn test_compression_fill_codes() {
        // 4 bytes per row
        let bitmap = Bitmap::new(32, 3, vec![
            0x00, 0x00, 0x00, 0x00, // all white
            0xFF, 0xFF, 0xFF, 0xFF, // all black
            0xA0, 0x00, 0x00, 0x00, // A then zeros
        ])
        .unwrap();
        assert_eq!(bitmap.to_compressed_hex(), b",!A,");
    }

    #[test]
    fn test_compression_repeat_previous_row() {
        let bitmap = Bitmap::new(16, 3, vec![0x12, 0x34, 0x12, 0x34, 0x12, 0x34]).unwrap();
        assert_eq!(bitmap.to_compressed_hex(), b"1234::");
    }

    #[test]
    fn test_compression_run_codes() {
        // 0xBB x3 then 0x12: "BBBBBB12" -> "LB12"
        let bitmap = Bitmap::new(32, 1, vec![0xBB, 0xBB, 0xBB, 0x12]).unwrap();
        assert_eq!(bitmap.to_compressed_hex(), b"LB12");
    }

    #[test]
    fn test_run_encoding_large_counts() {
        let mut out = Vec::new();
        push_run(&mut out, b'B', 40);
        assert_eq!(out, b"hB");

        out.clear();
        push_run(&mut out, b'F', 21);
        assert_eq!(out, b"gGF");

        out.clear();
        push_run(&mut out, b'3', 405);
        assert_eq!(out, b"z3K3");
    }

    #[test]
    fn test_graphic_field_ascii() {
        let mut zpl = ZplBuilder::new("V45.11.7ZA").unwrap();
        let bitmap = Bitmap::new(16, 2, vec![0xFF, 0x00, 0x00, 0xFF]).unwrap();
        zpl.graphic_field(GraphicFormat::Ascii, bitmap.total_bytes(), bitmap.row_bytes(), &bitmap.to_hex())
            .unwrap();
        assert_eq!(zpl.finalize(), b"^GFA,4,4,2,FF0000FF");
    }

    #[test]
    fn test_graphic_field_binary() {
        let mut zpl = ZplBuilder::new("V45.11.7ZA").unwrap();
        zpl.graphic_field(GraphicFormat::Binary, 2, 1, &[0x5E, 0x00]).unwrap();
        assert_eq!(zpl.finalize(), b"^GFB,2,2,1,\x5E\x00");
    }

    #[test]
    fn test_graphic_field_validation() {
        let mut zpl = ZplBuilder::new("V45.11.7ZA").unwrap();
        assert!(zpl.graphic_field(GraphicFormat::Binary, 2, 1, &[0x00]).is_err());
        assert!(zpl.graphic_field(GraphicFormat::Binary, 3, 2, &[0, 0, 0]).is_err());
        assert!(zpl.graphic_field(GraphicFormat::Ascii, 2, 1, b"00^FS").is_err());
        assert!(zpl.graphic_field(GraphicFormat::Ascii, 2, 1, b"").is_err());
        assert!(zpl.graphic_field(GraphicFormat::Ascii, 0, 1, b"00").is_err());
        assert!(zpl.graphic_field(GraphicFormat::Ascii, 100_000, 1, b"00").is_err());
        assert!(zpl.chunks().is_empty());
        assert!(GraphicFormat::try_from('C').is_err());
    }
}
