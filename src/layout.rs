//! # Layout Helpers
//!
//! Convenience methods on [`ZplBuilder`] that compose the primitive
//! commands into complete fields. Each helper emits a field origin, the
//! field content, and the closing `^FS`.
//!
//! ```
//! use cebra::protocol::ZplBuilder;
//!
//! let mut zpl = ZplBuilder::new("V45.11.7ZA")?;
//! zpl.text(300, 100, 50, 50, "Hallo")?;
//! zpl.filled_box(0, 0, 900, 1)?;
//! assert_eq!(
//!     zpl.finalize(),
//!     b"^FO300,100^A0N,50,50^FDHallo^FS^FO0,0^GB900,1,1,B,0^FS"
//! );
//! # Ok::<(), cebra::CebraError>(())
//! ```
//!
//! Helpers fail on the first invalid command. Commands already emitted for
//! that field stay in the builder, so validate inputs up front when a
//! partial field matters.

use crate::error::Result;
use crate::protocol::builder::{MAX_DOTS, check_range};
use crate::protocol::{
    Bitmap, DataMatrix, FieldPayload, GraphicFormat, LineColor, Orientation, ZplBuilder,
};

impl ZplBuilder {
    /// Text field in scalable font `0`.
    pub fn text<'a>(
        &mut self,
        x: u32,
        y: u32,
        height: u32,
        width: u32,
        data: impl Into<FieldPayload<'a>>,
    ) -> Result<()> {
        self.field_origin(x, y, 0)?;
        self.scalable_font('0', Orientation::Normal, height, width)?;
        self.field_data(data)?;
        self.field_separator()
    }

    /// Solid black rectangle; a one-dot side makes it a line.
    pub fn filled_box(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<()> {
        self.field_origin(x, y, 0)?;
        self.graphic_box(width, height, width.min(height), LineColor::Black, 0)?;
        self.field_separator()
    }

    /// Coordinate grid with 1-dot lines every `step` dots.
    ///
    /// `width`, `height` and `step` must each be within 1..=32000.
    pub fn grid(&mut self, width: u32, height: u32, step: u32) -> Result<()> {
        check_range("grid", "width", width, 1, MAX_DOTS)?;
        check_range("grid", "height", height, 1, MAX_DOTS)?;
        let step = check_range("grid", "step", step, 1, MAX_DOTS)? as usize;
        for y in (0..=height).step_by(step) {
            self.filled_box(0, y, width, 1)?;
        }
        for x in (0..=width).step_by(step) {
            self.filled_box(x, 0, 1, height)?;
        }
        Ok(())
    }

    /// ECC 200 Data Matrix with automatic size.
    pub fn data_matrix_at<'a>(
        &mut self,
        x: u32,
        y: u32,
        height: u32,
        data: impl Into<FieldPayload<'a>>,
    ) -> Result<()> {
        self.field_origin(x, y, 0)?;
        self.data_matrix(&DataMatrix::new(height))?;
        self.field_data(data)?;
        self.field_separator()
    }

    /// Monochrome bitmap as an ASCII graphic field.
    pub fn bitmap(&mut self, x: u32, y: u32, bitmap: &Bitmap, compress: bool) -> Result<()> {
        let payload = if compress {
            bitmap.to_compressed_hex()
        } else {
            bitmap.to_hex()
        };
        self.field_origin(x, y, 0)?;
        self.graphic_field(
            GraphicFormat::Ascii,
            bitmap.total_bytes(),
            bitmap.row_bytes(),
            &payload,
        )?;
        self.field_separator()
    }
}
