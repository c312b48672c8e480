//! # Data Matrix Bar Code (`^BX`)
//!
//! ```text
//! ^BXo,h,s,c,r,f,g,a
//! ```
//!
//! | Param | Meaning | Valid |
//! |-------|---------|-------|
//! | o | orientation | N, R, I, B |
//! | h | module height in dots | any |
//! | s | quality level | 0, 50, 80, 100, 140, 200 |
//! | c | columns | 0 (auto) or 9–49 |
//! | r | rows | 0 (auto) or 9–49 |
//! | f | format ID (ECC 0–140 only) | 0–6 |
//! | g | escape control character | printable ASCII |
//! | a | aspect ratio (1 square, 2 rectangular) | 1, 2 |
//!
//! The aspect ratio parameter is only sent to firmware that understands it,
//! so older firmware gets seven parameters and newer firmware eight. The
//! escape character `g` is always sent; it sits between the format ID and
//! the aspect ratio and is easy to miss when counting arguments.
//!
//! ## Column Parity
//!
//! Non-zero column counts must be odd at quality 200 and even for quality
//! 50, 80 and 100. Quality 0 and 140 accept either.

use super::builder::{Orientation, ZplBuilder, check_control_char, check_range};
use super::command::{Arg, CommandKind};
use crate::error::{CebraError, Result};
use crate::firmware::Variant;

/// Quality levels accepted by `^BX`
pub const QUALITY_LEVELS: [u16; 6] = [0, 50, 80, 100, 140, 200];

/// Firmware that accepts the aspect ratio parameter
pub const ASPECT_RATIO: &[&str] = &["V60.14.x", "V50.14.x"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataMatrixForm {
    WithAspectRatio,
    Legacy,
}

const DATA_MATRIX_FORMS: &[Variant<DataMatrixForm>] = &[Variant {
    requires: ASPECT_RATIO,
    form: DataMatrixForm::WithAspectRatio,
}];

/// Parameters for [`ZplBuilder::data_matrix`].
///
/// ```
/// use cebra::protocol::barcode::DataMatrix;
///
/// let symbol = DataMatrix::new(9).quality(200).columns(19);
/// assert_eq!(symbol.height, 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataMatrix {
    pub orientation: Orientation,
    pub height: u32,
    pub quality: u16,
    pub columns: u8,
    pub rows: u8,
    pub format_id: u8,
    pub escape: char,
    pub aspect_ratio: u8,
}

impl Default for DataMatrix {
    fn default() -> Self {
        Self {
            orientation: Orientation::Normal,
            height: 10,
            quality: 200,
            columns: 0,
            rows: 0,
            format_id: 6,
            escape: '~',
            aspect_ratio: 1,
        }
    }
}

impl DataMatrix {
    /// ECC 200 symbol with automatic size and the given module height.
    pub fn new(height: u32) -> Self {
        Self {
            height,
            ..Default::default()
        }
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn quality(mut self, quality: u16) -> Self {
        self.quality = quality;
        self
    }

    pub fn columns(mut self, columns: u8) -> Self {
        self.columns = columns;
        self
    }

    pub fn rows(mut self, rows: u8) -> Self {
        self.rows = rows;
        self
    }

    pub fn format_id(mut self, format_id: u8) -> Self {
        self.format_id = format_id;
        self
    }

    pub fn escape(mut self, escape: char) -> Self {
        self.escape = escape;
        self
    }

    pub fn aspect_ratio(mut self, aspect_ratio: u8) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    fn validate(&self) -> Result<()> {
        const COMMAND: &str = "data_matrix";

        if !QUALITY_LEVELS.contains(&self.quality) {
            return Err(CebraError::invalid(
                COMMAND,
                format!("quality {} is not one of {:?}", self.quality, QUALITY_LEVELS),
            ));
        }
        check_symbol_size(COMMAND, "columns", self.columns)?;
        check_symbol_size(COMMAND, "rows", self.rows)?;

        if self.columns != 0 {
            let odd = self.columns % 2 == 1;
            if self.quality == 200 && !odd {
                return Err(CebraError::invalid(
                    COMMAND,
                    format!("columns {} must be odd at quality 200", self.columns),
                ));
            }
            if self.quality > 0 && self.quality < 140 && odd {
                return Err(CebraError::invalid(
                    COMMAND,
                    format!(
                        "columns {} must be even at quality {}",
                        self.columns, self.quality
                    ),
                ));
            }
        }

        check_range(COMMAND, "format_id", self.format_id, 0, 6)?;
        check_control_char(COMMAND, self.escape)?;
        check_range(COMMAND, "aspect_ratio", self.aspect_ratio, 1, 2)?;
        Ok(())
    }
}

fn check_symbol_size(command: &'static str, field: &str, value: u8) -> Result<()> {
    if value != 0 && !(9..=49).contains(&value) {
        return Err(CebraError::invalid(
            command,
            format!("{} {} must be 0 or within 9..=49", field, value),
        ));
    }
    Ok(())
}

impl ZplBuilder {
    /// `^BX` - Data Matrix bar code for the next field.
    pub fn data_matrix(&mut self, symbol: &DataMatrix) -> Result<()> {
        symbol.validate()?;

        let mut args = vec![
            Arg::from(symbol.orientation.as_char()),
            Arg::from(symbol.height),
            Arg::from(symbol.quality),
            Arg::from(symbol.columns),
            Arg::from(symbol.rows),
            Arg::from(symbol.format_id),
            Arg::from(symbol.escape),
        ];
        if *self.gate().select(DATA_MATRIX_FORMS, &DataMatrixForm::Legacy)?
            == DataMatrixForm::WithAspectRatio
        {
            args.push(Arg::from(symbol.aspect_ratio));
        }

        self.emit(CommandKind::Format, "BX", &args)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_form_on_old_firmware() {
        let mut zpl = ZplBuilder::new("V45.11.7ZA").unwrap();
        zpl.data_matrix(&DataMatrix::new(9)).unwrap();
        assert_eq!(zpl.finalize(), b"^BXN,9,200,0,0,6,~");
    }

    #[test]
    fn test_aspect_ratio_on_new_firmware() {
        let mut zpl = ZplBuilder::new("V60.14.7ZA").unwrap();
        zpl.data_matrix(&DataMatrix::new(9).aspect_ratio(2)).unwrap();
        assert_eq!(zpl.finalize(), b"^BXN,9,200,0,0,6,~,2");
    }

    #[test]
    fn test_parameter_counts() {
        let count = |firmware: &str| {
            let mut zpl = ZplBuilder::new(firmware).unwrap();
            zpl.data_matrix(&DataMatrix::new(9)).unwrap();
            zpl.finalize().iter().filter(|&&b| b == b',').count() + 1
        };
        assert_eq!(count("V45.11.7ZA"), 7);
        assert_eq!(count("V60.14.7ZA"), 8);
    }

    #[test]
    fn test_quality_levels() {
        let mut zpl = ZplBuilder::new("V45.11.7ZA").unwrap();
        for quality in QUALITY_LEVELS {
            assert!(zpl.data_matrix(&DataMatrix::new(5).quality(quality)).is_ok());
        }
        assert!(zpl.data_matrix(&DataMatrix::new(5).quality(120)).is_err());
        assert_eq!(zpl.chunks().len(), QUALITY_LEVELS.len());
    }

    #[test]
    fn test_symbol_size_range() {
        let mut zpl = ZplBuilder::new("V45.11.7ZA").unwrap();
        assert!(zpl.data_matrix(&DataMatrix::new(5).quality(0).columns(9).rows(49)).is_ok());
        assert!(zpl.data_matrix(&DataMatrix::new(5).quality(0).columns(8)).is_err());
        assert!(zpl.data_matrix(&DataMatrix::new(5).quality(0).columns(50)).is_err());
        assert!(zpl.data_matrix(&DataMatrix::new(5).quality(0).rows(5)).is_err());
    }

    #[test]
    fn test_column_parity() {
        let mut zpl = ZplBuilder::new("V45.11.7ZA").unwrap();
        // quality 200: odd only
        assert!(zpl.data_matrix(&DataMatrix::new(5).columns(19)).is_ok());
        assert!(zpl.data_matrix(&DataMatrix::new(5).columns(20)).is_err());
        // 0 < quality < 140: even only
        for quality in [50, 80, 100] {
            assert!(zpl.data_matrix(&DataMatrix::new(5).quality(quality).columns(20)).is_ok());
            assert!(zpl.data_matrix(&DataMatrix::new(5).quality(quality).columns(19)).is_err());
        }
        // quality 0 and 140: either
        for quality in [0, 140] {
            assert!(zpl.data_matrix(&DataMatrix::new(5).quality(quality).columns(19)).is_ok());
            assert!(zpl.data_matrix(&DataMatrix::new(5).quality(quality).columns(20)).is_ok());
        }
        // auto size is exempt
        assert!(zpl.data_matrix(&DataMatrix::new(5).quality(100).columns(0)).is_ok());
    }

    #[test]
    fn test_format_id_escape_aspect() {
        let mut zpl = ZplBuilder::new("V60.14.7ZA").unwrap();
        assert!(zpl.data_matrix(&DataMatrix::new(5).format_id(7)).is_err());
        assert!(zpl.data_matrix(&DataMatrix::new(5).escape(' ')).is_err());
        assert!(zpl.data_matrix(&DataMatrix::new(5).aspect_ratio(0)).is_err());
        assert!(zpl.data_matrix(&DataMatrix::new(5).aspect_ratio(3)).is_err());
        assert!(zpl.chunks().is_empty());
    }

    #[test]
    fn test_rotated() {
        let mut zpl = ZplBuilder::new("V45.11.7ZA").unwrap();
        let symbol = DataMatrix::new(12)
            .orientation(Orientation::Rotated)
            .quality(140)
            .columns(10)
            .rows(10)
            .format_id(3)
            .escape('_');
        zpl.data_matrix(&symbol).unwrap();
        assert_eq!(zpl.finalize(), b"^BXR,12,140,10,10,3,_");
    }
}
