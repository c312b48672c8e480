//! # Label Templates
//!
//! Pre-built label jobs for testing a printer.
//!
//! Templates are plain [`LabelJob`] values, so the same rendering path
//! serves built-in labels and JSON files.

use crate::error::Result;
use crate::json_api::{JsonDataMatrix, JsonElement, JsonGrid, JsonText, LabelJob};

// ============================================================================
// LABEL TEMPLATES
// ============================================================================

/// Demo label: two sizes of text, a Data Matrix and a 50-dot grid.
///
/// Uses CP850 and a 900-dot print width, shifted down 10 dot rows.
pub fn demo_label() -> LabelJob {
    LabelJob {
        label_top: Some(10),
        encoding: Some("cp850".to_string()),
        print_width: Some(900),
        elements: vec![
            text(300, 100, 50, "Hallo"),
            text(300, 200, 100, "Hallo"),
            JsonElement::DataMatrix(JsonDataMatrix {
                x: 50,
                y: 50,
                height: 9,
                content: "a5d7ffa0-fa01-4f12-be44-834ac4df2dd0".to_string(),
                quality: None,
            }),
            grid(),
        ],
        ..LabelJob::default()
    }
}

/// Calibration grid only.
pub fn grid_label() -> LabelJob {
    LabelJob {
        print_width: Some(900),
        elements: vec![grid()],
        ..LabelJob::default()
    }
}

fn text(x: u32, y: u32, size: u32, content: &str) -> JsonElement {
    JsonElement::Text(JsonText {
        x,
        y,
        height: size,
        width: Some(size),
        content: content.to_string(),
        font: None,
        orientation: None,
    })
}

fn grid() -> JsonElement {
    JsonElement::Grid(JsonGrid {
        width: 900,
        height: 300,
        step: 50,
    })
}

/// List all available label names.
pub fn list_labels() -> &'static [&'static str] {
    &["demo", "grid"]
}

/// Get a label template by name.
pub fn template(name: &str) -> Option<LabelJob> {
    match name {
        "demo" => Some(demo_label()),
        "grid" => Some(grid_label()),
        _ => None,
    }
}

/// Render a label by name for the given firmware.
pub fn by_name(name: &str, firmware: &str) -> Option<Result<Vec<u8>>> {
    template(name).map(|job| Ok(job.to_builder(firmware)?.finalize()))
}

/// Check if a name is a known label.
pub fn is_label(name: &str) -> bool {
    list_labels().contains(&name)
}
