//! JSON schema types for label jobs.

use serde::Deserialize;

fn default_threshold() -> u8 {
    128
}

fn default_true() -> bool {
    true
}

/// Top-level label job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelJob {
    /// Firmware the job was written for. The CLI uses it when no
    /// `--firmware` is given.
    #[serde(default)]
    pub firmware: Option<String>,
    /// `^PW` print width in dots.
    #[serde(default)]
    pub print_width: Option<u32>,
    /// `^LT` label top offset in dot rows.
    #[serde(default)]
    pub label_top: Option<i32>,
    /// `^CI` character set name, e.g. "cp850" or "utf_8".
    #[serde(default)]
    pub encoding: Option<String>,
    /// `^PQ` number of labels.
    #[serde(default)]
    pub quantity: Option<u32>,
    /// Label content, drawn in order.
    #[serde(default)]
    pub elements: Vec<JsonElement>,
}

/// A single element on the label.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonElement {
    Text(JsonText),
    Box(JsonBox),
    Grid(JsonGrid),
    DataMatrix(JsonDataMatrix),
    Image(JsonImage),
    Command(JsonCommand),
}

/// Text in a scalable font.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonText {
    pub x: u32,
    pub y: u32,
    pub height: u32,
    /// Character width in dots (default: same as height).
    #[serde(default)]
    pub width: Option<u32>,
    pub content: String,
    /// Font name, a single character (default: "0").
    #[serde(default)]
    pub font: Option<String>,
    /// "N", "R", "I" or "B" (default: "N").
    #[serde(default)]
    pub orientation: Option<String>,
}

/// Rectangle or line.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Border thickness (default: filled).
    #[serde(default)]
    pub thickness: Option<u32>,
    /// "B" or "W" (default: "B").
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub rounding: u8,
}

/// Coordinate grid anchored at the label home.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonGrid {
    pub width: u32,
    pub height: u32,
    pub step: u32,
}

/// Data Matrix symbol.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonDataMatrix {
    pub x: u32,
    pub y: u32,
    /// Module height in dots.
    pub height: u32,
    pub content: String,
    /// ECC level (default: 200).
    #[serde(default)]
    pub quality: Option<u16>,
}

/// Monochrome image loaded from disk.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonImage {
    pub x: u32,
    pub y: u32,
    pub path: String,
    /// Luma below this prints black (default: 128).
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    /// Use ZPL ASCII compression (default: true).
    #[serde(default = "default_true")]
    pub compress: bool,
}

/// Raw command passed to the generic emit primitive.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonCommand {
    /// "format" or "control" (default: "format").
    #[serde(default)]
    pub kind: Option<String>,
    pub mnemonic: String,
    /// Strings, integers or byte arrays.
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}
