//! Conversion from JSON schema types to builder calls.

use serde_json::Value;
use tracing::debug;

use crate::error::{CebraError, Result};
use crate::protocol::{
    Arg, Bitmap, CharacterSet, CommandKind, DataMatrix, LineColor, Orientation, ZplBuilder,
    character_set,
};

use super::schema::*;

fn invalid_field(element: &'static str, field: &'static str, message: impl std::fmt::Display) -> CebraError {
    CebraError::Job(format!("{}: invalid {}: {}", element, field, message))
}

/// Parse a one-character field such as a font name or orientation.
fn single_char(element: &'static str, field: &'static str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(invalid_field(
            element,
            field,
            format!("expected a single character, got \"{}\"", value),
        )),
    }
}

/// Parse a label job from JSON text.
pub fn from_json(json: &str) -> Result<LabelJob> {
    serde_json::from_str(json).map_err(|e| CebraError::Job(e.to_string()))
}

impl LabelJob {
    /// Render this job into a builder for `firmware`, wrapped in `^XA` … `^XZ`.
    pub fn to_builder(&self, firmware: &str) -> Result<ZplBuilder> {
        let mut zpl = ZplBuilder::new(firmware)?;
        zpl.start_format()?;

        if let Some(top) = self.label_top {
            zpl.label_top(top)?;
        }
        if let Some(ref encoding) = self.encoding {
            zpl.change_encoding(encoding)?;
        }
        if let Some(width) = self.print_width {
            zpl.print_width(width)?;
        }

        let text = TextEncoding::for_job(self);
        for element in &self.elements {
            element.render(&mut zpl, text)?;
        }

        if let Some(quantity) = self.quantity {
            zpl.print_quantity(quantity)?;
        }
        zpl.end_format()?;
        Ok(zpl)
    }
}

/// How field text is turned into `^FD` bytes: in the job's `^CI`
/// character set, or as UTF-8 when the job declares none.
#[derive(Debug, Clone, Copy)]
struct TextEncoding(Option<&'static CharacterSet>);

impl TextEncoding {
    fn for_job(job: &LabelJob) -> Self {
        Self(job.encoding.as_deref().and_then(character_set))
    }

    fn field_data(self, zpl: &mut ZplBuilder, element: &'static str, content: &str) -> Result<()> {
        let Some(set) = self.0 else {
            return zpl.field_data(content);
        };
        let bytes = set.encode_text(content).ok_or_else(|| {
            invalid_field(
                element,
                "content",
                format!("\"{}\" cannot be encoded as {}", content, set.name),
            )
        })?;
        zpl.field_data(&bytes[..])
    }
}

impl JsonElement {
    fn render(&self, zpl: &mut ZplBuilder, text: TextEncoding) -> Result<()> {
        match self {
            JsonElement::Text(t) => t.render(zpl, text),
            JsonElement::Box(b) => b.render(zpl),
            JsonElement::Grid(g) => zpl.grid(g.width, g.height, g.step),
            JsonElement::DataMatrix(d) => d.render(zpl, text),
            JsonElement::Image(i) => i.render(zpl),
            JsonElement::Command(c) => c.render(zpl),
        }
    }
}

// ============ Element Conversions ============

impl JsonText {
    fn render(&self, zpl: &mut ZplBuilder, text: TextEncoding) -> Result<()> {
        let font = match self.font {
            Some(ref font) => single_char("text", "font", font)?,
            None => '0',
        };
        let orientation = match self.orientation {
            Some(ref o) => Orientation::try_from(single_char("text", "orientation", o)?)?,
            None => Orientation::Normal,
        };
        let width = self.width.unwrap_or(self.height);

        zpl.field_origin(self.x, self.y, 0)?;
        zpl.scalable_font(font, orientation, self.height, width)?;
        text.field_data(zpl, "text", &self.content)?;
        zpl.field_separator()
    }
}

impl JsonBox {
    fn render(&self, zpl: &mut ZplBuilder) -> Result<()> {
        let color = match self.color {
            Some(ref c) => LineColor::try_from(single_char("box", "color", c)?)?,
            None => LineColor::Black,
        };
        let thickness = self
            .thickness
            .unwrap_or_else(|| self.width.min(self.height));

        zpl.field_origin(self.x, self.y, 0)?;
        zpl.graphic_box(self.width, self.height, thickness, color, self.rounding)?;
        zpl.field_separator()
    }
}

impl JsonDataMatrix {
    fn render(&self, zpl: &mut ZplBuilder, text: TextEncoding) -> Result<()> {
        let mut symbol = DataMatrix::new(self.height);
        if let Some(quality) = self.quality {
            symbol = symbol.quality(quality);
        }

        zpl.field_origin(self.x, self.y, 0)?;
        zpl.data_matrix(&symbol)?;
        text.field_data(zpl, "data_matrix", &self.content)?;
        zpl.field_separator()
    }
}

impl JsonImage {
    fn render(&self, zpl: &mut ZplBuilder) -> Result<()> {
        let image = image::open(&self.path)
            .map_err(|e| CebraError::Image(format!("{}: {}", self.path, e)))?
            .to_luma8();
        debug!(
            path = %self.path,
            width = image.width(),
            height = image.height(),
            "loaded label image"
        );
        let bitmap = Bitmap::from_luma(&image, self.threshold);
        zpl.bitmap(self.x, self.y, &bitmap, self.compress)
    }
}

impl JsonCommand {
    fn render(&self, zpl: &mut ZplBuilder) -> Result<()> {
        let kind = match self.kind {
            Some(ref kind) => kind.parse::<CommandKind>()?,
            None => CommandKind::Format,
        };
        if let Some(change) = ControlChange::for_mnemonic(&self.mnemonic) {
            return self.render_control_change(zpl, kind, change);
        }
        let args = self
            .args
            .iter()
            .map(|value| json_arg(&self.mnemonic, value))
            .collect::<Result<Vec<_>>>()?;
        zpl.emit(kind, &self.mnemonic, &args)
    }

    /// `CC`, `CT` and `CD` go through the builder so later commands use
    /// the new character.
    fn render_control_change(
        &self,
        zpl: &mut ZplBuilder,
        kind: CommandKind,
        change: ControlChange,
    ) -> Result<()> {
        let new_char = match (kind, self.args.as_slice()) {
            (CommandKind::Format, [Value::String(s)]) => single_char("command", "args", s)?,
            _ => {
                return Err(invalid_field(
                    "command",
                    "args",
                    format!(
                        "{} must be a format command with one single-character argument",
                        self.mnemonic
                    ),
                ));
            }
        };
        match change {
            ControlChange::CommandPrefix => zpl.change_command_prefix(new_char),
            ControlChange::ControlPrefix => zpl.change_control_prefix(new_char),
            ControlChange::Delimiter => zpl.change_delimiter(new_char),
        }
    }
}

/// Raw mnemonics that change one of the builder's control characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlChange {
    CommandPrefix,
    ControlPrefix,
    Delimiter,
}

impl ControlChange {
    fn for_mnemonic(mnemonic: &str) -> Option<Self> {
        match mnemonic.to_ascii_uppercase().as_str() {
            "CC" => Some(Self::CommandPrefix),
            "CT" => Some(Self::ControlPrefix),
            "CD" => Some(Self::Delimiter),
            _ => None,
        }
    }
}

/// Convert a JSON value into a command argument.
///
/// | JSON | Argument |
/// |------|----------|
/// | string | text |
/// | integer | decimal integer |
/// | array of 0–255 | raw bytes |
///
/// Floats and non-byte array elements are [`CebraError::InvalidType`];
/// booleans, null and objects are [`CebraError::UnsupportedArgument`].
pub fn json_arg(mnemonic: &str, value: &Value) -> Result<Arg<'static>> {
    const EXPECTED: &str = "text, integer or byte array";
    match value {
        Value::String(s) => Ok(Arg::from(s.clone())),
        Value::Number(n) => match n.as_i64() {
            Some(n) => Ok(Arg::Int(n)),
            None if n.is_u64() => Err(CebraError::invalid(
                "emit",
                format!("integer {} is out of range", n),
            )),
            None => Err(CebraError::InvalidType {
                command: "emit",
                expected: EXPECTED,
            }),
        },
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|b| u8::try_from(b).ok())
                    .ok_or(CebraError::InvalidType {
                        command: "emit",
                        expected: "byte array",
                    })
            })
            .collect::<Result<Vec<u8>>>()
            .map(Arg::from),
        Value::Bool(_) => Err(unsupported(mnemonic, "boolean")),
        Value::Null => Err(unsupported(mnemonic, "null")),
        Value::Object(_) => Err(unsupported(mnemonic, "object")),
    }
}

fn unsupported(mnemonic: &str, found: &'static str) -> CebraError {
    CebraError::UnsupportedArgument {
        mnemonic: mnemonic.to_string(),
        found,
    }
}
