//! # Label Tests
//!
//! End-to-end checks of complete ZPL byte streams: built-in templates,
//! JSON jobs and the firmware-dependent command forms.

use cebra::json_api::from_json;
use cebra::protocol::{CHARACTER_SETS, Orientation, ZplBuilder};
use cebra::{CebraError, PrinterConfig, label};
use image::{GrayImage, Luma};
use pretty_assertions::assert_eq;

const OLD_FIRMWARE: &str = "V45.11.7ZA";
const NEW_FIRMWARE: &str = "V60.14.7ZA";

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn as_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// The 900x300 calibration grid drawn by the templates.
fn grid_fields(justification: &str) -> String {
    let mut out = String::new();
    for y in (0..=300).step_by(50) {
        out.push_str(&format!("^FO0,{}{}^GB900,1,1,B,0^FS", y, justification));
    }
    for x in (0..=900).step_by(50) {
        out.push_str(&format!("^FO{},0{}^GB1,300,1,B,0^FS", x, justification));
    }
    out
}

// ============================================================================
// TEMPLATES
// ============================================================================

#[test]
fn demo_label_on_old_firmware() {
    let data = label::by_name("demo", OLD_FIRMWARE).unwrap().unwrap();

    let expected = [
        "^XA^LT10^CI13^PW900".to_string(),
        "^FO300,100^A0N,50,50^FDHallo^FS".to_string(),
        "^FO300,200^A0N,100,100^FDHallo^FS".to_string(),
        "^FO50,50^BXN,9,200,0,0,6,~^FDa5d7ffa0-fa01-4f12-be44-834ac4df2dd0^FS".to_string(),
        grid_fields(""),
        "^XZ".to_string(),
    ]
    .concat();

    assert_eq!(as_text(&data), expected);
}

#[test]
fn demo_label_on_new_firmware() {
    let data = label::by_name("demo", NEW_FIRMWARE).unwrap().unwrap();

    let expected = [
        "^XA^LT10^CI13^PW900".to_string(),
        "^FO300,100,0^A0N,50,50^FDHallo^FS".to_string(),
        "^FO300,200,0^A0N,100,100^FDHallo^FS".to_string(),
        "^FO50,50,0^BXN,9,200,0,0,6,~,1^FDa5d7ffa0-fa01-4f12-be44-834ac4df2dd0^FS".to_string(),
        grid_fields(",0"),
        "^XZ".to_string(),
    ]
    .concat();

    assert_eq!(as_text(&data), expected);
}

#[test]
fn demo_label_with_quantity() {
    let mut job = label::template("demo").unwrap();
    job.quantity = Some(3);
    let data = job.to_builder(OLD_FIRMWARE).unwrap().finalize();
    assert!(as_text(&data).ends_with("^FS^PQ3^XZ"));
}

#[test]
fn templates_render_on_every_profile() {
    for config in PrinterConfig::built_in() {
        for name in label::list_labels() {
            let result = label::by_name(name, config.firmware).unwrap();
            assert!(result.is_ok(), "{} on {}", name, config.name);
        }
    }
}

// ============================================================================
// BUILDER
// ============================================================================

#[test]
fn changed_control_characters_apply_to_later_commands() {
    let mut zpl = ZplBuilder::new(OLD_FIRMWARE).unwrap();
    zpl.start_format().unwrap();
    zpl.change_command_prefix('%').unwrap();
    zpl.change_delimiter(';').unwrap();
    zpl.field_origin(10, 20, 0).unwrap();
    zpl.scalable_font('0', Orientation::Rotated, 30, 30).unwrap();
    zpl.field_data("x").unwrap();
    zpl.field_separator().unwrap();
    zpl.end_format().unwrap();

    assert_eq!(
        as_text(&zpl.finalize()),
        "^XA^CC%%CD;%FO10;20%A0R;30;30%FDx%FS%XZ"
    );
}

#[test]
fn failed_command_leaves_stream_unchanged() {
    let mut zpl = ZplBuilder::new(OLD_FIRMWARE).unwrap();
    zpl.start_format().unwrap();
    let before = zpl.finalize();

    assert!(matches!(
        zpl.change_encoding("utf_8"),
        Err(CebraError::FirmwareMismatch { .. })
    ));
    assert!(zpl.graphic_box(5, 5, 6, Default::default(), 0).is_err());
    assert!(zpl.scalable_font('0', Orientation::Normal, 0, 10).is_err());

    assert_eq!(zpl.finalize(), before);
}

#[test]
fn every_character_set_on_new_firmware() {
    // V60.14.x has the Unicode sets but not the x.16 Windows code pages
    for set in CHARACTER_SETS {
        let mut zpl = ZplBuilder::new(NEW_FIRMWARE).unwrap();
        let result = zpl.change_encoding(set.name);
        if set.requires.contains(&"Vx.16.x") {
            assert!(result.is_err(), "{}", set.name);
        } else {
            result.unwrap();
            assert_eq!(as_text(&zpl.finalize()), format!("^CI{}", set.code));
        }
    }
}

// ============================================================================
// JSON JOBS
// ============================================================================

#[test]
fn json_job_with_every_element() {
    let json = r#"{
        "print_width": 832,
        "encoding": "utf_8",
        "elements": [
            {"type": "text", "x": 10, "y": 10, "height": 40, "content": "Grüße"},
            {"type": "box", "x": 0, "y": 60, "width": 832, "height": 4},
            {"type": "data_matrix", "x": 10, "y": 80, "height": 6, "content": "ID-42"},
            {"type": "grid", "width": 100, "height": 50, "step": 50},
            {"type": "command", "mnemonic": "PR", "args": [4]}
        ]
    }"#;

    let data = from_json(json)
        .unwrap()
        .to_builder(NEW_FIRMWARE)
        .unwrap()
        .finalize();

    let expected = concat!(
        "^XA^CI28^PW832",
        "^FO10,10,0^A0N,40,40^FDGrüße^FS",
        "^FO0,60,0^GB832,4,4,B,0^FS",
        "^FO10,80,0^BXN,6,200,0,0,6,~,1^FDID-42^FS",
        "^FO0,0,0^GB100,1,1,B,0^FS^FO0,50,0^GB100,1,1,B,0^FS",
        "^FO0,0,0^GB1,50,1,B,0^FS^FO50,0,0^GB1,50,1,B,0^FS^FO100,0,0^GB1,50,1,B,0^FS",
        "^PR4^XZ",
    );
    assert_eq!(as_text(&data), expected);
}

#[test]
fn json_job_rejects_utf8_on_old_firmware() {
    let job = from_json(r#"{"encoding": "utf_8"}"#).unwrap();
    assert!(matches!(
        job.to_builder(OLD_FIRMWARE),
        Err(CebraError::FirmwareMismatch { .. })
    ));
}

#[test]
fn json_job_with_image() {
    let path = std::env::temp_dir().join(format!("cebra-label-{}.png", std::process::id()));
    GrayImage::from_fn(16, 2, |_, _| Luma([0u8]))
        .save(&path)
        .unwrap();

    let json = format!(
        r#"{{"elements": [{{"type": "image", "x": 5, "y": 5, "path": {:?}}}]}}"#,
        path.display().to_string()
    );
    let data = from_json(&json)
        .unwrap()
        .to_builder(OLD_FIRMWARE)
        .unwrap()
        .finalize();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(as_text(&data), "^XA^FO5,5^GFA,4,4,2,!:^FS^XZ");
}

#[test]
fn json_job_image_uncompressed() {
    let path = std::env::temp_dir().join(format!("cebra-raw-{}.png", std::process::id()));
    // left half black
    GrayImage::from_fn(16, 1, |x, _| Luma([if x < 8 { 0u8 } else { 255 }]))
        .save(&path)
        .unwrap();

    let json = format!(
        r#"{{"elements": [{{"type": "image", "x": 0, "y": 0, "path": {:?}, "compress": false}}]}}"#,
        path.display().to_string()
    );
    let data = from_json(&json)
        .unwrap()
        .to_builder(OLD_FIRMWARE)
        .unwrap()
        .finalize();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(as_text(&data), "^XA^FO0,0^GFA,2,2,2,FF00^FS^XZ");
}
