//! # JSON Label Jobs
//!
//! Deserialize JSON documents into builder calls.
//!
//! A label job describes one label format: optional header settings
//! (`print_width`, `label_top`, `encoding`, `quantity`) and a list of
//! elements drawn in order. Raw `command` elements reach the generic emit
//! primitive, so anything the typed elements lack can still be sent.
//!
//! ## Example
//!
//! ```
//! use cebra::json_api::from_json;
//!
//! let json = r#"{
//!     "print_width": 900,
//!     "elements": [
//!         {"type": "text", "x": 300, "y": 100, "height": 50, "content": "Hallo"},
//!         {"type": "box", "x": 0, "y": 0, "width": 900, "height": 1},
//!         {"type": "command", "mnemonic": "MM", "args": ["T"]}
//!     ]
//! }"#;
//!
//! let job = from_json(json).unwrap();
//! let bytes = job.to_builder("V45.11.7ZA").unwrap().finalize();
//! assert_eq!(
//!     bytes,
//!     b"^XA^PW900^FO300,100^A0N,50,50^FDHallo^FS^FO0,0^GB900,1,1,B,0^FS^MMT^XZ"
//! );
//! ```

mod convert;
mod schema;

pub use convert::{from_json, json_arg};
pub use schema::{
    JsonBox, JsonCommand, JsonDataMatrix, JsonElement, JsonGrid, JsonImage, JsonText, LabelJob,
};
