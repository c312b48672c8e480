//! # International Font Encoding (`^CI`)
//!
//! `^CI` selects the character set the printer uses to interpret `^FD`
//! bytes. Newer character sets only exist on newer firmware, so each table
//! entry carries the restrictions a printer must satisfy.
//!
//! | Name | `^CI` | Firmware |
//! |------|-------|----------|
//! | cp850 | 13 | any |
//! | shift_jis | 15 | any |
//! | euc_jp | 16 | any |
//! | cp1252 | 27 | any |
//! | utf_8 | 28 | V60.14.x or V50.14.x |
//! | utf_16 | 29 | V60.14.x or V50.14.x |
//! | utf_32 | 30 | V60.14.x or V50.14.x |
//! | cp1250 | 31 | Vx.16.x |
//! | cp1251 | 33 | Vx.16.x |
//! | cp1253 | 34 | Vx.16.x |
//! | cp1254 | 35 | Vx.16.x |
//! | cp1255 | 36 | Vx.16.x |

use std::borrow::Cow;

use encoding_rs::Encoding;

use super::builder::ZplBuilder;
use super::command::{Arg, CommandKind};
use super::cp850;
use crate::error::{CebraError, Result};
use crate::firmware::Restriction;

const UNICODE: &[&str] = &["V60.14.x", "V50.14.x"];
const WINDOWS: &[&str] = &["Vx.16.x"];

/// One entry of the `^CI` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterSet {
    /// Symbolic codec name, e.g. `cp850` or `utf_8`
    pub name: &'static str,
    /// Numeric `^CI` argument
    pub code: u8,
    /// Firmware restrictions; empty means every firmware
    pub requires: &'static [&'static str],
}

impl CharacterSet {
    pub fn restriction(&self) -> Restriction<'static> {
        Restriction::AnyOf(self.requires)
    }

    /// Field data bytes for `text` in this character set.
    ///
    /// Returns `None` when a character has no representation. UTF-16 and
    /// UTF-32 field data is not produced here, so those sets only accept
    /// ASCII text.
    pub fn encode_text<'a>(&self, text: &'a str) -> Option<Cow<'a, [u8]>> {
        let codec: &'static Encoding = match self.name {
            "utf_8" => return Some(Cow::Borrowed(text.as_bytes())),
            "cp850" => return cp850::try_encode(text).map(Cow::Owned),
            "shift_jis" => encoding_rs::SHIFT_JIS,
            "euc_jp" => encoding_rs::EUC_JP,
            "cp1250" => encoding_rs::WINDOWS_1250,
            "cp1251" => encoding_rs::WINDOWS_1251,
            "cp1252" => encoding_rs::WINDOWS_1252,
            "cp1253" => encoding_rs::WINDOWS_1253,
            "cp1254" => encoding_rs::WINDOWS_1254,
            "cp1255" => encoding_rs::WINDOWS_1255,
            _ => return text.is_ascii().then_some(Cow::Borrowed(text.as_bytes())),
        };
        let (bytes, _, had_errors) = codec.encode(text);
        (!had_errors).then_some(bytes)
    }
}

/// Every character set `change_encoding` knows about.
pub static CHARACTER_SETS: &[CharacterSet] = &[
    CharacterSet { name: "cp850", code: 13, requires: &[] },
    CharacterSet { name: "shift_jis", code: 15, requires: &[] },
    CharacterSet { name: "euc_jp", code: 16, requires: &[] },
    CharacterSet { name: "cp1252", code: 27, requires: &[] },
    CharacterSet { name: "utf_8", code: 28, requires: UNICODE },
    CharacterSet { name: "utf_16", code: 29, requires: UNICODE },
    CharacterSet { name: "utf_32", code: 30, requires: UNICODE },
    CharacterSet { name: "cp1250", code: 31, requires: WINDOWS },
    CharacterSet { name: "cp1251", code: 33, requires: WINDOWS },
    CharacterSet { name: "cp1253", code: 34, requires: WINDOWS },
    CharacterSet { name: "cp1254", code: 35, requires: WINDOWS },
    CharacterSet { name: "cp1255", code: 36, requires: WINDOWS },
];

/// Look up a character set by name.
pub fn character_set(name: &str) -> Option<&'static CharacterSet> {
    CHARACTER_SETS.iter().find(|set| set.name == name)
}

impl ZplBuilder {
    /// `^CI` - change international font encoding.
    ///
    /// Fails with [`CebraError::FirmwareMismatch`] if the target firmware
    /// does not support the requested character set.
    pub fn change_encoding(&mut self, name: &str) -> Result<()> {
        const COMMAND: &str = "change_encoding";

        let set = character_set(name).ok_or_else(|| {
            CebraError::invalid(COMMAND, format!("unknown encoding '{}'", name))
        })?;

        if !self.gate().permits(set.restriction())? {
            return Err(CebraError::FirmwareMismatch {
                command: COMMAND,
                feature: format!("encoding {} (requires {})", set.name, set.restriction()),
                firmware: self.firmware().to_string(),
            });
        }

        self.emit(CommandKind::Format, "CI", &[Arg::from(set.code)])
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cp850_on_old_firmware() {
        let mut zpl = ZplBuilder::new("V45.11.7ZA").unwrap();
        zpl.change_encoding("cp850").unwrap();
        assert_eq!(zpl.finalize(), b"^CI13");
    }

    #[test]
    fn test_utf8_needs_new_firmware() {
        let mut zpl = ZplBuilder::new("V45.11.7ZA").unwrap();
        let err = zpl.change_encoding("utf_8").unwrap_err();
        assert!(matches!(err, CebraError::FirmwareMismatch { command: "change_encoding", .. }));
        assert!(zpl.chunks().is_empty());
    }

    #[test]
    fn test_utf8_on_new_firmware() {
        for firmware in ["V60.14.7ZA", "V50.14.1Z", "V61.17.17Z"] {
            let mut zpl = ZplBuilder::new(firmware).unwrap();
            zpl.change_encoding("utf_8").unwrap();
            assert_eq!(zpl.finalize(), b"^CI28");
        }
    }

    #[test]
    fn test_windows_sets_gate_on_minor() {
        let mut old = ZplBuilder::new("V60.15.2Z").unwrap();
        assert!(matches!(
            old.change_encoding("cp1251"),
            Err(CebraError::FirmwareMismatch { .. })
        ));

        let mut new = ZplBuilder::new("V53.16.4Z").unwrap();
        new.change_encoding("cp1251").unwrap();
        assert_eq!(new.finalize(), b"^CI33");
    }

    #[test]
    fn test_unknown_encoding() {
        let mut zpl = ZplBuilder::new("V60.14.7ZA").unwrap();
        assert!(matches!(
            zpl.change_encoding("latin_1"),
            Err(CebraError::InvalidValue { .. })
        ));
        assert!(zpl.chunks().is_empty());
    }

    #[test]
    fn test_table_restrictions_parse() {
        let gate = crate::firmware::VersionGate::new("V60.16.0Z").unwrap();
        for set in CHARACTER_SETS {
            assert!(gate.permits(set.restriction()).unwrap(), "{}", set.name);
        }
    }

    #[test]
    fn test_encode_text() {
        let encode = |name: &str, text: &str| {
            character_set(name)
                .unwrap()
                .encode_text(text)
                .map(|bytes| bytes.into_owned())
        };
        assert_eq!(encode("cp1252", "Grüße").unwrap(), b"Gr\xFC\xDFe");
        assert_eq!(encode("cp1251", "Да").unwrap(), b"\xC4\xE0");
        assert_eq!(encode("cp850", "Grüße").unwrap(), b"Gr\x81\xE1e");
        assert_eq!(encode("utf_8", "ß").unwrap(), "ß".as_bytes());
        assert_eq!(encode("shift_jis", "ABC").unwrap(), b"ABC");
        assert_eq!(encode("cp1252", "Да"), None);
        assert_eq!(encode("utf_16", "abc").unwrap(), b"abc");
        assert_eq!(encode("utf_16", "ü"), None);
    }

    #[test]
    fn test_names_are_unique() {
        for (i, set) in CHARACTER_SETS.iter().enumerate() {
            assert!(CHARACTER_SETS[i + 1..].iter().all(|other| other.name != set.name));
        }
    }
}
