//! # Code Page 850 Encoding
//!
//! Converts Unicode strings to CP850 (DOS Latin-1) single-byte encoding for
//! Zebra printers running `^CI13`.
//!
//! Firmware older than V x.14 has no UTF-8 support, so Western European text
//! has to be sent in CP850. ASCII (U+0000–U+007F) passes through unchanged.
//! Characters not in CP850 are replaced with `?` and a warning is logged.

use tracing::warn;

/// Encode a Unicode string as CP850 bytes.
///
/// - ASCII (U+0000–U+007F): passed through as-is
/// - CP850 upper half (128 mapped Unicode code points): single CP850 byte
/// - Unmapped characters: replaced with `?`
pub fn encode(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for ch in s.chars() {
        if (ch as u32) < 0x80 {
            out.push(ch as u8);
        } else if let Some(byte) = unicode_to_cp850(ch) {
            out.push(byte);
        } else {
            warn!(
                "cp850: unmapped character '{}' (U+{:04X}), replacing with '?'",
                ch, ch as u32
            );
            out.push(b'?');
        }
    }
    out
}

/// Encode a Unicode string as CP850 bytes, or `None` if any character
/// has no CP850 representation.
pub fn try_encode(s: &str) -> Option<Vec<u8>> {
    s.chars()
        .map(|ch| {
            if (ch as u32) < 0x80 {
                Some(ch as u8)
            } else {
                unicode_to_cp850(ch)
            }
        })
        .collect()
}

/// Map a Unicode code point to its CP850 byte value (0x80–0xFF).
///
/// Returns `None` if the character has no CP850 representation.
fn unicode_to_cp850(ch: char) -> Option<u8> {
    let byte = match ch {
        // 0x80–0x8F: shared with CP437
        'Ç' => 0x80,
        'ü' => 0x81,
        'é' => 0x82,
        'â' => 0x83,
        'ä' => 0x84,
        'à' => 0x85,
        'å' => 0x86,
        'ç' => 0x87,
        'ê' => 0x88,
        'ë' => 0x89,
        'è' => 0x8A,
        'ï' => 0x8B,
        'î' => 0x8C,
        'ì' => 0x8D,
        'Ä' => 0x8E,
        'Å' => 0x8F,

        // 0x90–0x9F: CP850 swaps ¢ ¥ ₧ for ø Ø ×
        'É' => 0x90,
        'æ' => 0x91,
        'Æ' => 0x92,
        'ô' => 0x93,
        'ö' => 0x94,
        'ò' => 0x95,
        'û' => 0x96,
        'ù' => 0x97,
        'ÿ' => 0x98,
        'Ö' => 0x99,
        'Ü' => 0x9A,
        'ø' => 0x9B,
        '£' => 0x9C,
        'Ø' => 0x9D,
        '×' => 0x9E,
        'ƒ' => 0x9F,

        // 0xA0–0xAF
        'á' => 0xA0,
        'í' => 0xA1,
        'ó' => 0xA2,
        'ú' => 0xA3,
        'ñ' => 0xA4,
        'Ñ' => 0xA5,
        'ª' => 0xA6,
        'º' => 0xA7,
        '¿' => 0xA8,
        '®' => 0xA9,
        '¬' => 0xAA,
        '½' => 0xAB,
        '¼' => 0xAC,
        '¡' => 0xAD,
        '«' => 0xAE,
        '»' => 0xAF,

        // 0xB0–0xBF: shades, box drawing, capitals with accents
        '░' => 0xB0,
        '▒' => 0xB1,
        '▓' => 0xB2,
        '│' => 0xB3,
        '┤' => 0xB4,
        'Á' => 0xB5,
        'Â' => 0xB6,
        'À' => 0xB7,
        '©' => 0xB8,
        '╣' => 0xB9,
        '║' => 0xBA,
        '╗' => 0xBB,
        '╝' => 0xBC,
        '¢' => 0xBD,
        '¥' => 0xBE,
        '┐' => 0xBF,

        // 0xC0–0xCF
        '└' => 0xC0,
        '┴' => 0xC1,
        '┬' => 0xC2,
        '├' => 0xC3,
        '─' => 0xC4,
        '┼' => 0xC5,
        'ã' => 0xC6,
        'Ã' => 0xC7,
        '╚' => 0xC8,
        '╔' => 0xC9,
        '╩' => 0xCA,
        '╦' => 0xCB,
        '╠' => 0xCC,
        '═' => 0xCD,
        '╬' => 0xCE,
        '¤' => 0xCF,

        // 0xD0–0xDF
        'ð' => 0xD0,
        'Ð' => 0xD1,
        'Ê' => 0xD2,
        'Ë' => 0xD3,
        'È' => 0xD4,
        'ı' => 0xD5,
        'Í' => 0xD6,
        'Î' => 0xD7,
        'Ï' => 0xD8,
        '┘' => 0xD9,
        '┌' => 0xDA,
        '█' => 0xDB,
        '▄' => 0xDC,
        '¦' => 0xDD,
        'Ì' => 0xDE,
        '▀' => 0xDF,

        // 0xE0–0xEF
        'Ó' => 0xE0,
        'ß' => 0xE1,
        'Ô' => 0xE2,
        'Ò' => 0xE3,
        'õ' => 0xE4,
        'Õ' => 0xE5,
        'µ' => 0xE6,
        'þ' => 0xE7,
        'Þ' => 0xE8,
        'Ú' => 0xE9,
        'Û' => 0xEA,
        'Ù' => 0xEB,
        'ý' => 0xEC,
        'Ý' => 0xED,
        '¯' => 0xEE,
        '´' => 0xEF,

        // 0xF0–0xFF
        '\u{00AD}' => 0xF0, // soft hyphen
        '±' => 0xF1,
        '‗' => 0xF2,
        '¾' => 0xF3,
        '¶' => 0xF4,
        '§' => 0xF5,
        '÷' => 0xF6,
        '¸' => 0xF7,
        '°' => 0xF8,
        '¨' => 0xF9,
        '·' => 0xFA,
        '¹' => 0xFB,
        '³' => 0xFC,
        '²' => 0xFD,
        '■' => 0xFE,
        '\u{00A0}' => 0xFF, // no-break space

        _ => return None,
    };
    Some(byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(encode("Hallo, Welt!"), b"Hallo, Welt!");
    }

    #[test]
    fn test_try_encode() {
        assert_eq!(try_encode("Grüße").unwrap(), b"Gr\x81\xE1e");
        assert_eq!(try_encode("€"), None);
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(encode(""), b"");
    }

    #[test]
    fn test_german_text() {
        // "Größe" → G r ö=0x94 ß=0xE1 e
        assert_eq!(encode("Größe"), vec![0x47, 0x72, 0x94, 0xE1, 0x65]);
        assert_eq!(encode("Übermaß"), vec![0x9A, 0x62, 0x65, 0x72, 0x6D, 0x61, 0xE1]);
    }

    #[test]
    fn test_differs_from_cp437() {
        assert_eq!(encode("ø"), vec![0x9B]);
        assert_eq!(encode("Ø"), vec![0x9D]);
        assert_eq!(encode("¢"), vec![0xBD]);
        assert_eq!(encode("Á"), vec![0xB5]);
    }

    #[test]
    fn test_box_drawing() {
        assert_eq!(encode("┌─┐"), vec![0xDA, 0xC4, 0xBF]);
        assert_eq!(encode("╔═╗"), vec![0xC9, 0xCD, 0xBB]);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(encode("°"), vec![0xF8]);
        assert_eq!(encode("±"), vec![0xF1]);
        assert_eq!(encode("©"), vec![0xB8]);
    }

    #[test]
    fn test_unmapped_char_becomes_question_mark() {
        // CP437 has π, CP850 does not
        assert_eq!(encode("π"), vec![b'?']);
        assert_eq!(encode("€"), vec![b'?']);
    }
}
