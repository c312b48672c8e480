//! # ZPL Command Encoding
//!
//! Every ZPL command has the same shape:
//!
//! ```text
//! <prefix><mnemonic><arg1><delim><arg2><delim>...<argN>
//! ```
//!
//! - **prefix**: `^` for format commands, `~` for control commands. Both can
//!   be changed by the printer program itself (`^CC`, `^CT`).
//! - **mnemonic**: short ASCII name such as `FO` or `A0`
//! - **delim**: `,` by default, changeable with `^CD`
//!
//! The first argument follows the mnemonic directly (`^A0N,50,50` is
//! mnemonic `A0` with arguments `N`, `50`, `50`). No terminator is added.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::{CebraError, Result};

/// Default format command prefix
pub const CARET: u8 = b'^';

/// Default control command prefix
pub const TILDE: u8 = b'~';

/// Default argument delimiter
pub const COMMA: u8 = b',';

/// Which prefix a command is sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Label content and layout (`^`)
    Format,
    /// Printer state, acted on immediately (`~`)
    Control,
}

impl FromStr for CommandKind {
    type Err = CebraError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "format" => Ok(Self::Format),
            "control" => Ok(Self::Control),
            other => Err(CebraError::invalid(
                "emit",
                format!("unknown command kind '{}', expected 'format' or 'control'", other),
            )),
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format => f.write_str("format"),
            Self::Control => f.write_str("control"),
        }
    }
}

/// A single command argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg<'a> {
    /// Short ASCII text
    Text(Cow<'a, str>),
    /// Decimal integer
    Int(i64),
    /// Raw bytes, written unmodified
    Bytes(Cow<'a, [u8]>),
}

impl Arg<'_> {
    fn write_to(&self, mnemonic: &str, out: &mut Vec<u8>) -> Result<()> {
        match self {
            Self::Text(text) => {
                if !text.is_ascii() {
                    return Err(CebraError::invalid(
                        "emit",
                        format!("argument '{}' of {} is not ASCII", text, mnemonic),
                    ));
                }
                out.extend_from_slice(text.as_bytes());
            }
            Self::Int(n) => out.extend_from_slice(n.to_string().as_bytes()),
            Self::Bytes(bytes) => out.extend_from_slice(bytes),
        }
        Ok(())
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(Cow::Borrowed(s))
    }
}

impl From<String> for Arg<'_> {
    fn from(s: String) -> Self {
        Self::Text(Cow::Owned(s))
    }
}

impl From<char> for Arg<'_> {
    fn from(c: char) -> Self {
        Self::Text(Cow::Owned(c.to_string()))
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(Cow::Borrowed(bytes))
    }
}

impl From<Vec<u8>> for Arg<'_> {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(Cow::Owned(bytes))
    }
}

macro_rules! int_arg {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg<'_> {
            fn from(n: $t) -> Self {
                Self::Int(i64::from(n))
            }
        })*
    };
}

int_arg!(u8, u16, u32, i8, i16, i32, i64);

/// Check that a mnemonic is non-empty printable ASCII.
pub(crate) fn check_mnemonic(mnemonic: &str) -> Result<()> {
    if mnemonic.is_empty() || !mnemonic.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(CebraError::invalid(
            "emit",
            format!("mnemonic {:?} must be printable ASCII", mnemonic),
        ));
    }
    Ok(())
}

/// Encode one command into a standalone chunk.
///
/// ## Example
///
/// ```
/// use cebra::protocol::command::{encode, Arg};
///
/// let chunk = encode(b'^', b',', "FO", &[Arg::from(10u32), Arg::from(20u32)])?;
/// assert_eq!(chunk, b"^FO10,20");
/// # Ok::<(), cebra::CebraError>(())
/// ```
pub fn encode(prefix: u8, delimiter: u8, mnemonic: &str, args: &[Arg<'_>]) -> Result<Vec<u8>> {
    check_mnemonic(mnemonic)?;

    let mut chunk = Vec::with_capacity(1 + mnemonic.len() + args.len() * 4);
    chunk.push(prefix);
    chunk.extend_from_slice(mnemonic.as_bytes());
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            chunk.push(delimiter);
        }
        arg.write_to(mnemonic, &mut chunk)?;
    }
    Ok(chunk)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args() {
        assert_eq!(encode(CARET, COMMA, "XA", &[]).unwrap(), b"^XA");
    }

    #[test]
    fn test_delimiter_only_between_args() {
        let args = [Arg::from("N"), Arg::from(50u32), Arg::from(60u32)];
        assert_eq!(encode(CARET, COMMA, "A0", &args).unwrap(), b"^A0N,50,60");
    }

    #[test]
    fn test_custom_characters() {
        let args = [Arg::from(1u32), Arg::from(2u32)];
        assert_eq!(encode(b'!', b';', "FO", &args).unwrap(), b"!FO1;2");
    }

    #[test]
    fn test_signed_int() {
        assert_eq!(encode(CARET, COMMA, "LT", &[Arg::from(-12i32)]).unwrap(), b"^LT-12");
    }

    #[test]
    fn test_raw_bytes_passthrough() {
        let payload: &[u8] = &[0x00, 0xFF, b','];
        let chunk = encode(CARET, COMMA, "FD", &[Arg::from(payload)]).unwrap();
        assert_eq!(chunk, b"^FD\x00\xFF,");
    }

    #[test]
    fn test_non_ascii_text_rejected() {
        let err = encode(CARET, COMMA, "FD", &[Arg::from("héllo")]).unwrap_err();
        assert!(matches!(err, CebraError::InvalidValue { .. }));
    }

    #[test]
    fn test_bad_mnemonic() {
        assert!(encode(CARET, COMMA, "", &[]).is_err());
        assert!(encode(CARET, COMMA, "F O", &[]).is_err());
        assert!(encode(CARET, COMMA, "FÖ", &[]).is_err());
    }

    #[test]
    fn test_command_kind_from_str() {
        assert_eq!("format".parse::<CommandKind>().unwrap(), CommandKind::Format);
        assert_eq!("control".parse::<CommandKind>().unwrap(), CommandKind::Control);
        assert!(matches!(
            "status".parse::<CommandKind>(),
            Err(CebraError::InvalidValue { command: "emit", .. })
        ));
    }
}
