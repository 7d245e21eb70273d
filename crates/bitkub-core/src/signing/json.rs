//! JSON body encoding for signed requests.
//!
//! Bitkub verifies the signature against the body bytes it receives, so the
//! string we sign must be the string we send. Bodies are rendered in the
//! layout the exchange's reference clients produce: `", "` between items,
//! `": "` between key and value, and everything outside printable ASCII
//! escaped as `\uXXXX`.

use crate::{Error, Result};
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// `serde_json` formatter producing the spaced, ASCII-only layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadFormatter;

impl Formatter for PayloadFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\x7f' {
                continue;
            }
            if start < i {
                writer.write_all(fragment[start..i].as_bytes())?;
            }
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Render `value` as the exact body string to sign and transmit.
///
/// Struct fields are emitted in declaration order.
#[allow(clippy::result_large_err)]
pub fn to_payload_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PayloadFormatter);
    value.serialize(&mut serializer)?;

    String::from_utf8(buf).map_err(|e| Error::Signing {
        message: format!("Request body is not valid UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Body<'a> {
        sym: &'a str,
        amt: &'a str,
    }

    #[test]
    fn test_spaced_separators() {
        let body = Body {
            sym: "btc_thb",
            amt: "0.001",
        };
        assert_eq!(
            to_payload_json(&body).unwrap(),
            r#"{"sym": "btc_thb", "amt": "0.001"}"#
        );
    }

    #[test]
    fn test_nested_arrays_and_objects() {
        let value = json!({"a": [1, 2, {"b": null}]});
        assert_eq!(
            to_payload_json(&value).unwrap(),
            r#"{"a": [1, 2, {"b": null}]}"#
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(to_payload_json(&json!({})).unwrap(), "{}");
        assert_eq!(to_payload_json(&json!([])).unwrap(), "[]");
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        let body = Body {
            sym: "ไทย",
            amt: "é😀",
        };
        assert_eq!(
            to_payload_json(&body).unwrap(),
            r#"{"sym": "\u0e44\u0e17\u0e22", "amt": "\u00e9\ud83d\ude00"}"#
        );
    }

    #[test]
    fn test_control_characters_keep_json_escapes() {
        let value = json!(["a\"b\\c\n", "\u{7f}"]);
        assert_eq!(
            to_payload_json(&value).unwrap(),
            r#"["a\"b\\c\n", "\u007f"]"#
        );
    }
}
