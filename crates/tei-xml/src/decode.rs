//! Turning raw input bytes into text.

use crate::{Error, Result};
use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::borrow::Cow;

/// Decode raw XML bytes.
///
/// A byte order mark takes precedence. Otherwise the `encoding` of the XML
/// declaration is used, and UTF-8 when there is none. Bytes that are invalid
/// in the chosen encoding are an error, never replaced.
///
/// # Example
///
/// ```rust
/// let bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><p>tr\xe8s</p>";
/// let text = tei_xml::decode(bytes).unwrap();
/// assert!(text.ends_with("<p>très</p>"));
/// ```
///
/// # Errors
///
/// Fails on an encoding label that is not recognised, or on bytes that do
/// not decode.
pub fn decode(bytes: &[u8]) -> Result<Cow<'_, str>> {
    let (encoding, content) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (declared_encoding(bytes)?.unwrap_or(UTF_8), bytes),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(content)
        .ok_or_else(|| Error::MalformedEncoding {
            encoding: encoding.name().to_string(),
        })
}

/// The encoding named by a leading XML declaration.
fn declared_encoding(bytes: &[u8]) -> Result<Option<&'static Encoding>> {
    let mut reader = Reader::from_reader(bytes);
    let Ok(Event::Decl(decl)) = reader.read_event() else {
        return Ok(None);
    };
    let Some(Ok(label)) = decl.encoding() else {
        return Ok(None);
    };

    match Encoding::for_label(&label) {
        // Without a byte order mark the bytes are ASCII-compatible
        Some(encoding) if encoding == UTF_16LE || encoding == UTF_16BE => Ok(Some(UTF_8)),
        Some(encoding) => Ok(Some(encoding)),
        None => Err(Error::UnknownEncoding {
            label: String::from_utf8_lossy(&label).into_owned(),
        }),
    }
}
