//! Case-insensitive HTTP header table and its incremental parser.

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::http::error::ParseError;

const CRLF: &[u8] = b"\r\n";

/// Header fields keyed by lower-cased name.
///
/// A name stored twice is not overwritten: the new value is appended to the
/// existing one, joined by `", "`. Iteration follows first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    fields: IndexMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a header value by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&name.to_ascii_lowercase())
    }

    /// Stores a value, appending to any existing value for the same name.
    pub fn set(&mut self, name: &str, value: &str) {
        self.fields
            .entry(name.to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    /// Stores a value, overwriting any existing value for the same name.
    pub fn replace(&mut self, name: &str, value: &str) {
        self.fields
            .insert(name.to_ascii_lowercase(), value.to_string());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.fields.shift_remove(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parses as many complete header lines as `buf` holds.
    ///
    /// Returns the number of bytes consumed and whether the blank line ending
    /// the header section was reached. That blank line's CRLF counts as
    /// consumed. A trailing partial line is left
    /// unconsumed; the caller drops the consumed prefix and calls again once
    /// more bytes arrive.
    pub fn parse(&mut self, buf: &[u8]) -> Result<(usize, bool), ParseError> {
        let mut consumed = 0;

        loop {
            let rest = &buf[consumed..];
            let Some(idx) = find_crlf(rest) else {
                return Ok((consumed, false));
            };

            if idx == 0 {
                return Ok((consumed + CRLF.len(), true));
            }

            let (name, value) = parse_field_line(&rest[..idx])?;
            self.set(name, &value);
            consumed += idx + CRLF.len();
        }
    }
}

pub(crate) fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(CRLF.len()).position(|w| w == CRLF)
}

/// Splits `name: value`. Values are opaque bytes; anything that is not UTF-8
/// is stored with replacement characters.
fn parse_field_line(line: &[u8]) -> Result<(&str, Cow<'_, str>), ParseError> {
    let colon = line
        .iter()
        .position(|&b| b == b':')
        .ok_or(ParseError::InvalidHeaderLine)?;

    let name = trim_leading_spaces(&line[..colon]);
    let value = line[colon + 1..].trim_ascii();

    if !is_token(name) {
        return Err(ParseError::InvalidHeaderName(
            String::from_utf8_lossy(name).into_owned(),
        ));
    }

    // Token characters are ASCII.
    let name = std::str::from_utf8(name).map_err(|_| ParseError::InvalidHeaderLine)?;

    Ok((name, String::from_utf8_lossy(value)))
}

fn trim_leading_spaces(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| b != b' ')
        .unwrap_or(bytes.len());
    &bytes[start..]
}

/// `token` from RFC 9110: one or more tchars.
pub(crate) fn is_token(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(|&b| is_tchar(b))
}

fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}
