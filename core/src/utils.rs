//! Utility functions and types.

use std::fmt::Debug;

/// Masks a secret when it appears in Debug output.
///
/// Secrets of 12 or more characters keep their first and last three, so two
/// redacted values can still be told apart in logs without leaking anything
/// useful. Shorter secrets are masked entirely. Byte secrets that are not
/// valid UTF-8 are always masked entirely.
pub struct Redact<'a>(Source<'a>);

enum Source<'a> {
    Str(&'a str),
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(Source::Str(value))
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(Source::Str(value.as_str()))
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact(Source::Str("")),
            Some(v) => Redact(Source::Str(v)),
        }
    }
}

impl<'a> From<&'a [u8]> for Redact<'a> {
    fn from(value: &'a [u8]) -> Self {
        Redact(Source::Bytes(value))
    }
}

impl<'a> From<&'a Vec<u8>> for Redact<'a> {
    fn from(value: &'a Vec<u8>) -> Self {
        Redact(Source::Bytes(value.as_slice()))
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match &self.0 {
            Source::Str(s) => *s,
            Source::Bytes(b) => match std::str::from_utf8(b) {
                Ok(s) => s,
                Err(_) => return f.write_str("***"),
            },
        };

        let length = s.len();
        if length == 0 {
            f.write_str("EMPTY")
        } else if length < 12 || !s.is_char_boundary(3) || !s.is_char_boundary(length - 3) {
            f.write_str("***")
        } else {
            f.write_str(&s[..3])?;
            f.write_str("***")?;
            f.write_str(&s[length - 3..])
        }
    }
}
