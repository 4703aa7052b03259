//! Shareable parameter strings.
//!
//! Each calculator can encode its inputs as an ordered query string
//! (`lmp=2025-03-01&cl=28`) so a result can be reproduced from a link.
//! Encoding keeps unreserved characters as-is and percent-encodes the rest;
//! parsing accepts `+` for space for compatibility with form encoding.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for share parameter handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShareParamsError {
    /// The query string contained an invalid percent escape.
    #[error("malformed percent escape in '{0}'")]
    MalformedEscape(String),

    /// A required key was absent.
    #[error("missing parameter '{0}'")]
    MissingKey(String),

    /// A value failed to parse as the requested type.
    #[error("invalid value '{value}' for parameter '{key}'")]
    InvalidValue { key: String, value: String },
}

/// An ordered list of key/value parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareParams {
    pairs: Vec<(String, String)>,
}

impl ShareParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter, keeping insertion order.
    pub fn push(
        &mut self,
        key: &str,
        value: impl ToString,
    ) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// First value for `key`, if present.
    pub fn get(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// # Errors
    ///
    /// Returns [`ShareParamsError`] when the key is absent or its value is
    /// not a decimal.
    pub fn decimal(
        &self,
        key: &str,
    ) -> Result<Decimal, ShareParamsError> {
        self.typed(key, |value| value.parse().ok())
    }

    /// # Errors
    ///
    /// Returns [`ShareParamsError`] when the key is absent or its value is
    /// not an integer.
    pub fn integer(
        &self,
        key: &str,
    ) -> Result<i64, ShareParamsError> {
        self.typed(key, |value| value.parse().ok())
    }

    /// # Errors
    ///
    /// Returns [`ShareParamsError`] when the key is absent or its value is
    /// not an ISO `YYYY-MM-DD` date.
    pub fn date(
        &self,
        key: &str,
    ) -> Result<NaiveDate, ShareParamsError> {
        self.typed(key, |value| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
    }

    fn typed<T>(
        &self,
        key: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T, ShareParamsError> {
        let value = self
            .get(key)
            .ok_or_else(|| ShareParamsError::MissingKey(key.to_string()))?;
        parse(value).ok_or_else(|| ShareParamsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// Encodes to `key=value&key=value` with percent escaping.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Parses a query string, with or without a leading `?`.
    ///
    /// # Errors
    ///
    /// Returns [`ShareParamsError::MalformedEscape`] on a bad percent escape.
    pub fn parse(query: &str) -> Result<Self, ShareParamsError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params
                .pairs
                .push((decode(key)?, decode(value)?));
        }
        Ok(params)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn decode(encoded: &str) -> Result<String, ShareParamsError> {
    let mut bytes = Vec::with_capacity(encoded.len());
    let mut rest = encoded.as_bytes();
    while let Some((&byte, tail)) = rest.split_first() {
        match byte {
            b'%' => {
                let Some(hex) = tail.get(..2) else {
                    return Err(ShareParamsError::MalformedEscape(encoded.to_string()));
                };
                let hex = std::str::from_utf8(hex)
                    .ok()
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(|| ShareParamsError::MalformedEscape(encoded.to_string()))?;
                bytes.push(hex);
                rest = &tail[2..];
            }
            b'+' => {
                bytes.push(b' ');
                rest = tail;
            }
            _ => {
                bytes.push(byte);
                rest = tail;
            }
        }
    }
    String::from_utf8(bytes)
        .map_err(|_| ShareParamsError::MalformedEscape(encoded.to_string()))
}
