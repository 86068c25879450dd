//! Table configuration: the literal alphabet plus the reserved prefix and suffix.

use crate::byteset::ByteSet;
use crate::error::{CpError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The PICO-8 one-byte charset (newline excluded).
pub const PICO8_CHARSET: &[u8] = b" 0123456789abcdefghijklmnopqrstuvwxyz!#%(){}[]<>+=/*:;.,~_";
/// Reserved header bytes of the generated table.
pub const PICO8_PREFIX: &[u8] = b",i";
/// Reserved trailing bytes of the generated table.
pub const PICO8_SUFFIX: &[u8] = b"do t[sub(";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Bytes usable literally, in canonical order.
    #[serde(with = "text_bytes")]
    pub alphabet: Vec<u8>,
    #[serde(with = "text_bytes")]
    pub prefix: Vec<u8>,
    #[serde(with = "text_bytes")]
    pub suffix: Vec<u8>,
}

impl TableConfig {
    pub fn new(
        alphabet: impl Into<Vec<u8>>,
        prefix: impl Into<Vec<u8>>,
        suffix: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        let config = Self {
            alphabet: alphabet.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// PICO-8 cart defaults. Prefix and suffix bytes are dropped from the
    /// charset so they never show up among the leftover bytes.
    pub fn pico8() -> Self {
        let reserved = ByteSet::from_bytes(PICO8_PREFIX).union(&ByteSet::from_bytes(PICO8_SUFFIX));
        Self {
            alphabet: PICO8_CHARSET
                .iter()
                .copied()
                .filter(|&b| !reserved.contains(b))
                .collect(),
            prefix: PICO8_PREFIX.to_vec(),
            suffix: PICO8_SUFFIX.to_vec(),
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        tracing::debug!(
            path = %path.as_ref().display(),
            alphabet_len = config.alphabet.len(),
            "loaded table config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.alphabet.is_empty() {
            return Err(CpError::Config("alphabet is empty".into()));
        }
        let mut seen = ByteSet::new();
        for &b in &self.alphabet {
            if !seen.insert(b) {
                return Err(CpError::Config(format!(
                    "alphabet contains '{}' more than once",
                    b.escape_ascii()
                )));
            }
        }
        for (name, bytes) in [("prefix", &self.prefix), ("suffix", &self.suffix)] {
            if let Some(b) = bytes.iter().find(|&&b| seen.contains(b)) {
                return Err(CpError::Config(format!(
                    "{name} byte '{}' is also an alphabet byte",
                    b.escape_ascii()
                )));
            }
        }
        Ok(())
    }

    /// Bytes that may never appear literally: everything outside the
    /// alphabet, plus whatever the prefix and suffix use.
    pub fn excluded_bytes(&self) -> ByteSet {
        let mut excluded = ByteSet::full();
        for &b in &self.alphabet {
            excluded.remove(b);
        }
        excluded.extend(&self.prefix);
        excluded.extend(&self.suffix);
        excluded
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::pico8()
    }
}

/// Byte strings stored as plain JSON strings.
mod text_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        match std::str::from_utf8(bytes) {
            Ok(text) => s.serialize_str(text),
            Err(e) => Err(serde::ser::Error::custom(e)),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        Ok(String::deserialize(d)?.into_bytes())
    }
}
