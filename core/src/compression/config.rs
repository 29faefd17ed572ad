//! compression/config.rs
//! Immutable codec configuration: optional level and optional shared dictionary.
//!
//! A `CodecConfig` is validated once, when a codec or session is built from it.
//! Nothing is validated lazily on first use.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::compression::constants::{DEFAULT_LEVEL_ZSTD, DICTIONARY_MAGIC, MIN_DICTIONARY_SIZE};
use crate::compression::types::{CompressionError, Result};

/// Shared, read-only dictionary bytes.
///
/// Cloning is cheap; every clone refers to the same immutable buffer, so many
/// sessions may hold the same dictionary concurrently.
#[derive(Clone, PartialEq, Eq)]
pub struct Dictionary(Bytes);

impl Dictionary {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Dictionary(bytes.into())
    }

    /// Copy `bytes` into a new owned dictionary.
    pub fn copy_from_slice(bytes: &[u8]) -> Self {
        Dictionary(Bytes::copy_from_slice(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True for dictionaries produced by the zstd trainer (magic-prefixed).
    /// Anything else is loaded as raw content.
    pub fn is_trained(&self) -> bool {
        self.0.starts_with(&DICTIONARY_MAGIC)
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("len", &self.0.len())
            .field("trained", &self.is_trained())
            .finish()
    }
}

impl From<Vec<u8>> for Dictionary {
    fn from(v: Vec<u8>) -> Self {
        Dictionary::new(v)
    }
}

impl From<&'static [u8]> for Dictionary {
    fn from(s: &'static [u8]) -> Self {
        Dictionary::new(Bytes::from_static(s))
    }
}

impl From<Bytes> for Dictionary {
    fn from(b: Bytes) -> Self {
        Dictionary(b)
    }
}

/// Named level presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecLevel {
    Fastest,
    Default,
    Balanced,
    Best,
    Custom(i32),
}

impl CodecLevel {
    pub fn value(self) -> i32 {
        match self {
            CodecLevel::Fastest   => 1,
            CodecLevel::Default   => DEFAULT_LEVEL_ZSTD,
            CodecLevel::Balanced  => 9,
            CodecLevel::Best      => zstd_safe::max_c_level(),
            CodecLevel::Custom(v) => v,
        }
    }
}

/// Construction options shared by `SimpleCodec`, `StreamingSession` and
/// `StreamingDecompressor`.
///
/// The level serializes; the dictionary does not (it is supplied in memory).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodecConfig {
    #[serde(default)]
    level: Option<i32>,
    #[serde(skip)]
    dictionary: Option<Dictionary>,
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_codec_level(self, level: CodecLevel) -> Self {
        self.with_level(level.value())
    }

    pub fn with_dictionary(mut self, dictionary: impl Into<Dictionary>) -> Self {
        self.dictionary = Some(dictionary.into());
        self
    }

    pub fn level(&self) -> Option<i32> {
        self.level
    }

    pub fn dictionary(&self) -> Option<&Dictionary> {
        self.dictionary.as_ref()
    }

    /// The level handed to the codec: the configured one, or the codec default.
    pub fn resolved_level(&self) -> i32 {
        self.level.unwrap_or(DEFAULT_LEVEL_ZSTD)
    }

    /// Reject out-of-range levels and dictionaries the codec would ignore.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.level {
            let (min, max) = (zstd_safe::min_c_level(), zstd_safe::max_c_level());
            if !(min..=max).contains(&level) {
                return Err(CompressionError::configuration(format!(
                    "level {} outside supported range {}..={}",
                    level, min, max
                )));
            }
        }
        if let Some(dict) = &self.dictionary {
            if dict.len() < MIN_DICTIONARY_SIZE {
                return Err(CompressionError::configuration(format!(
                    "dictionary of {} bytes is too small (minimum {})",
                    dict.len(),
                    MIN_DICTIONARY_SIZE
                )));
            }
        }
        Ok(())
    }
}
