// Sun Oct 18 2026 - Alex

use crate::pattern::{Signature, DEFAULT_BYTE_MASK_UNKNOWN, DEFAULT_MASK_UNKNOWN};
use crate::scan::ScanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ScanError::InvalidConfig(format!("unknown output format '{}'", other))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Command-line values that take precedence over a loaded config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub mask_unknown: Option<char>,
    pub byte_mask_unknown: Option<u8>,
    pub output_format: Option<OutputFormat>,
    pub base_address: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mask_unknown: char,
    pub byte_mask_unknown: u8,
    pub output_format: OutputFormat,
    pub pretty_print: bool,
    pub base_address: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mask_unknown: DEFAULT_MASK_UNKNOWN as char,
            byte_mask_unknown: DEFAULT_BYTE_MASK_UNKNOWN,
            output_format: OutputFormat::Text,
            pretty_print: true,
            base_address: 0,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScanError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        self.mask_unknown_byte().map(|_| ())
    }

    /// String masks compare byte-wise, so the unknown marker must be ASCII.
    pub fn mask_unknown_byte(&self) -> Result<u8, ScanError> {
        if self.mask_unknown.is_ascii() {
            Ok(self.mask_unknown as u8)
        } else {
            Err(ScanError::InvalidConfig(format!(
                "mask unknown character '{}' is not ASCII",
                self.mask_unknown
            )))
        }
    }

    pub fn with_mask_unknown(mut self, unknown: char) -> Self {
        self.mask_unknown = unknown;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn with_base_address(mut self, base: u64) -> Self {
        self.base_address = base;
        self
    }

    pub fn with_byte_mask_unknown(mut self, unknown: u8) -> Self {
        self.byte_mask_unknown = unknown;
        self
    }

    /// Replaces every field the overrides set, keeps the rest, then validates.
    pub fn apply(mut self, overrides: &ConfigOverrides) -> Result<Self, ScanError> {
        if let Some(unknown) = overrides.mask_unknown {
            self.mask_unknown = unknown;
        }
        if let Some(unknown) = overrides.byte_mask_unknown {
            self.byte_mask_unknown = unknown;
        }
        if let Some(format) = overrides.output_format {
            self.output_format = format;
        }
        if let Some(base) = overrides.base_address {
            self.base_address = base;
        }

        self.validate()?;
        Ok(self)
    }

    /// Masked signature from a character mask such as `"xx?x"`.
    pub fn masked_signature(&self, pattern: &[u8], mask: &str) -> Result<Signature, ScanError> {
        Ok(Signature::masked_with(pattern, mask, self.mask_unknown_byte()?)?)
    }

    /// Masked signature from a byte mask such as `[1, 1, 0, 1]`.
    pub fn byte_masked_signature(&self, pattern: &[u8], mask: &[u8]) -> Result<Signature, ScanError> {
        Ok(Signature::masked_with(pattern, mask, self.byte_mask_unknown)?)
    }
}
