//! Host-facing engine configuration, loaded from TOML.

use crate::codec::CodecLimits;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("TOML deserialization error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config field '{field}' must be greater than zero")]
    ZeroLimit { field: &'static str },
}

///
/// SiftConfig
///
/// ```toml
/// [codec]
/// max_depth = 32
/// max_bytes = 65536
/// ```
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiftConfig {
    pub codec: CodecLimits,
}

impl SiftConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    /// Reject limits that would make every decode fail.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.codec;
        let field = if limits.max_bytes == 0 {
            "codec.max_bytes"
        } else if limits.max_depth == 0 {
            "codec.max_depth"
        } else if limits.max_string_len == 0 {
            "codec.max_string_len"
        } else if limits.max_children == 0 {
            "codec.max_children"
        } else {
            return Ok(());
        };

        Err(ConfigError::ZeroLimit { field })
    }

    #[must_use]
    pub const fn codec_limits(&self) -> CodecLimits {
        self.codec
    }
}

///
/// TESTS
///
