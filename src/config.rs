//! Configuration for msgtx-codec
//!
//! Provides the size bounds and strictness policy applied while decoding
//! untrusted payloads, plus logging switches. Settings can be loaded from
//! config files (via serde), environment variables, or passed programmatically.

use crate::constants::MAX_PROTOCOL_MESSAGE_LENGTH;
use serde::{Deserialize, Serialize};

/// Size limits applied to peer-supplied lengths and counts
///
/// Every VarInt-derived length is checked against these bounds before any
/// buffer is allocated for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireLimits {
    /// Maximum payload size accepted (Bitcoin Core: 4,000,000 bytes)
    /// Also bounds input, output and witness item counts.
    #[serde(default = "default_max_message_size")]
    pub max_message_size: usize,

    /// Maximum signature script / pubkey script length in bytes
    /// Default: 4,000,000 (the payload bound)
    #[serde(default = "default_max_script_length")]
    pub max_script_length: usize,

    /// Maximum length of a single witness stack item in bytes
    /// Default: 4,000,000 (the payload bound)
    #[serde(default = "default_max_witness_item_length")]
    pub max_witness_item_length: usize,

    /// Reject VarInts encoded wider than their value requires
    /// Default: true (Bitcoin Core rejects non-canonical CompactSize)
    /// When false, a payload using wide VarInts decodes but re-encodes with
    /// minimal widths, so it does not round-trip byte-exact.
    #[serde(default = "default_true")]
    pub reject_non_canonical_varints: bool,
}

fn default_max_message_size() -> usize {
    MAX_PROTOCOL_MESSAGE_LENGTH
}

fn default_max_script_length() -> usize {
    MAX_PROTOCOL_MESSAGE_LENGTH
}

fn default_max_witness_item_length() -> usize {
    MAX_PROTOCOL_MESSAGE_LENGTH
}

fn default_true() -> bool {
    true
}

impl Default for WireLimits {
    fn default() -> Self {
        Self {
            max_message_size: default_max_message_size(),
            max_script_length: default_max_script_length(),
            max_witness_item_length: default_max_witness_item_length(),
            reject_non_canonical_varints: true,
        }
    }
}

/// Debug and logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Emit `trace` records for format detection and section boundaries
    /// Default: false
    #[serde(default)]
    pub enable_verbose_logging: bool,

    /// Emit a `debug` record for every rejected payload
    /// Default: true
    #[serde(default = "default_true")]
    pub log_rejections: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enable_verbose_logging: false,
            log_rejections: true,
        }
    }
}

/// Complete codec configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodecConfig {
    #[serde(default)]
    pub limits: WireLimits,

    #[serde(default)]
    pub debug: DebugConfig,
}

impl CodecConfig {
    /// Load configuration from environment variables
    ///
    /// Unset or unparseable variables leave the default in place.
    ///
    /// - `MSGTX_CODEC_LIMITS_MAX_MESSAGE_SIZE`
    /// - `MSGTX_CODEC_LIMITS_MAX_SCRIPT_LENGTH`
    /// - `MSGTX_CODEC_LIMITS_MAX_WITNESS_ITEM_LENGTH`
    /// - `MSGTX_CODEC_LIMITS_REJECT_NON_CANONICAL_VARINTS`
    /// - `MSGTX_CODEC_DEBUG_ENABLE_VERBOSE_LOGGING`
    /// - `MSGTX_CODEC_DEBUG_LOG_REJECTIONS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("MSGTX_CODEC_LIMITS_MAX_MESSAGE_SIZE") {
            if let Ok(size) = val.parse::<usize>() {
                config.limits.max_message_size = size;
            }
        }
        if let Some(val) = lookup("MSGTX_CODEC_LIMITS_MAX_SCRIPT_LENGTH") {
            if let Ok(len) = val.parse::<usize>() {
                config.limits.max_script_length = len;
            }
        }
        if let Some(val) = lookup("MSGTX_CODEC_LIMITS_MAX_WITNESS_ITEM_LENGTH") {
            if let Ok(len) = val.parse::<usize>() {
                config.limits.max_witness_item_length = len;
            }
        }
        if let Some(val) = lookup("MSGTX_CODEC_LIMITS_REJECT_NON_CANONICAL_VARINTS") {
            if let Ok(enabled) = val.parse::<bool>() {
                config.limits.reject_non_canonical_varints = enabled;
            }
        }

        if let Some(val) = lookup("MSGTX_CODEC_DEBUG_ENABLE_VERBOSE_LOGGING") {
            if let Ok(enabled) = val.parse::<bool>() {
                config.debug.enable_verbose_logging = enabled;
            }
        }
        if let Some(val) = lookup("MSGTX_CODEC_DEBUG_LOG_REJECTIONS") {
            if let Ok(enabled) = val.parse::<bool>() {
                config.debug.log_rejections = enabled;
            }
        }

        config
    }

    /// Configuration that accepts non-minimal VarInts
    ///
    /// Encoding always writes minimal VarInts, so a payload accepted only
    /// under this policy re-encodes to different (shorter) bytes.
    pub fn permissive() -> Self {
        let mut config = Self::default();
        config.limits.reject_non_canonical_varints = false;
        config
    }
}

/// Global codec configuration instance
///
/// Initialized once at startup; the plain (non `_with_config`) codec entry
/// points read it.
static GLOBAL_CODEC_CONFIG: std::sync::OnceLock<CodecConfig> = std::sync::OnceLock::new();

/// Initialize global codec configuration
///
/// Returns the rejected config if one was already installed.
pub fn init_codec_config(config: CodecConfig) -> std::result::Result<(), CodecConfig> {
    GLOBAL_CODEC_CONFIG.set(config)
}

/// Get global codec configuration
///
/// Returns the global config if initialized, otherwise loads it from the environment.
pub fn get_codec_config() -> CodecConfig {
    GLOBAL_CODEC_CONFIG
        .get()
        .cloned()
        .unwrap_or_else(CodecConfig::from_env)
}
