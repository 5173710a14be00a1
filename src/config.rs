//! Centralized configuration for the decoder CLI and exporters.
//!
//! - DumpConfig::from_env() reads NVS_* env vars on top of defaults.
//! - Fluent `with_*` setters and DumpBuilder for overrides (CLI flags win over env).
//!
//! Env:
//! - NVS_BLOB_DIR         - directory for `<key>.bin` side files (default "blob_data")
//! - NVS_INLINE_BLOB_MAX  - single-chunk blobs shorter than this go inline as base64 (default 100)
//! - NVS_INCLUDE_ERASED   - 1|true|yes|on: decode Erased slots too (default off)
//! - NVS_STRICT           - 1|true|yes|on: non-zero exit when anomalies were found (default off)

use std::fmt;
use std::path::PathBuf;

use crate::consts::{DEFAULT_BLOB_DIR, DEFAULT_INLINE_BLOB_MAX};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DumpConfig {
    /// Directory for reconstructed blob side files.
    /// Env: NVS_BLOB_DIR
    pub blob_dir: PathBuf,

    /// Inline threshold (bytes) for single-chunk blobs in CSV.
    /// Env: NVS_INLINE_BLOB_MAX
    pub inline_blob_max: usize,

    /// Decode Erased slots as records (diagnostics only).
    /// Env: NVS_INCLUDE_ERASED
    pub include_erased: bool,

    /// Treat anomalies as failure at the CLI level.
    /// Env: NVS_STRICT
    pub strict: bool,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            blob_dir: PathBuf::from(DEFAULT_BLOB_DIR),
            inline_blob_max: DEFAULT_INLINE_BLOB_MAX,
            include_erased: false,
            strict: false,
        }
    }
}

#[inline]
fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|v| {
        let s = v.trim().to_ascii_lowercase();
        s == "1" || s == "true" || s == "yes" || s == "on"
    })
}

impl DumpConfig {
    /// Defaults overridden by NVS_* environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("NVS_BLOB_DIR") {
            let s = v.trim();
            if !s.is_empty() {
                cfg.blob_dir = PathBuf::from(s);
            }
        }

        if let Ok(v) = std::env::var("NVS_INLINE_BLOB_MAX") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.inline_blob_max = n;
            }
        }

        if let Some(on) = env_flag("NVS_INCLUDE_ERASED") {
            cfg.include_erased = on;
        }
        if let Some(on) = env_flag("NVS_STRICT") {
            cfg.strict = on;
        }

        cfg
    }

    pub fn with_blob_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.blob_dir = dir.into();
        self
    }

    pub fn with_inline_blob_max(mut self, n: usize) -> Self {
        self.inline_blob_max = n;
        self
    }

    pub fn with_strict(mut self, on: bool) -> Self {
        self.strict = on;
        self
    }
}

impl fmt::Display for DumpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DumpConfig {{ blob_dir: {}, inline_blob_max: {}, include_erased: {}, strict: {} }}",
            self.blob_dir.display(),
            self.inline_blob_max,
            self.include_erased,
            self.strict
        )
    }
}

/// Builder that starts from env (like `DumpConfig::from_env`) and applies optional overrides.
#[derive(Clone, Debug)]
pub struct DumpBuilder {
    cfg: DumpConfig,
}

impl Default for DumpBuilder {
    fn default() -> Self {
        Self {
            cfg: DumpConfig::from_env(),
        }
    }
}

impl DumpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a clean default (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: DumpConfig::default(),
        }
    }

    pub fn blob_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(d) = dir {
            self.cfg.blob_dir = d;
        }
        self
    }

    pub fn inline_blob_max(mut self, n: Option<usize>) -> Self {
        if let Some(n) = n {
            self.cfg.inline_blob_max = n;
        }
        self
    }

    /// Flag from CLI: only switches on, never off (env may already have enabled it).
    pub fn include_erased(mut self, on: bool) -> Self {
        self.cfg.include_erased |= on;
        self
    }

    pub fn strict(mut self, on: bool) -> Self {
        self.cfg.strict |= on;
        self
    }

    pub fn build(self) -> DumpConfig {
        self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = DumpConfig::default();
        assert_eq!(c.blob_dir, PathBuf::from("blob_data"));
        assert_eq!(c.inline_blob_max, 100);
        assert!(!c.include_erased);
        assert!(!c.strict);
    }

    #[test]
    fn builder_overrides() {
        let c = DumpBuilder::from_default()
            .blob_dir(Some(PathBuf::from("/tmp/x")))
            .inline_blob_max(None)
            .include_erased(true)
            .build();
        assert_eq!(c.blob_dir, PathBuf::from("/tmp/x"));
        assert_eq!(c.inline_blob_max, 100);
        assert!(c.include_erased);

        let d = DumpConfig::default().with_inline_blob_max(8).with_strict(true);
        assert_eq!(d.inline_blob_max, 8);
        assert!(d.strict);
        assert!(d.to_string().contains("inline_blob_max: 8"));
    }
}
