//! Configuration management for rdgen.
//!
//! Reads configuration from environment variables. `main` loads a `.env`
//! file first (via dotenvy), so values there act as defaults that the real
//! environment overrides. Command-line flags override both.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::document::DEFAULT_GUARD;

pub const ENV_MANIFEST: &str = "RDGEN_MANIFEST";
pub const ENV_OUTPUT: &str = "RDGEN_OUTPUT";
pub const ENV_GUARD: &str = "RDGEN_GUARD";
pub const ENV_OPTIONAL: &str = "RDGEN_OPTIONAL";

/// rdgen configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fallback for `--manifest`
    pub manifest: Option<PathBuf>,
    /// Fallback for `--output`
    pub output: Option<PathBuf>,
    /// Include-guard macro (default: RAMDISK_FILES_H)
    pub guard: String,
    /// Default for `--optional`
    pub optional: bool,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Self {
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Self {
        let non_empty = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        Self {
            manifest: non_empty(ENV_MANIFEST).map(PathBuf::from),
            output: non_empty(ENV_OUTPUT).map(PathBuf::from),
            guard: non_empty(ENV_GUARD)
                .unwrap_or(DEFAULT_GUARD)
                .to_string(),
            optional: non_empty(ENV_OPTIONAL).is_some_and(parse_bool),
        }
    }

    /// Print configuration for debugging.
    pub fn print(&self) {
        let show = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unset)".to_string())
        };
        println!("Configuration:");
        println!("  {}: {}", ENV_MANIFEST, show(&self.manifest));
        println!("  {}: {}", ENV_OUTPUT, show(&self.output));
        println!("  {}: {}", ENV_GUARD, self.guard);
        println!("  {}: {}", ENV_OPTIONAL, self.optional);
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::from_vars(HashMap::new());
        assert_eq!(cfg.manifest, None);
        assert_eq!(cfg.output, None);
        assert_eq!(cfg.guard, "RAMDISK_FILES_H");
        assert!(!cfg.optional);
    }

    #[test]
    fn test_reads_values() {
        let cfg = Config::from_vars(vars(&[
            (ENV_MANIFEST, "ramdisk/manifest.txt"),
            (ENV_OUTPUT, "kernel/ramdisk_files.h"),
            (ENV_GUARD, "RD_H"),
            (ENV_OPTIONAL, "Yes"),
        ]));
        assert_eq!(cfg.manifest, Some(PathBuf::from("ramdisk/manifest.txt")));
        assert_eq!(cfg.output, Some(PathBuf::from("kernel/ramdisk_files.h")));
        assert_eq!(cfg.guard, "RD_H");
        assert!(cfg.optional);
    }

    #[test]
    fn test_blank_values_are_unset() {
        let cfg = Config::from_vars(vars(&[(ENV_MANIFEST, "  "), (ENV_GUARD, "")]));
        assert_eq!(cfg.manifest, None);
        assert_eq!(cfg.guard, "RAMDISK_FILES_H");
    }

    #[test]
    fn test_optional_false_values() {
        for v in ["0", "false", "no", "off", "maybe"] {
            assert!(!Config::from_vars(vars(&[(ENV_OPTIONAL, v)])).optional);
        }
    }
}
