//! Ramdisk manifest parsing.
//!
//! A manifest is line-oriented text, one entry per line:
//!
//! ```text
//! # mode  destination   source
//! 0755    /bin/sh       build/busybox
//! 644     /etc/motd     motd.txt
//! ```
//!
//! Blank lines and lines whose first non-blank character is `#` are ignored.
//! Tokens past the third are ignored.

use std::fmt;
use std::path::Path;

use crate::error::{GenError, Result};

/// Highest permission value a mode field may carry (setuid/setgid/sticky + rwx).
pub const MAX_MODE: u16 = 0o7777;

/// Permission bits parsed from an octal mode field.
///
/// Every mode token is read as octal regardless of length or leading zeros,
/// so `755`, `0755` and `00755` all mean the same thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode(u16);

impl Mode {
    pub fn new(bits: u16) -> Option<Self> {
        (bits <= MAX_MODE).then_some(Self(bits))
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    /// Parse octal permission text. Returns `None` for empty, non-octal or
    /// out-of-range tokens.
    pub fn parse(token: &str) -> Option<Self> {
        if token.is_empty() || !token.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return None;
        }
        let digits = token.trim_start_matches('0');
        if digits.is_empty() {
            return Some(Self(0));
        }
        // More than four significant digits can only exceed 0o7777.
        if digits.len() > 4 {
            return None;
        }
        u16::from_str_radix(digits, 8).ok().and_then(Self::new)
    }
}

/// Renders as a C octal literal: a leading `0` followed by the octal digits.
impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0{:o}", self.0)
    }
}

/// One `<mode> <destination> <source>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// 1-based line number in the manifest, used in diagnostics.
    pub line_no: usize,
    pub mode: Mode,
    pub destination: String,
    pub source_ref: String,
}

/// Parse manifest text into entries, in line order.
pub fn parse_manifest(text: &str) -> Result<Vec<ManifestEntry>> {
    let mut entries = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let (Some(mode), Some(destination), Some(source_ref)) =
            (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(GenError::ManifestFormat {
                line_no,
                line: line.to_string(),
            });
        };

        let mode = Mode::parse(mode).ok_or_else(|| GenError::InvalidMode {
            line_no,
            mode: mode.to_string(),
        })?;

        entries.push(ManifestEntry {
            line_no,
            mode,
            destination: destination.to_string(),
            source_ref: source_ref.to_string(),
        });
    }

    Ok(entries)
}

/// Read and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<Vec<ManifestEntry>> {
    let text = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
    parse_manifest(&text)
}
