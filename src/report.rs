//! JSON build report, written next to the header on request.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::common::write_atomic;
use crate::generate::Generated;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildReport {
    /// Manifest the header was generated from.
    pub manifest: String,
    pub files: Vec<ReportFile>,
    pub skipped: Vec<ReportSkipped>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportFile {
    pub path: String,
    pub identifier: String,
    pub size: usize,
    /// Octal text, as emitted in the header (e.g. "0755").
    pub mode: String,
    pub sha256: String,
    pub source: String,
    pub line: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportSkipped {
    pub destination: String,
    pub source: String,
    pub line: usize,
}

impl BuildReport {
    pub fn from_generated(manifest: &Path, gen: &Generated) -> Self {
        Self {
            manifest: manifest.display().to_string(),
            files: gen
                .records
                .iter()
                .map(|r| ReportFile {
                    path: r.path.clone(),
                    identifier: r.identifier.clone(),
                    size: r.size,
                    mode: r.mode.to_string(),
                    sha256: r.sha256.clone(),
                    source: r.source.display().to_string(),
                    line: r.line_no,
                })
                .collect(),
            skipped: gen
                .skipped
                .iter()
                .map(|s| ReportSkipped {
                    destination: s.destination.clone(),
                    source: s.source_ref.clone(),
                    line: s.line_no,
                })
                .collect(),
        }
    }

    /// Save report to a JSON file atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        write_atomic(path, json)
    }

    /// Load report from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let report: Self = serde_json::from_str(&json)?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{generate_from_text, Options};
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_report_lists_files_and_skips() {
        let loader: HashMap<String, Vec<u8>> =
            [("init".to_string(), b"#!/bin/sh\n".to_vec())].into_iter().collect();
        let opts = Options {
            optional: true,
            ..Options::default()
        };
        let gen = generate_from_text("755 /init init\n644 /etc/gone gone\n", &loader, &opts).unwrap();
        let report = BuildReport::from_generated(Path::new("ramdisk/manifest.txt"), &gen);

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].mode, "0755");
        assert_eq!(report.files[0].size, 10);
        assert_eq!(report.files[0].identifier, "rd__init");
        assert_eq!(report.skipped[0].destination, "/etc/gone");
        assert_eq!(report.skipped[0].line, 2);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        report.save(&path).unwrap();
        assert_eq!(BuildReport::load(&path).unwrap(), report);
    }
}
