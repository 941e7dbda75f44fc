//! File table assembly: destination normalization, last-wins deduplication
//! and identifier assignment.

use std::collections::HashMap;
use std::path::PathBuf;

use sha2::{Digest, Sha256};

use crate::encode::emit_array;
use crate::ident::IdentRegistry;
use crate::manifest::{ManifestEntry, Mode};
use crate::resolve::ResolvedSource;

/// One row of the generated `rd_files[]` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Normalized absolute destination path.
    pub path: String,
    pub identifier: String,
    /// Logical file size. Zero for empty files even though their array holds one placeholder byte.
    pub size: usize,
    pub mode: Mode,
    /// Rendered `static const unsigned char` declaration.
    pub array: String,
    /// Hex SHA-256 of the content.
    pub sha256: String,
    pub source: PathBuf,
    pub line_no: usize,
}

/// Emitted when a later manifest line replaces an earlier one for the same path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Superseded {
    pub path: String,
    pub previous_line: usize,
    pub line: usize,
}

/// Emitted when an identifier had to be suffixed to stay unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
    pub path: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Default)]
pub struct Inserted {
    pub superseded: Option<Superseded>,
    pub renamed: Option<Renamed>,
}

/// Normalize a destination to `/a/b/c` form.
///
/// Adds the leading slash, collapses repeated separators, drops `.` segments
/// and a trailing slash, and resolves `..` without climbing above `/`.
pub fn normalize_path(dest: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for seg in dest.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    format!("/{}", parts.join("/"))
}

/// Insertion-ordered table keyed by normalized destination path.
///
/// A record keeps the position where its path was first seen; its contents
/// come from the last manifest line that named that path.
#[derive(Debug, Default)]
pub struct FileTable {
    records: Vec<FileRecord>,
    index: HashMap<String, usize>,
    idents: IdentRegistry,
}

impl FileTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: &ManifestEntry, source: ResolvedSource) -> Inserted {
        let path = normalize_path(&entry.destination);
        let assigned = self.idents.assign(&path);

        let record = FileRecord {
            array: emit_array(&assigned.ident, &source.content),
            sha256: format!("{:x}", Sha256::digest(&source.content)),
            size: source.content.len(),
            identifier: assigned.ident.clone(),
            mode: entry.mode,
            source: source.path,
            line_no: entry.line_no,
            path: path.clone(),
        };

        let renamed = assigned.renamed_from.map(|from| Renamed {
            path: path.clone(),
            from,
            to: assigned.ident,
        });

        let superseded = match self.index.get(&path).copied() {
            Some(slot) => {
                let previous_line = self.records[slot].line_no;
                self.records[slot] = record;
                Some(Superseded {
                    path,
                    previous_line,
                    line: entry.line_no,
                })
            }
            None => {
                self.index.insert(path, self.records.len());
                self.records.push(record);
                None
            }
        };

        Inserted {
            superseded,
            renamed,
        }
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<FileRecord> {
        self.records
    }
}
