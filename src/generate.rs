//! The generation pipeline.
//!
//! ```text
//! manifest text -> entries -> resolve each source -> FileTable -> header text
//! ```
//!
//! [`generate`] is pure apart from what the [`SourceLoader`] does: it returns
//! the document and diagnostics and never writes or prints anything. Every
//! fatal condition surfaces here, before anything is written.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::document::{self, DEFAULT_GUARD};
use crate::error::{GenError, Result};
use crate::manifest::{load_manifest, parse_manifest, ManifestEntry};
use crate::resolve::{Resolution, SearchRoots, SourceLoader};
use crate::table::{FileRecord, FileTable, Renamed, Superseded};

#[derive(Debug, Clone)]
pub struct Options {
    /// Skip missing sources with a warning instead of failing.
    pub optional: bool,
    /// Include-guard macro name.
    pub guard: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            optional: false,
            guard: DEFAULT_GUARD.to_string(),
        }
    }
}

/// A source reference skipped under `--optional`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub line_no: usize,
    pub destination: String,
    pub source_ref: String,
    pub tried: Vec<PathBuf>,
}

/// Non-fatal findings, reported on stderr by the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    MissingSource(Skipped),
    Superseded(Superseded),
    Renamed(Renamed),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingSource(s) => write!(
                f,
                "missing {} (line {}), {} not embedded",
                s.source_ref, s.line_no, s.destination
            ),
            Diagnostic::Superseded(s) => write!(
                f,
                "{} on line {} replaces line {}",
                s.path, s.line, s.previous_line
            ),
            Diagnostic::Renamed(r) => write!(
                f,
                "identifier {} for {} already taken, using {}",
                r.from, r.path, r.to
            ),
        }
    }
}

/// Everything a run produced.
#[derive(Debug)]
pub struct Generated {
    pub document: String,
    pub records: Vec<FileRecord>,
    pub skipped: Vec<Skipped>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Build the header from parsed entries.
pub fn generate<L: SourceLoader + ?Sized>(
    entries: &[ManifestEntry],
    loader: &L,
    opts: &Options,
) -> Result<Generated> {
    let mut table = FileTable::new();
    let mut skipped = Vec::new();
    let mut diagnostics = Vec::new();

    for entry in entries {
        let source = match loader.load(&entry.source_ref)? {
            Resolution::Found(source) => source,
            Resolution::Missing { tried } => {
                if !opts.optional {
                    return Err(GenError::SourceNotFound {
                        source_ref: entry.source_ref.clone(),
                        tried,
                    });
                }
                let skip = Skipped {
                    line_no: entry.line_no,
                    destination: entry.destination.clone(),
                    source_ref: entry.source_ref.clone(),
                    tried,
                };
                diagnostics.push(Diagnostic::MissingSource(skip.clone()));
                skipped.push(skip);
                continue;
            }
        };

        let inserted = table.insert(entry, source);
        if let Some(renamed) = inserted.renamed {
            diagnostics.push(Diagnostic::Renamed(renamed));
        }
        if let Some(superseded) = inserted.superseded {
            diagnostics.push(Diagnostic::Superseded(superseded));
        }
    }

    let records = table.into_records();
    Ok(Generated {
        document: document::render(&records, &opts.guard),
        records,
        skipped,
        diagnostics,
    })
}

/// Parse manifest text and build the header.
pub fn generate_from_text<L: SourceLoader + ?Sized>(
    manifest: &str,
    loader: &L,
    opts: &Options,
) -> Result<Generated> {
    let entries = parse_manifest(manifest)?;
    generate(&entries, loader, opts)
}

/// Build the header for a manifest on disk, resolving sources relative to it.
pub fn generate_for_manifest(manifest: &Path, opts: &Options) -> Result<Generated> {
    let entries = load_manifest(manifest)?;
    let roots = SearchRoots::for_manifest(manifest)?;
    generate(&entries, &roots, opts)
}
