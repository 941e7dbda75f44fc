//! Source file resolution.
//!
//! Manifest source references are relative to the project root, which by
//! convention is the manifest's grandparent directory (manifests live in
//! `<root>/<subdir>/`). References that don't exist there are looked up
//! next to the manifest itself.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GenError, Result};

/// A source reference that was found and read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub path: PathBuf,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ResolvedSource),
    /// No candidate exists; `tried` lists the candidates in lookup order.
    Missing { tried: Vec<PathBuf> },
}

/// Something that can turn a manifest source reference into bytes.
pub trait SourceLoader {
    fn load(&self, source_ref: &str) -> Result<Resolution>;
}

/// Base directories searched for manifest sources, in order.
#[derive(Debug, Clone)]
pub struct SearchRoots {
    /// Project root: the manifest's grandparent directory.
    pub primary: PathBuf,
    /// The manifest's own directory.
    pub fallback: PathBuf,
}

impl SearchRoots {
    /// Derive search roots from the manifest location.
    ///
    /// The manifest path is canonicalized first so that a bare `manifest.txt`
    /// still has a meaningful grandparent. A manifest sitting directly in `/`
    /// uses `/` for both roots.
    pub fn for_manifest(manifest: &Path) -> Result<Self> {
        let manifest = manifest
            .canonicalize()
            .map_err(|e| GenError::io(manifest, e))?;
        let fallback = manifest
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));
        let primary = fallback
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| fallback.clone());
        Ok(Self { primary, fallback })
    }

    /// Candidate paths for a source reference, in lookup order.
    pub fn candidates(&self, source_ref: &str) -> [PathBuf; 2] {
        [self.primary.join(source_ref), self.fallback.join(source_ref)]
    }
}

impl SourceLoader for SearchRoots {
    fn load(&self, source_ref: &str) -> Result<Resolution> {
        let candidates = self.candidates(source_ref);
        for candidate in &candidates {
            if candidate.is_file() {
                // Whole-file binary read, no newline or encoding handling.
                let content = fs::read(candidate).map_err(|e| GenError::io(candidate, e))?;
                return Ok(Resolution::Found(ResolvedSource {
                    path: candidate.clone(),
                    content,
                }));
            }
        }
        Ok(Resolution::Missing {
            tried: candidates.to_vec(),
        })
    }
}

/// In-memory sources keyed by reference, for running the pipeline without a filesystem.
impl SourceLoader for HashMap<String, Vec<u8>> {
    fn load(&self, source_ref: &str) -> Result<Resolution> {
        Ok(match self.get(source_ref) {
            Some(content) => Resolution::Found(ResolvedSource {
                path: PathBuf::from(source_ref),
                content: content.clone(),
            }),
            None => Resolution::Missing { tried: Vec::new() },
        })
    }
}
