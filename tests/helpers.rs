//! Shared test utilities for rdgen tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A throwaway project tree laid out the way rdgen expects:
///
/// ```text
/// <root>/
///   ramdisk/manifest.txt
///   include/            (output lands here)
/// ```
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Project root (primary lookup root for sources)
    pub root: PathBuf,
    /// Directory holding the manifest (fallback lookup root)
    pub manifest_dir: PathBuf,
    pub manifest: PathBuf,
    pub output: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let manifest_dir = root.join("ramdisk");
        fs::create_dir_all(&manifest_dir).expect("Failed to create manifest dir");

        Self {
            manifest: manifest_dir.join("manifest.txt"),
            output: root.join("include/ramdisk_files.h"),
            _temp_dir: temp_dir,
            root,
            manifest_dir,
        }
    }

    pub fn write_manifest(&self, text: &str) {
        fs::write(&self.manifest, text).expect("Failed to write manifest");
    }

    /// Write a source file relative to the project root.
    pub fn write_source(&self, rel: &str, content: &[u8]) -> PathBuf {
        write_file(&self.root, rel, content)
    }

    /// Write a source file next to the manifest.
    pub fn write_local_source(&self, rel: &str, content: &[u8]) -> PathBuf {
        write_file(&self.manifest_dir, rel, content)
    }

    pub fn output_text(&self) -> String {
        fs::read_to_string(&self.output).expect("Failed to read output")
    }

    /// Run the rdgen binary with `--manifest`/`--output` pointed at this env.
    pub fn run(&self, extra: &[&str]) -> Output {
        rdgen_command(&self.root)
            .arg("--manifest")
            .arg(&self.manifest)
            .arg("--output")
            .arg(&self.output)
            .args(extra)
            .output()
            .expect("Failed to run rdgen")
    }
}

/// An rdgen command with a clean RDGEN_* environment.
pub fn rdgen_command(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rdgen"));
    cmd.current_dir(cwd)
        .env_remove("RDGEN_MANIFEST")
        .env_remove("RDGEN_OUTPUT")
        .env_remove("RDGEN_GUARD")
        .env_remove("RDGEN_OPTIONAL");
    cmd
}

fn write_file(base: &Path, rel: &str, content: &[u8]) -> PathBuf {
    let path = base.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create source dir");
    }
    fs::write(&path, content).expect("Failed to write source");
    path
}

/// Pull the row for `path` out of the `rd_files[]` table.
pub fn table_row<'a>(doc: &'a str, path: &str) -> Option<&'a str> {
    let needle = format!("{{ \"{}\",", path);
    doc.lines().map(str::trim).find(|l| l.starts_with(&needle))
}

/// Pull the `static const unsigned char <ident>[] = {...};` declaration.
pub fn array_decl<'a>(doc: &'a str, ident: &str) -> Option<&'a str> {
    let start = doc.find(&format!("static const unsigned char {}[]", ident))?;
    let len = doc[start..].find("};")? + 2;
    Some(&doc[start..start + len])
}
