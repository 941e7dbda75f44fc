//! rdgen - generate the ramdisk bootstrap header from a manifest.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use rdgen::common::write_atomic;
use rdgen::config::Config;
use rdgen::generate::{generate_for_manifest, Options};
use rdgen::report::BuildReport;
use rdgen::GenError;

#[derive(Parser)]
#[command(name = "rdgen")]
#[command(about = "Embed manifest-listed files into a ramdisk bootstrap header")]
#[command(
    after_help = "MANIFEST FORMAT:\n  <mode> <destination> <source>   one entry per line, '#' starts a comment\n\nEXAMPLE:\n  rdgen --manifest ramdisk/manifest.txt --output kernel/ramdisk_files.h"
)]
struct Cli {
    /// Manifest file (default: $RDGEN_MANIFEST)
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Header to generate (default: $RDGEN_OUTPUT)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Skip missing source files with a warning instead of failing
    #[arg(long)]
    optional: bool,

    /// Also write a JSON report of embedded and skipped files
    #[arg(long)]
    report: Option<PathBuf>,

    /// Suppress the summary line
    #[arg(short, long)]
    quiet: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    show_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env if present
    dotenvy::dotenv().ok();
    let config = Config::load();

    if cli.show_config {
        config.print();
        return Ok(());
    }

    let manifest = cli
        .manifest
        .or(config.manifest)
        .ok_or(GenError::MissingArgument("--manifest"))?;
    let output = cli
        .output
        .or(config.output)
        .ok_or(GenError::MissingArgument("--output"))?;

    let opts = Options {
        optional: cli.optional || config.optional,
        guard: config.guard,
    };

    let gen = generate_for_manifest(&manifest, &opts)
        .with_context(|| format!("Failed to generate from {}", manifest.display()))?;

    for diag in &gen.diagnostics {
        eprintln!("  [WARN] {}", diag);
    }

    write_atomic(&output, &gen.document)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    if let Some(report_path) = &cli.report {
        BuildReport::from_generated(&manifest, &gen)
            .save(report_path)
            .with_context(|| format!("Failed to write report {}", report_path.display()))?;
    }

    if !cli.quiet {
        let bytes: usize = gen.records.iter().map(|r| r.size).sum();
        println!(
            "Generated {} ({} files, {} bytes embedded, {} skipped)",
            output.display(),
            gen.records.len(),
            bytes,
            gen.skipped.len()
        );
    }

    Ok(())
}
