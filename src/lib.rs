//! rdgen - ramdisk bootstrap table generator.
//!
//! Turns a manifest of `<mode> <destination> <source>` lines into a C header
//! embedding each source file as a byte array, plus an `rd_files[]` table the
//! kernel's ramdisk driver walks at boot to populate the initial filesystem.
//!
//! See `tests/integration_tests.rs` for end-to-end usage.

pub mod common;
pub mod config;
pub mod document;
pub mod encode;
pub mod error;
pub mod generate;
pub mod ident;
pub mod manifest;
pub mod report;
pub mod resolve;
pub mod table;

pub use error::{GenError, Result};
pub use generate::{generate, generate_for_manifest, generate_from_text, Generated, Options};
