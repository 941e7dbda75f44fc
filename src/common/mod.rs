//! Shared utilities across rdgen modules.

pub mod files;

pub use files::write_atomic;
