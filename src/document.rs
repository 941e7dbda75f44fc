//! Rendering of the `ramdisk_files.h` header.
//!
//! Layout is a contract with the kernel's ramdisk driver, which walks
//! `rd_files[]` until it hits a row with a null `path`:
//!
//! ```c
//! struct rd_file {
//!     const char *path;
//!     const unsigned char *data;
//!     unsigned int size;
//!     unsigned short mode;
//! };
//! ```

use std::fmt::Write;

use crate::table::FileRecord;

pub const DEFAULT_GUARD: &str = "RAMDISK_FILES_H";
pub const STRUCT_NAME: &str = "rd_file";
pub const TABLE_NAME: &str = "rd_files";

/// Render the complete header. Output depends only on `records` and `guard`.
pub fn render(records: &[FileRecord], guard: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "#ifndef {guard}");
    let _ = writeln!(out, "#define {guard}");
    out.push('\n');
    out.push_str("/* Generated by rdgen. Do not edit. */\n");
    out.push('\n');

    for rec in records {
        out.push_str(&rec.array);
        out.push('\n');
    }
    if !records.is_empty() {
        out.push('\n');
    }

    let _ = writeln!(out, "struct {STRUCT_NAME} {{");
    out.push_str("    const char *path;\n");
    out.push_str("    const unsigned char *data;\n");
    out.push_str("    unsigned int size;\n");
    out.push_str("    unsigned short mode;\n");
    out.push_str("};\n");
    out.push('\n');

    let _ = writeln!(out, "static const struct {STRUCT_NAME} {TABLE_NAME}[] = {{");
    for rec in records {
        let _ = writeln!(
            out,
            "    {{ {}, {}, {}, {} }},",
            c_string(&rec.path),
            rec.identifier,
            rec.size,
            rec.mode
        );
    }
    out.push_str("    { 0, 0, 0, 0 },\n");
    out.push_str("};\n");
    out.push('\n');
    let _ = writeln!(out, "#endif /* {guard} */");

    out
}

/// Quote `s` as a C string literal.
pub fn c_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for &b in s.as_bytes() {
        match b {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7e => out.push(b as char),
            // Three-digit octal so a following digit can't extend the escape.
            _ => {
                let _ = write!(out, "\\{b:03o}");
            }
        }
    }
    out.push('"');
    out
}
