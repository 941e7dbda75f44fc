//! Byte array literal encoding.

use std::fmt::Write;

/// Byte literals per output line.
pub const BYTES_PER_LINE: usize = 12;

/// Render `data` as a `static const unsigned char` array declaration.
///
/// An empty input still produces one `0x00` element, since C forbids
/// zero-length arrays. The recorded file size stays 0 in that case.
pub fn emit_array(name: &str, data: &[u8]) -> String {
    let mut out = String::with_capacity(48 + data.len() * 6);
    let _ = writeln!(out, "static const unsigned char {name}[] = {{");

    for chunk in data.chunks(BYTES_PER_LINE) {
        out.push_str("    ");
        for (i, b) in chunk.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "0x{b:02x}");
        }
        out.push_str(",\n");
    }
    if data.is_empty() {
        out.push_str("    0x00,\n");
    }

    out.push_str("};");
    out
}

/// Parse the byte literals back out of an array produced by [`emit_array`].
pub fn decode_array(text: &str) -> Option<Vec<u8>> {
    let open = text.find('{')?;
    let close = text.rfind('}')?;
    text.get(open + 1..close)?
        .split(',')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            let hex = tok.strip_prefix("0x")?;
            u8::from_str_radix(hex, 16).ok()
        })
        .collect()
}
