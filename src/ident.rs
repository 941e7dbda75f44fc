//! C identifier derivation for embedded file arrays.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

/// Namespace prefix carried by every generated array name.
pub const IDENT_PREFIX: &str = "rd_";

/// Name used when a path has no characters left to build from.
pub const EMPTY_IDENT: &str = "rd_empty";

/// Map a destination path to a C identifier.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`, then the namespace
/// prefix is prepended. Not injective: `/bin/a-b` and `/bin/a_b` both map
/// to `rd__bin_a_b`. Use [`IdentRegistry`] to get unique names.
pub fn sanitize(path: &str) -> String {
    let body: String = path
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    if body.is_empty() {
        return EMPTY_IDENT.to_string();
    }
    if body.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("{IDENT_PREFIX}{IDENT_PREFIX}{body}");
    }
    format!("{IDENT_PREFIX}{body}")
}

/// Hands out unique identifiers per destination path.
///
/// The first path to claim a sanitized name keeps it. A later, different path
/// that sanitizes to the same name gets `_<8 hex digits of sha256(path)>`
/// appended, and a numeric suffix on top if even that is taken.
#[derive(Debug, Default)]
pub struct IdentRegistry {
    by_path: HashMap<String, String>,
    owners: HashMap<String, String>,
}

/// An identifier assignment. `renamed_from` is set when the sanitized name was
/// already taken and a suffix had to be added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assigned {
    pub ident: String,
    pub renamed_from: Option<String>,
}

impl IdentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, path: &str) -> Assigned {
        if let Some(ident) = self.by_path.get(path) {
            return Assigned {
                ident: ident.clone(),
                renamed_from: None,
            };
        }

        let base = sanitize(path);
        let ident = if self.owners.contains_key(&base) {
            let hashed = format!("{}_{}", base, short_hash(path));
            let mut candidate = hashed.clone();
            let mut n = 1;
            while self.owners.contains_key(&candidate) {
                candidate = format!("{hashed}_{n}");
                n += 1;
            }
            candidate
        } else {
            base.clone()
        };

        self.owners.insert(ident.clone(), path.to_string());
        self.by_path.insert(path.to_string(), ident.clone());

        Assigned {
            renamed_from: (ident != base).then_some(base),
            ident,
        }
    }
}

fn short_hash(path: &str) -> String {
    let digest = Sha256::digest(path.as_bytes());
    digest[..4].iter().map(|b| format!("{b:02x}")).collect()
}
