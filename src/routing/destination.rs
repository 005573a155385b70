//! Destination template substitution.
//!
//! Placeholders are `:` followed by one or more lowercase letters, the same
//! name charset the matcher binds. Unbound placeholders pass through as-is,
//! and substituted values are never re-scanned.

use crate::routing::matcher::Params;

/// Fill `:name` placeholders in `template` from `params`.
pub fn substitute(template: &str, params: &Params) -> String {
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b':' {
            i += 1;
            continue;
        }
        let start = i + 1;
        let end = start
            + bytes[start..]
                .iter()
                .take_while(|b| b.is_ascii_lowercase())
                .count();
        if end == start {
            i += 1;
            continue;
        }

        // ASCII boundaries, so slicing is char-safe.
        if let Some(value) = params.get(&template[start..end]) {
            out.push_str(&template[copied..i]);
            out.push_str(value);
            copied = end;
        }
        i = end;
    }

    out.push_str(&template[copied..]);
    out
}
