//! Object key generation
//!
//! Key format: `{uuid-v4}-{original-filename}`. The random prefix makes keys
//! collision-resistant across repeated uploads of the same file while the
//! suffix keeps them human-readable. Key generation is centralized here so
//! all backends stay consistent.

use uuid::Uuid;

/// Generate a fresh object key for an uploaded file. Each call produces a
/// distinct key, so re-uploading the same bytes never overwrites an object.
pub fn object_key(filename: &str) -> String {
    format!("{}-{}", Uuid::new_v4(), sanitize_filename(filename))
}

/// Strip path components and characters that would corrupt a key or URL.
/// The filename is advisory only; an empty result falls back to "upload".
fn sanitize_filename(filename: &str) -> String {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "upload".to_string()
    } else {
        cleaned
    }
}
