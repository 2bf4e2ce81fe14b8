//! Storage key to file name mapping.
//!
//! Sanitization is lossy: `a/b` and `a:b` both become `a_b`. Two keys that
//! collide after sanitization share one file.

/// Replacement for characters that are not allowed in a file name.
pub const PLACEHOLDER: char = '_';

/// Characters rejected in file names by at least one mainstream platform,
/// in addition to the ASCII control range below `' '`.
const RESERVED: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replace every file-name-invalid character in `key` with [`PLACEHOLDER`].
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c < ' ' || RESERVED.contains(&c) {
                PLACEHOLDER
            } else {
                c
            }
        })
        .collect()
}

/// File name (with `.json` extension) for a storage key.
pub fn file_name(key: &str) -> String {
    format!("{}.json", sanitize_key(key))
}
