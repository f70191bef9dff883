use sha1::{Digest, Sha1};

/// Hex SHA-1 of generated source, used to skip rewriting unchanged files.
pub fn source_fingerprint(source: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}
