//! Content fingerprints for change and feedback detection

use std::fmt;

use sha2::{Digest, Sha256};

/// SHA-256 digest over `canonical type || 0x00 || payload`.
///
/// Only ever compared for equality. The separator keeps a type/payload
/// boundary shift from producing the same input bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint a payload under the label it will be written with
    pub fn compute(canonical_type: &str, payload: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(canonical_type.as_bytes());
        hasher.update([0u8]);
        hasher.update(payload);
        let digest = hasher.finalize();

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// First 12 hex digits, for log lines
    pub fn short(&self) -> String {
        hex::encode(&self.0[..6])
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = Fingerprint::compute("text/plain", b"hello");
        let b = Fingerprint::compute("text/plain", b"hello");
        assert_eq!(a, b);
    }

    #[test]
    fn type_is_part_of_the_digest() {
        assert_ne!(Fingerprint::compute("a", b"x"), Fingerprint::compute("b", b"x"));
    }

    #[test]
    fn payload_is_part_of_the_digest() {
        assert_ne!(Fingerprint::compute("a", b"x"), Fingerprint::compute("a", b"y"));
    }

    #[test]
    fn separator_prevents_boundary_collision() {
        assert_ne!(Fingerprint::compute("ab", b"c"), Fingerprint::compute("a", b"bc"));
    }

    #[test]
    fn matches_sha256_of_joined_input() {
        let expected = Sha256::digest(b"text/plain\0hello");
        let fp = Fingerprint::compute("text/plain", b"hello");
        assert_eq!(fp.to_string(), hex::encode(expected));
    }

    #[test]
    fn short_is_prefix_of_full() {
        let fp = Fingerprint::compute("image/png", &[0u8; 1024]);
        assert_eq!(fp.short().len(), 12);
        assert!(fp.to_string().starts_with(&fp.short()));
    }
}
