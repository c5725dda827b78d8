//! Deterministic identifiers for postings and cache keys.
//!
//! Everything here is BLAKE3-based so that re-normalizing the same raw
//! candidate, or repeating the same search, always lands on the same id.

use blake3::Hasher;

/// Computes the stable posting id from the fields that identify a listing.
///
/// The id is a hex-encoded BLAKE3 hash of `platform|title|company|location`.
/// Fields are separated by an explicit delimiter so `("ab", "c")` and
/// `("a", "bc")` cannot collide. Inputs are expected to be pre-trimmed by the
/// normalizer; this function does not clean them.
pub fn posting_id(platform: &str, title: &str, company: &str, location: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(platform.as_bytes());
    hasher.update(b"|");
    hasher.update(title.as_bytes());
    hasher.update(b"|");
    hasher.update(company.as_bytes());
    hasher.update(b"|");
    hasher.update(location.as_bytes());
    hasher.finalize().to_hex().to_string()
}

/// Computes the aggregation-cache key for a search.
///
/// Keyed on `(title, location, skills)` — the inputs that change which
/// postings a search returns. Pagination is deliberately excluded: all pages
/// of one search share a single cached snapshot. Skills are joined with a
/// delimiter (not sorted) so the key tracks the profile exactly as entered.
pub fn search_key(title: &str, location: &str, skills: &[String]) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(title.as_bytes());
    hasher.update(b"|");
    hasher.update(location.as_bytes());
    for skill in skills {
        hasher.update(b"|");
        hasher.update(skill.as_bytes());
    }
    *hasher.finalize().as_bytes()
}

/// 64-bit truncation of a BLAKE3 hash, for compact log fields.
///
/// Collisions at this width are tolerated: the value is only used as an
/// observability correlation id, never for lookups.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_posting_id_determinism() {
        let a = posting_id("seek", "Software Engineer", "Acme", "Melbourne VIC");
        let b = posting_id("seek", "Software Engineer", "Acme", "Melbourne VIC");
        assert_eq!(a, b);
    }

    #[test]
    fn test_posting_id_field_sensitivity() {
        let base = posting_id("seek", "Software Engineer", "Acme", "Melbourne");

        assert_ne!(
            base,
            posting_id("indeed", "Software Engineer", "Acme", "Melbourne")
        );
        assert_ne!(base, posting_id("seek", "Data Engineer", "Acme", "Melbourne"));
        assert_ne!(
            base,
            posting_id("seek", "Software Engineer", "Globex", "Melbourne")
        );
        assert_ne!(base, posting_id("seek", "Software Engineer", "Acme", "Sydney"));
    }

    #[test]
    fn test_posting_id_separator_prevents_ambiguity() {
        let a = posting_id("seek", "ab", "c", "d");
        let b = posting_id("seek", "a", "bc", "d");
        assert_ne!(a, b);
    }

    #[test]
    fn test_search_key_determinism() {
        let skills = vec!["Rust".to_string(), "SQL".to_string()];
        assert_eq!(
            search_key("Software Engineer", "Melbourne", &skills),
            search_key("Software Engineer", "Melbourne", &skills)
        );
    }

    #[test]
    fn test_search_key_skill_order_matters() {
        let a = search_key(
            "Engineer",
            "Melbourne",
            &["Rust".to_string(), "SQL".to_string()],
        );
        let b = search_key(
            "Engineer",
            "Melbourne",
            &["SQL".to_string(), "Rust".to_string()],
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_search_key_uniqueness() {
        let keys = [
            search_key("Engineer", "Melbourne", &[]),
            search_key("Engineer", "Sydney", &[]),
            search_key("Accountant", "Melbourne", &[]),
            search_key("Engineer", "Melbourne", &["Rust".to_string()]),
        ];
        let unique: HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn test_hash_to_u64_determinism() {
        assert_eq!(hash_to_u64(b"query-1"), hash_to_u64(b"query-1"));
        assert_ne!(hash_to_u64(b"query-1"), hash_to_u64(b"query-2"));
    }
}
