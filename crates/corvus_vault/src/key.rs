//! Claim-key minting and verification.

use corvus_core::claim_key::{CHARSET, GROUP_COUNT, GROUP_LEN};

use rand::Rng;
use subtle::ConstantTimeEq;

/// Mints a fresh claim key in the wire format, e.g. `A1B2C3-D4E5F6-G7H8I9-J0K1L2`.
///
/// 24 characters out of a 36-symbol alphabet, ~124 bits of entropy. The key is
/// surfaced to the administrator exactly once and never re-derivable; a lost
/// key means issuing a new one.
pub fn generate() -> String {
    let mut rng = rand::rng();
    let groups: Vec<String> = (0..GROUP_COUNT)
        .map(|_| {
            (0..GROUP_LEN)
                .map(|_| {
                    let idx = rng.random_range(0..CHARSET.len());
                    CHARSET[idx] as char
                })
                .collect()
        })
        .collect();

    groups.join("-")
}

/// Compares a presented key against the issued one in constant time.
///
/// The key is a security-relevant secret; a byte-wise early-exit comparison
/// would leak prefix length through timing.
pub fn matches(presented: &str, issued: &str) -> bool {
    presented.as_bytes().ct_eq(issued.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use corvus_core::claim_key;

    #[test]
    fn generated_keys_are_well_formed() {
        for _ in 0..64 {
            let key = generate();
            assert!(claim_key::is_well_formed(&key), "bad key: {key}");
        }
    }

    #[test]
    fn generated_keys_are_unique() {
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
    }

    #[test]
    fn matches_is_exact() {
        let key = generate();
        assert!(matches(&key, &key));

        let mut flipped = key.clone().into_bytes();
        flipped[0] = if flipped[0] == b'A' { b'B' } else { b'A' };
        let flipped = String::from_utf8(flipped).unwrap();
        assert!(!matches(&flipped, &key));
        assert!(!matches("", &key));
    }
}
