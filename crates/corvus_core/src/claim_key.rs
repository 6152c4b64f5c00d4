//! Wire format of the single-use claim key.
//!
//! Four hyphen-joined groups of six uppercase alphanumeric characters,
//! e.g. `A1B2C3-D4E5F6-G7H8I9-J0K1L2`. 24 meaningful characters drawn from a
//! 36-symbol alphabet keep the key above 120 bits of entropy while staying
//! practical to read aloud or retype. The format is an external compatibility
//! contract and must not change.

/// Number of hyphen-separated groups.
pub const GROUP_COUNT: usize = 4;

/// Characters per group.
pub const GROUP_LEN: usize = 6;

/// Symbols a key is drawn from.
pub const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Total rendered length including separators (27).
pub const KEY_LEN: usize = GROUP_COUNT * GROUP_LEN + (GROUP_COUNT - 1);

/// Strict format check: 4 groups of 6 uppercase alphanumerics joined by `-`.
///
/// Presented keys that fail this never reach the ledger comparison.
pub fn is_well_formed(key: &str) -> bool {
    if key.len() != KEY_LEN {
        return false;
    }

    let groups: Vec<&str> = key.split('-').collect();
    if groups.len() != GROUP_COUNT {
        return false;
    }

    groups.iter().all(|group| {
        group.len() == GROUP_LEN
            && group
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_canonical_keys() {
        assert!(is_well_formed("A1B2C3-D4E5F6-G7H8I9-J0K1L2"));
        assert!(is_well_formed("AAAAAA-BBBBBB-CCCCCC-DDDDDD"));
        assert!(is_well_formed("000000-000000-000000-000000"));
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("A1B2C3-D4E5F6-G7H8I9"));
        assert!(!is_well_formed("a1b2c3-d4e5f6-g7h8i9-j0k1l2"));
        assert!(!is_well_formed("A1B2C3-D4E5F6-G7H8I9-J0K1L"));
        assert!(!is_well_formed("A1B2C3-D4E5F6-G7H8I9-J0K1L2-M3N4O5"));
        assert!(!is_well_formed("A1B2C3_D4E5F6_G7H8I9_J0K1L2"));
        assert!(!is_well_formed("A1B2C!-D4E5F6-G7H8I9-J0K1L2"));
    }
}
