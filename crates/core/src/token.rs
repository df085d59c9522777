//! Invite token generation
//!
//! Tokens authorize the registration flow tied to one invite, so they must
//! be unguessable. Entropy comes straight from the OS CSPRNG.

use rand::rngs::OsRng;
use rand::RngCore;

/// Bytes of entropy per token; hex-encodes to 40 characters.
const TOKEN_BYTES: usize = 20;

/// Generate an opaque invite token
pub fn generate() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_token_is_printable_hex() {
        let token = generate();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_no_collisions_across_many_tokens() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(generate()), "token collision");
        }
    }
}
