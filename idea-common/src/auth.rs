//! Admin password hashing
//!
//! Stored format: `sha256$<salt hex>$<digest hex>` where the digest is
//! SHA-256 over the salt bytes followed by the UTF-8 password.

use rand::RngCore;
use sha2::{Digest, Sha256};

const SCHEME: &str = "sha256";
const SALT_LEN: usize = 16;

/// Hash a password with a fresh random salt
///
/// # Examples
///
/// ```
/// use idea_common::auth::{hash_password, verify_password};
///
/// let stored = hash_password("hunter2");
/// assert!(stored.starts_with("sha256$"));
/// assert!(verify_password("hunter2", &stored));
/// assert!(!verify_password("hunter3", &stored));
/// ```
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    format!("{}${}${}", SCHEME, to_hex(&salt), digest(&salt, password))
}

/// Check a password against a stored hash
///
/// Malformed stored values never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (Some(scheme), Some(salt_hex), Some(expected)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if scheme != SCHEME {
        return false;
    }
    let Some(salt) = from_hex(salt_hex) else {
        return false;
    };

    let calculated = digest(&salt, password);
    // Compare every byte so the timing does not depend on the mismatch position
    calculated.len() == expected.len()
        && calculated
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

fn digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn from_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted() {
        let a = hash_password("same");
        let b = hash_password("same");
        assert_ne!(a, b, "Two hashes of one password should differ by salt");
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn test_digest_is_64_hex_chars() {
        let stored = hash_password("pw");
        let digest = stored.rsplit('$').next().unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_malformed_stored_values_never_verify() {
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "plaintext"));
        assert!(!verify_password("pw", "md5$00$abc"));
        assert!(!verify_password("pw", "sha256$zz$abc"));
        assert!(!verify_password("pw", "sha256$abc$abc"));
    }

    #[test]
    fn test_hex_round_trip() {
        let bytes = [0u8, 1, 127, 255];
        assert_eq!(from_hex(&to_hex(&bytes)), Some(bytes.to_vec()));
    }
}
