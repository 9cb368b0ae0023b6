//! Salted password hashing and verification using PBKDF2-HMAC-SHA256.
//!
//! Stored records have the form `salt:hash`, both hex encoded. The salt is
//! 16 random bytes and the derived key is 64 bytes, computed with a fixed
//! iteration count. The hex text of the salt is what gets fed to the
//! derivation, so records written by earlier deployments keep verifying.
//!
//! # Examples
//!
//! ```rust
//! use trackten::crypto::password::{hash_password, verify_password};
//!
//! let record = hash_password("abcd");
//! assert!(verify_password("abcd", &record));
//! assert!(!verify_password("abcde", &record));
//! ```

use pbkdf2::pbkdf2_hmac;
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;

/// Length of the random salt in bytes.
pub const SALT_LEN: usize = 16;
/// Number of PBKDF2 rounds.
pub const ITERATIONS: u32 = 100_000;
/// Length of the derived key in bytes.
pub const KEY_LEN: usize = 64;

const SEPARATOR: char = ':';

fn derive(plain: &str, salt: &str) -> String {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(plain.as_bytes(), salt.as_bytes(), ITERATIONS, &mut key);
    hex::encode(key)
}

/// Hashes `plain` with a fresh random salt and returns the `salt:hash` record.
pub fn hash_password(plain: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let salt = hex::encode(salt);
    let hash = derive(plain, &salt);
    format!("{salt}{SEPARATOR}{hash}")
}

/// Checks `plain` against a stored `salt:hash` record.
///
/// Malformed records (no separator, empty salt or empty hash) never match.
pub fn verify_password(plain: &str, record: &str) -> bool {
    let Some((salt, hash)) = record.split_once(SEPARATOR) else {
        return false;
    };
    if salt.is_empty() || hash.is_empty() {
        return false;
    }
    derive(plain, salt) == hash
}
