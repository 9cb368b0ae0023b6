//! Signed staff session cookies.
//!
//! A staff cookie is `<staff id>.<hex HMAC-SHA256(secret, prefix + staff id)>`.
//! Nothing is stored server side: a cookie is valid iff re-signing the
//! embedded id with the current secret yields exactly the presented value.
//!
//! The value must contain exactly one `.`; ids containing a dot never
//! verify.

use crate::crypto::signature::HexSigner;
use crate::prelude::*;

/// Prefix prepended to the staff id before signing.
pub const STAFF_SESSION_PREFIX: &str = "trackten-staff-";

const SEPARATOR: char = '.';

/// Issues and verifies staff session values with the server secret.
#[derive(Clone, Debug)]
pub struct StaffSessionSigner {
    signer: HexSigner,
}

impl StaffSessionSigner {
    /// Creates a signer keyed with `secret`.
    pub fn new(secret: &str) -> Result<Self> {
        Ok(Self {
            signer: HexSigner::new(secret.as_bytes())?,
        })
    }

    /// Returns the cookie value for `staff_id`.
    pub fn sign(&self, staff_id: &str) -> String {
        let signature = self
            .signer
            .sign(&format!("{STAFF_SESSION_PREFIX}{staff_id}"));
        format!("{staff_id}{SEPARATOR}{signature}")
    }

    /// Returns the staff id embedded in `value` when its signature checks out.
    pub fn verify(&self, value: &str) -> Option<String> {
        let (staff_id, signature) = value.split_once(SEPARATOR)?;
        if staff_id.is_empty() || signature.is_empty() || signature.contains(SEPARATOR) {
            return None;
        }
        (self.sign(staff_id) == value).then(|| staff_id.to_string())
    }
}
