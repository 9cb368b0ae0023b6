//! HMAC-SHA256 signatures rendered as lowercase hex.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::prelude::*;

type HmacSha256 = Hmac<Sha256>;

/// An HMAC-SHA256 instance keyed once and reused for every signature.
#[derive(Clone)]
pub struct HexSigner {
    mac: HmacSha256,
}

impl HexSigner {
    /// Keys a new signer with `key`.
    pub fn new(key: &[u8]) -> Result<Self> {
        Ok(Self {
            mac: HmacSha256::new_from_slice(key)?,
        })
    }

    /// Signs `payload` and returns the 64 character hex digest.
    pub fn sign(&self, payload: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for HexSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HexSigner").finish_non_exhaustive()
    }
}
