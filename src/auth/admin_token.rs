//! Stateless session for the single admin identity.
//!
//! The admin cookie carries `HMAC-SHA256(admin password, ADMIN_SESSION_PAYLOAD)`
//! in hex. Exactly one valid token exists per admin password; changing the
//! password invalidates every outstanding admin cookie at once. There is no
//! per-session identity, expiry or revocation beyond the cookie max age.

use crate::crypto::signature::HexSigner;
use crate::prelude::*;

/// Fixed payload signed with the admin password.
pub const ADMIN_SESSION_PAYLOAD: &str = "trackten-admin-session";

/// Derives the admin token for `password`.
pub fn admin_token(password: &str) -> Result<String> {
    Ok(HexSigner::new(password.as_bytes())?.sign(ADMIN_SESSION_PAYLOAD))
}

/// True iff `password` and `presented` are non-empty and `presented` is the
/// token derived from `password`.
pub fn is_admin_authenticated(presented: Option<&str>, password: &str) -> bool {
    if password.is_empty() {
        return false;
    }
    let Some(presented) = presented.filter(|token| !token.is_empty()) else {
        return false;
    };
    admin_token(password).is_ok_and(|expected| presented == expected)
}

/// Admin credentials bound to the configured password.
///
/// Holds only the password; every check goes through
/// [`is_admin_authenticated`]. When no admin password is configured the
/// guard reports itself as open and refuses every login.
#[derive(Clone)]
pub struct AdminGuard {
    password: Option<String>,
}

impl AdminGuard {
    /// Builds the guard for `password`; `None` or an empty string leave the
    /// admin section unprotected.
    pub fn new(password: Option<&str>) -> Result<Self> {
        let password = password.filter(|p| !p.is_empty()).map(String::from);
        if let Some(password) = &password {
            admin_token(password)?;
        }
        Ok(Self { password })
    }

    /// Whether an admin password is configured.
    pub fn is_configured(&self) -> bool {
        self.password.is_some()
    }

    /// The cookie value issued on a successful admin login.
    pub fn token(&self) -> Option<String> {
        self.password
            .as_deref()
            .and_then(|password| admin_token(password).ok())
    }

    /// Compares a submitted login password with the configured one.
    pub fn check_password(&self, submitted: &str) -> bool {
        match &self.password {
            Some(password) => !submitted.is_empty() && submitted == password,
            None => false,
        }
    }

    /// Checks a presented admin cookie value.
    pub fn verify(&self, presented: Option<&str>) -> bool {
        self.password
            .as_deref()
            .is_some_and(|password| is_admin_authenticated(presented, password))
    }
}

impl std::fmt::Debug for AdminGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGuard")
            .field("configured", &self.is_configured())
            .finish()
    }
}
