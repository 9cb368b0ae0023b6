//! Staff email and password authentication.

use serde::{Deserialize, Serialize};

use crate::crypto::password::verify_password;
use crate::db::connection::DbConnection;
use crate::prelude::*;
use crate::staff::StaffDb;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StaffLoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub password: Option<String>,
}

impl StaffLoginRequest {
    /// Trimmed email and raw password, both required.
    pub fn credentials(&self) -> Result<(&str, &str)> {
        let email = self.email.as_deref().map(str::trim).unwrap_or_default();
        let password = self.password.as_deref().unwrap_or_default();
        if email.is_empty() || password.is_empty() {
            return Err(Error::Validation("Email and password are required"));
        }
        Ok((email, password))
    }
}

/// Checks `password` against the looked up account.
///
/// An unknown email and a wrong password fail the same way.
pub fn verify_credentials(password: &str, staff: Option<StaffDb>) -> Result<StaffDb> {
    match staff {
        Some(staff) if verify_password(password, &staff.password_hash) => Ok(staff),
        _ => Err(Error::WrongCredentials),
    }
}

pub fn authenticate(auth: &StaffLoginRequest, connection: &DbConnection) -> Result<StaffDb> {
    let (email, password) = auth.credentials()?;
    let staff = StaffDb::find_by_email(email, connection)?;
    verify_credentials(password, staff).inspect_err(|err| {
        if matches!(err, Error::WrongCredentials) {
            tracing::info!("Failed staff login for {email}");
        }
    })
}
