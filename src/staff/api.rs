use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{StaffCreate, StaffDb};
use crate::crypto::password::hash_password;
use crate::db::connection::DbConnection;
use crate::department::Department;
use crate::prelude::*;

pub const MIN_PASSWORD_LEN: usize = 4;
pub const SAMPLE_STAFF_PASSWORD: &str = "password123";

const SAMPLE_STAFF: [(&str, &str, Department); 3] = [
    ("John Doe", "john@trackten.com", Department::Cso),
    ("Jane Smith", "jane@trackten.com", Department::Csi),
    ("Bob Wilson", "bob@trackten.com", Department::Pmo),
];

/// Staff record as returned by the API; the password hash stays server side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffApi {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
}

/// The signed-in staff member's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: String,
}

/// Body for self-registration and for admin-created accounts.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StaffPost {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PasswordReset {
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub staff: StaffApi,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeedResponse {
    pub message: String,
}

impl From<StaffDb> for StaffApi {
    fn from(value: StaffDb) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            department: value.department,
            created_at: value.created_at,
        }
    }
}

impl From<StaffDb> for StaffProfile {
    fn from(value: StaffDb) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            department: value.department,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Returns the password when it meets the minimum length.
pub fn validate_password(password: Option<String>) -> Result<String> {
    password
        .filter(|p| p.chars().count() >= MIN_PASSWORD_LEN)
        .ok_or(Error::Validation("Password is required (min 4 characters)"))
}

impl TryFrom<StaffPost> for StaffCreate {
    type Error = Error;

    fn try_from(value: StaffPost) -> Result<Self> {
        let (Some(name), Some(email)) = (non_empty(value.name), non_empty(value.email)) else {
            return Err(Error::Validation("Name and email are required"));
        };
        let password = validate_password(value.password)?;
        let department = Department::parse_or_default(value.department.as_deref());

        Ok(Self {
            name,
            email,
            department: department.to_string(),
            password_hash: hash_password(&password),
        })
    }
}

impl StaffPost {
    fn persist(self, connection: &DbConnection, conflict: &'static str) -> Result<StaffApi> {
        let model: StaffCreate = self.try_into()?;
        let created = model
            .save(connection)
            .map_err(|err| err.on_duplicate_email(conflict))?;
        Ok(created.into())
    }

    /// Public self-registration.
    pub fn register(self, connection: &DbConnection) -> Result<RegisterResponse> {
        let staff = self.persist(connection, "An account with this email already exists")?;
        Ok(RegisterResponse {
            success: true,
            staff,
            message: String::from("Account created. You can now sign in."),
        })
    }

    /// Account created from the admin staff page.
    pub fn create(self, connection: &DbConnection) -> Result<StaffApi> {
        self.persist(connection, "A staff member with this email already exists")
    }
}

impl PasswordReset {
    pub fn apply(self, staff_id: &Uuid, connection: &DbConnection) -> Result<()> {
        let password = validate_password(self.password)?;
        StaffDb::update_password_hash(staff_id, &hash_password(&password), connection)?;
        Ok(())
    }
}

pub fn list_staff(connection: &DbConnection) -> Result<Vec<StaffApi>> {
    Ok(StaffDb::fetch_all(connection)?
        .into_iter()
        .map(StaffApi::from)
        .collect())
}

/// Seeds three sample accounts into an empty staff table.
pub fn seed_sample_staff(connection: &DbConnection) -> Result<SeedResponse> {
    if StaffDb::count(connection)? > 0 {
        return Ok(SeedResponse {
            message: String::from("Database already has staff. Skip seed."),
        });
    }

    let password_hash = hash_password(SAMPLE_STAFF_PASSWORD);
    let items: Vec<StaffCreate> = SAMPLE_STAFF
        .into_iter()
        .map(|(name, email, department)| StaffCreate {
            name: String::from(name),
            email: String::from(email),
            department: department.to_string(),
            password_hash: password_hash.clone(),
        })
        .collect();
    let created = StaffCreate::save_all(&items, connection)?;

    Ok(SeedResponse {
        message: format!(
            "Seeded {created} sample staff. They can log in with their email and password \"{SAMPLE_STAFF_PASSWORD}\"."
        ),
    })
}
