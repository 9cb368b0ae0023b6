//! Main Crate Error

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    R2D2(#[from] diesel::r2d2::PoolError),

    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),

    #[error(transparent)]
    Migration(Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    HmacKey(#[from] hmac::digest::InvalidLength),

    /* Config Errors */
    #[error("Missing configuration value '{0}'")]
    MissingConfig(&'static str),
    #[error("Invalid configuration value '{key}': {reason}")]
    InvalidConfig { key: &'static str, reason: String },

    /* Api Errors */
    #[error("Invalid request")]
    InvalidRequest,
    #[error("{0}")]
    Validation(&'static str),
    #[error("Not found")]
    NotFound,
    #[error("{0}")]
    Conflict(&'static str),

    /* Auth Errors */
    #[error("Invalid email or password")]
    WrongCredentials,
    #[error("Invalid password")]
    WrongAdminPassword,
    #[error("Admin login not configured")]
    AdminNotConfigured,
    #[error("Unauthorized")]
    AdminUnauthorized,
    #[error("You must be logged in")]
    StaffSessionMissing,

    #[error("Context Missing")]
    CtxMissing,
}

impl Error {
    /// Maps a unique violation on `staff.email` to a conflict with `message`.
    pub fn on_duplicate_email(self, message: &'static str) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        match self {
            Error::Diesel(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Error::Conflict(message)
            }
            other => other,
        }
    }
}
