pub mod admin_token;
pub mod auth;
pub mod staff_session;

pub const ADMIN_COOKIE: &str = "trackten_admin";
pub const STAFF_COOKIE: &str = "trackten_staff";
