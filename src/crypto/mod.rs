//! Password storage and keyed signatures for session cookies.

pub mod password;
pub mod signature;
