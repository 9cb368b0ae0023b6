#![allow(dead_code)]

pub mod api_client;
pub mod db_test_context;
pub mod test_context;

pub fn from_env(var: &str) -> String {
    std::env::var(var).expect(&format!("Env Variable '{}' missing", var))
}
