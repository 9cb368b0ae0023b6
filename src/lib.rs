pub mod application;
pub mod attendance;
pub mod auth;
pub mod config;
pub mod crypto;
pub mod db;
pub mod department;
pub mod error;
pub mod prelude;
pub mod schema;
pub mod staff;
pub mod web;
