pub mod config;
pub mod phone;
pub mod types;
