// Public API for integration tests and potential library usage

pub mod config;
pub mod pages;
pub mod routes;
pub mod state;
pub mod types;
