pub mod commands;
pub mod config;
pub mod scrape;
pub mod sidecar;
