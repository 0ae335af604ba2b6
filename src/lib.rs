pub mod config;
pub mod scan;
pub mod server;
pub mod version;
