//! Application lifecycle
//!
//! - `lifetime`: startup and shutdown of the exporter
//! - `server`: the long-running exporter process

pub mod lifetime;
pub mod server;

pub use server::run_server;
