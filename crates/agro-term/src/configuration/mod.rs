//! Configuration of the client.
//!
//! Values come from built-in defaults, then the TOML config file, then the
//! command line, each layer overriding the previous one.

mod config;

pub use config::*;
