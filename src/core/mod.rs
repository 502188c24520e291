//! Core library components.
//!
//! Path resolution, environments, descriptions, secret generation and
//! permission handling. Nothing here prints; the CLI layer owns output.

pub mod config;
pub mod constants;
pub mod description;
pub mod environment;
pub mod generate;
pub mod paths;
pub mod perms;
pub mod types;
