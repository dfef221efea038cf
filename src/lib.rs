pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{JsonFileSink, LocalStorage};
pub use core::engine::ScoringEngine;
pub use utils::error::{Result, ScoringError};
