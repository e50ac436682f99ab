pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::HttpFortuneApi;
pub use crate::app::TerminalHost;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{view::render, Effect, Event, FortuneState, Runtime};
pub use crate::utils::error::{FetchError, FetchErrorKind, FortuneError, Result};
