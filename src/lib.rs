pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{HttpSource, LocalFileSource};
pub use config::toml_config::{DashConfig, GdpSettings, NicknameSettings, PageConfig};
pub use crate::core::gdp::GdpTable;
pub use crate::core::nickname::{generate_nicknames, parse_likes, NicknameGenerator};
pub use crate::core::{GdpView, NicknameList, NicknameRequest, YearRange};
pub use utils::error::{DashError, Result};
