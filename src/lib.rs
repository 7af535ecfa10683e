pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::ClientConfig;
pub use crate::core::client::WebmentionClient;
pub use crate::core::discovery::discover_in_markup;
pub use domain::model::{DeliveryOutcome, Notification};
pub use utils::error::{Result, WebmentionError};
