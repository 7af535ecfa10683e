pub mod client;
pub mod discovery;
pub mod notification;

pub use crate::domain::model::{DeliveryOutcome, Notification};
pub use crate::domain::ports::Transport;
pub use crate::utils::error::Result;
