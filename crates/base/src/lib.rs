pub mod chat;
pub mod entities;
pub mod errors;
pub mod requests;
pub mod settings;
pub mod stores;

pub use errors::{OrderBotError, OrderBotResult};
