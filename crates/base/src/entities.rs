pub mod message;
pub mod order;

pub use message::{Author, BotIdentity, ChannelId, IncomingMessage};
pub use order::{NewOrder, Order, OrderId, OrderQuantity, UserName};
