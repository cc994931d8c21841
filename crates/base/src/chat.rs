pub mod telegram;

use crate::entities::{BotIdentity, ChannelId, IncomingMessage};
use anyhow::Result;

pub use telegram::TelegramGateway;

/// Connection to a chat platform: the bot receives text messages through it and answers in the
/// channel a message came from.
pub trait ChatGateway {
    fn connect(&mut self) -> Result<BotIdentity>;

    /// Blocks until new messages arrive or the platform's poll interval elapses.
    fn receive_messages(&mut self) -> Result<Vec<IncomingMessage>>;

    fn send_message(&self, channel: &ChannelId, message: &str) -> Result<()>;
}
