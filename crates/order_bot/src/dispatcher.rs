use crate::commands::parser::{split_command, tokenize};
use crate::commands::registry::{CommandContext, CommandRegistry, CommandSpec};
use crate::order_book::OrderBook;
use base::entities::IncomingMessage;
use base::stores::OrderStore;
use base::OrderBotError;

/// Turns incoming chat messages into command invocations and produces the reply for each.
pub struct Dispatcher<S: OrderStore> {
    prefix: String,
    bot_name: Option<String>,
    registry: CommandRegistry<S>,
    order_book: OrderBook<S>,
}

impl<S: OrderStore> Dispatcher<S> {
    pub fn new(prefix: String, registry: CommandRegistry<S>, order_book: OrderBook<S>) -> Self {
        Self {
            prefix,
            bot_name: None,
            registry,
            order_book,
        }
    }

    /// Commands written as `name@bot_name` are accepted once the bot's name is known.
    pub fn set_bot_name(&mut self, bot_name: String) {
        self.bot_name = Some(bot_name);
    }

    pub fn order_book(&self) -> &OrderBook<S> {
        &self.order_book
    }

    fn command_name<'a>(&self, name: &'a str) -> Option<&'a str> {
        match name.split_once('@') {
            None => Some(name),
            Some((name, addressee)) => match &self.bot_name {
                Some(bot_name) if bot_name.eq_ignore_ascii_case(addressee) => Some(name),
                _ => None,
            },
        }
    }

    /// Returns the reply to send back, or `None` when the message is not for the bot.
    pub fn dispatch(&self, message: &IncomingMessage) -> Option<String> {
        if message.author.is_bot {
            return None;
        }

        let raw_command = split_command(&message.content, &self.prefix)?;
        let name = self.command_name(raw_command.name)?;

        let command = match self.registry.get(name) {
            Some(command) => command,
            None => {
                log::warn!(
                    "{} invoked an unknown command {} in {}",
                    message.author.display_name,
                    name,
                    message.channel
                );
                return None;
            }
        };

        log::info!(
            "{} invoked {} in {}",
            message.author.display_name,
            command.name,
            message.channel
        );

        let ctx = CommandContext {
            author: &message.author,
            prefix: &self.prefix,
            order_book: &self.order_book,
            registry: &self.registry,
        };

        let result = tokenize(raw_command.args)
            .and_then(|raw_args| command.bind_args(&raw_args))
            .and_then(|args| (command.handler)(&ctx, &args));

        Some(match result {
            Ok(reply) => reply,
            Err(error) => self.error_reply(command, &error),
        })
    }

    fn error_reply(&self, command: &CommandSpec<S>, error: &OrderBotError) -> String {
        match error {
            OrderBotError::InvalidArgument(_) => {
                log::warn!("{} was called with invalid arguments: {}", command.name, error);
                format!(
                    "{}\n用法：{}",
                    error.user_message(),
                    command.usage(&self.prefix)
                )
            }
            _ => {
                log::error!("{} failed: {:?}", command.name, error);
                error.user_message()
            }
        }
    }
}
