use crate::dispatcher::Dispatcher;
use anyhow::{Context, Result};
use base::chat::ChatGateway;
use base::stores::OrderStore;

/// Serves commands until connecting or receiving fails, and returns that error.
///
/// A reply that cannot be delivered is logged and skipped.
pub fn run_bot<G, S>(gateway: &mut G, dispatcher: &mut Dispatcher<S>) -> Result<()>
where
    G: ChatGateway,
    S: OrderStore,
{
    let identity = gateway
        .connect()
        .context("an error occurred on connecting to the chat gateway")?;
    log::info!("logged in as {} (ID: {})", identity.name, identity.id);

    dispatcher.set_bot_name(identity.name);

    loop {
        let messages = gateway
            .receive_messages()
            .context("an error occurred on receiving messages")?;

        for message in messages {
            let reply = match dispatcher.dispatch(&message) {
                Some(reply) => reply,
                None => continue,
            };

            if let Err(e) = gateway.send_message(&message.channel, &reply) {
                log::error!("a reply to {} was not sent: {:?}", message.channel, e);
            }
        }
    }
}
