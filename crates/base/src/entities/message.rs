pub type ChannelId = String;
pub type AuthorId = String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: AuthorId,
    pub display_name: String,
    pub is_bot: bool,
}

/// A text message delivered by a chat gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub channel: ChannelId,
    pub author: Author,
    pub content: String,
}

/// The account the gateway is logged in as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    pub id: String,
    pub name: String,
}
