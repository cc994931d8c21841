use crate::chat::ChatGateway;
use crate::entities::{Author, BotIdentity, ChannelId, IncomingMessage};
use crate::requests::api::SyncHttpRequest;
use crate::requests::entities::{HttpRequestData, HttpRequestMethod};
use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const API_URL: &str = "https://api.telegram.org";

pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Extra time given to the HTTP call on top of the long-poll timeout.
const POLL_REQUEST_GRACE: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct User {
    id: i64,
    is_bot: bool,
    first_name: String,
    username: Option<String>,
}

impl User {
    fn display_name(&self) -> String {
        self.username
            .clone()
            .unwrap_or_else(|| self.first_name.clone())
    }
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct Message {
    from: Option<User>,
    chat: Chat,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<Message>,
}

impl Message {
    fn into_incoming(self) -> Option<IncomingMessage> {
        let author = self.from?;

        Some(IncomingMessage {
            channel: self.chat.id.to_string(),
            author: Author {
                id: author.id.to_string(),
                display_name: author.display_name(),
                is_bot: author.is_bot,
            },
            content: self.text?,
        })
    }
}

/// Telegram Bot API gateway based on `getUpdates` long polling.
pub struct TelegramGateway<R: SyncHttpRequest> {
    token: String,
    poll_timeout: Duration,
    request_api: R,
    next_update_id: Option<i64>,
}

impl<R: SyncHttpRequest> TelegramGateway<R> {
    pub fn new(token: String, poll_timeout: Duration, request_api: R) -> TelegramGateway<R> {
        TelegramGateway {
            token,
            poll_timeout,
            request_api,
            next_update_id: None,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{api_url}/bot{token}/{method}",
            api_url = API_URL,
            token = &self.token,
            method = method
        )
    }

    fn request<T: DeserializeOwned>(&self, req: HttpRequestData, method: &str) -> Result<T> {
        let body = self
            .request_api
            .call(req)
            .context(format!("telegram {} request failed", method))?;

        let response: ApiResponse<T> = serde_json::from_str(&body)
            .context(format!("unexpected telegram {} response", method))?;

        if !response.ok {
            bail!(
                "telegram {} returned an error: {}",
                method,
                response.description.unwrap_or_default()
            );
        }

        response
            .result
            .context(format!("telegram {} response has no result", method))
    }
}

impl<R: SyncHttpRequest> ChatGateway for TelegramGateway<R> {
    fn connect(&mut self) -> Result<BotIdentity> {
        let req = HttpRequestData::new(HttpRequestMethod::Get, &self.method_url("getMe"));
        let me: User = self.request(req, "getMe")?;

        Ok(BotIdentity {
            id: me.id.to_string(),
            name: me.display_name(),
        })
    }

    fn receive_messages(&mut self) -> Result<Vec<IncomingMessage>> {
        let mut req = HttpRequestData::new(HttpRequestMethod::Get, &self.method_url("getUpdates"))
            .with_query("timeout", self.poll_timeout.as_secs())
            .with_timeout(self.poll_timeout + POLL_REQUEST_GRACE);

        if let Some(offset) = self.next_update_id {
            req = req.with_query("offset", offset);
        }

        let updates: Vec<Update> = self.request(req, "getUpdates")?;
        log::debug!("received {} telegram updates", updates.len());

        let mut messages = Vec::new();
        for update in updates {
            self.next_update_id = Some(update.update_id + 1);

            if let Some(message) = update.message.and_then(Message::into_incoming) {
                messages.push(message);
            }
        }

        Ok(messages)
    }

    fn send_message(&self, channel: &ChannelId, message: &str) -> Result<()> {
        for chunk in split_message(message, MAX_MESSAGE_LENGTH) {
            let req = HttpRequestData::new(HttpRequestMethod::Post, &self.method_url("sendMessage"))
                .with_json_body(json!({
                    "chat_id": channel,
                    "text": chunk,
                }));

            let _: serde_json::Value = self.request(req, "sendMessage")?;
        }

        Ok(())
    }
}

/// Splits a message into chunks of at most `max_chars` characters, preferring line boundaries.
pub fn split_message(message: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in message.split('\n') {
        let line_len = line.chars().count();
        let separator_len = usize::from(current_len > 0);

        if current_len + separator_len + line_len <= max_chars {
            if current_len > 0 {
                current.push('\n');
            }
            current.push_str(line);
            current_len += separator_len + line_len;
            continue;
        }

        if current_len > 0 {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        let chars: Vec<char> = line.chars().collect();
        let mut pieces = chars.chunks(max_chars).peekable();
        while let Some(piece) = pieces.next() {
            if pieces.peek().is_some() {
                chunks.push(piece.iter().collect());
            } else {
                current = piece.iter().collect();
                current_len = piece.len();
            }
        }
    }

    if current_len > 0 || chunks.is_empty() {
        chunks.push(current);
    }

    chunks
}
