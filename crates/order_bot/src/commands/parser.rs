use base::{OrderBotError, OrderBotResult};

/// A prefixed message split into its command name and the unparsed argument text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCommand<'a> {
    pub name: &'a str,
    pub args: &'a str,
}

/// Returns `None` if the message is not addressed to the bot.
///
/// The command name has to follow the prefix directly, `! add_order` is not a command.
pub fn split_command<'a>(content: &'a str, prefix: &str) -> Option<RawCommand<'a>> {
    let rest = content.strip_prefix(prefix)?;

    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        return None;
    }

    let (name, args) = match rest.find(char::is_whitespace) {
        Some(index) => rest.split_at(index),
        None => (rest, ""),
    };

    Some(RawCommand { name, args })
}

/// Splits the argument text on whitespace. A token starting with `"` runs until the closing
/// quote and may contain whitespace; inside quotes `\` escapes the next character.
pub fn tokenize(args: &str) -> OrderBotResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut chars = args.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let first = match chars.next() {
            None => break,
            Some(c) => c,
        };

        if first != '"' {
            let mut token = String::from(first);
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                token.push(c);
            }
            tokens.push(token);
            continue;
        }

        let mut token = String::new();
        let mut closed = false;

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => token.push(escaped),
                    None => break,
                },
                '"' => {
                    closed = true;
                    break;
                }
                c => token.push(c),
            }
        }

        if !closed {
            return Err(OrderBotError::invalid_argument("引號沒有結束"));
        }

        if chars.peek().map_or(false, |c| !c.is_whitespace()) {
            return Err(OrderBotError::invalid_argument("結束引號後需要空格"));
        }

        tokens.push(token);
    }

    Ok(tokens)
}
