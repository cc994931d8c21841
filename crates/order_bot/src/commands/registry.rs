use crate::order_book::OrderBook;
use base::entities::Author;
use base::stores::OrderStore;
use base::{OrderBotError, OrderBotResult};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
}

impl ParamSpec {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Text,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Integer,
        }
    }
}

impl Display for ParamSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Text(String),
    Integer(i64),
}

/// Arguments of one invocation, already checked against the command's parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    values: Vec<(&'static str, ArgValue)>,
}

impl CommandArgs {
    fn get(&self, name: &str) -> OrderBotResult<&ArgValue> {
        self.values
            .iter()
            .find(|(param, _)| *param == name)
            .map(|(_, value)| value)
            .ok_or_else(|| OrderBotError::invalid_argument(format!("缺少參數 <{}>", name)))
    }

    pub fn text(&self, name: &str) -> OrderBotResult<&str> {
        match self.get(name)? {
            ArgValue::Text(value) => Ok(value),
            ArgValue::Integer(_) => Err(OrderBotError::invalid_argument(format!(
                "<{}> 必須是文字",
                name
            ))),
        }
    }

    pub fn integer(&self, name: &str) -> OrderBotResult<i64> {
        match self.get(name)? {
            ArgValue::Integer(value) => Ok(*value),
            ArgValue::Text(_) => Err(OrderBotError::invalid_argument(format!(
                "<{}> 必須是整數",
                name
            ))),
        }
    }
}

/// Everything a handler may touch while serving one command.
pub struct CommandContext<'a, S: OrderStore> {
    pub author: &'a Author,
    pub prefix: &'a str,
    pub order_book: &'a OrderBook<S>,
    pub registry: &'a CommandRegistry<S>,
}

pub type CommandHandler<S> = fn(&CommandContext<'_, S>, &CommandArgs) -> OrderBotResult<String>;

pub struct CommandSpec<S: OrderStore> {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
    pub handler: CommandHandler<S>,
}

impl<S: OrderStore> CommandSpec<S> {
    pub fn usage(&self, prefix: &str) -> String {
        let mut usage = format!("{}{}", prefix, self.name);
        for param in &self.params {
            usage.push_str(&format!(" {}", param));
        }
        usage
    }

    /// Checks the argument count and converts every raw argument to its parameter's kind.
    pub fn bind_args(&self, raw_args: &[String]) -> OrderBotResult<CommandArgs> {
        if raw_args.len() < self.params.len() {
            return Err(OrderBotError::invalid_argument(format!(
                "缺少參數 {}",
                self.params[raw_args.len()]
            )));
        }

        if raw_args.len() > self.params.len() {
            return Err(OrderBotError::invalid_argument(format!(
                "參數過多：需要 {} 個，收到 {} 個",
                self.params.len(),
                raw_args.len()
            )));
        }

        let mut values = Vec::with_capacity(self.params.len());
        for (param, raw) in self.params.iter().zip(raw_args) {
            let value = match param.kind {
                ParamKind::Text => {
                    if raw.chars().any(char::is_control) {
                        return Err(OrderBotError::invalid_argument(format!(
                            "{} 不可包含換行或控制字元",
                            param
                        )));
                    }
                    ArgValue::Text(raw.clone())
                }
                ParamKind::Integer => {
                    let value = raw.trim().parse::<i64>().map_err(|_| {
                        OrderBotError::invalid_argument(format!(
                            "{} 必須是整數，收到 \"{}\"",
                            param, raw
                        ))
                    })?;
                    ArgValue::Integer(value)
                }
            };

            values.push((param.name, value));
        }

        Ok(CommandArgs { values })
    }
}

/// Command specs in registration order, looked up by name.
pub struct CommandRegistry<S: OrderStore> {
    commands: Vec<CommandSpec<S>>,
}

impl<S: OrderStore> CommandRegistry<S> {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn register(&mut self, command: CommandSpec<S>) -> OrderBotResult<()> {
        if self.get(command.name).is_some() {
            return Err(OrderBotError::Configuration(format!(
                "command {} is registered twice",
                command.name
            )));
        }

        self.commands.push(command);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec<S>> {
        self.commands.iter().find(|command| command.name == name)
    }

    pub fn commands(&self) -> &[CommandSpec<S>] {
        &self.commands
    }
}

impl<S: OrderStore> Default for CommandRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
