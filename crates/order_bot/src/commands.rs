pub mod handlers;
pub mod parser;
pub mod registry;

pub use registry::{
    CommandArgs, CommandContext, CommandHandler, CommandRegistry, CommandSpec, ParamKind,
    ParamSpec,
};
