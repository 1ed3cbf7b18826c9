// src/commands/mod.rs
pub mod calc;
pub mod cat;
pub mod cd;
pub mod clear_cmd;
pub mod cp;
pub mod echo;
pub mod edit;
pub mod grep;
pub mod help_cmd;
pub mod ls;
pub mod mkdir;
pub mod mv;
pub mod registry;
pub mod rm;
pub mod touch;
pub mod types;
pub mod weather_cmd;

pub use registry::CommandRegistry;
pub use types::{
    Command, CommandContext, CommandError, CommandResult, FsResultExt, HelpTopic, Output,
    SessionEffect,
};
