// src/commands/types.rs
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::fs::{DirEntry, FsError, VirtualFs};

/// One line of the help screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HelpTopic {
    pub usage: &'static str,
    pub description: &'static str,
}

/// Renderable command output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Output {
    /// Plain message text.
    Text(String),
    /// File content, shown with whitespace preserved.
    Preformatted(String),
    /// Directory listing.
    Listing(Vec<DirEntry>),
    /// Usage screen.
    Help {
        commands: &'static [HelpTopic],
        examples: &'static [HelpTopic],
    },
}

impl Output {
    pub fn text(text: impl Into<String>) -> Self {
        Output::Text(text.into())
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Text(text) | Output::Preformatted(text) => f.write_str(text),
            Output::Listing(entries) => {
                let names: Vec<String> = entries
                    .iter()
                    .map(|e| if e.is_directory { format!("{}/", e.name) } else { e.name.clone() })
                    .collect();
                f.write_str(&names.join("  "))
            }
            Output::Help { commands, examples } => {
                writeln!(f, "Available commands:")?;
                for topic in commands.iter() {
                    writeln!(f, "  {}: {}", topic.usage, topic.description)?;
                }
                writeln!(f)?;
                write!(f, "Examples:")?;
                for topic in examples.iter() {
                    write!(f, "\n  {}: {}", topic.usage, topic.description)?;
                }
                Ok(())
            }
        }
    }
}

/// Session state change requested by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    ChangeDirectory(String),
    ClearHistory,
    OpenEditor(String),
}

/// 命令执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// `None` suppresses the history entry.
    pub output: Option<Output>,
    pub effect: Option<SessionEffect>,
    /// Set when the file system changed and must be written back.
    pub mutated: bool,
}

impl CommandResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self::output(Output::text(text))
    }

    pub fn output(output: Output) -> Self {
        Self { output: Some(output), effect: None, mutated: false }
    }

    pub fn silent() -> Self {
        Self { output: None, effect: None, mutated: false }
    }

    pub fn with_effect(mut self, effect: SessionEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn mutated(mut self) -> Self {
        self.mutated = true;
        self
    }
}

/// Command failures. Each renders as the plain text shown in history.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    MissingArgument(&'static str),

    #[error("Invalid expression")]
    Evaluation(#[from] crate::commands::calc::EvalError),

    #[error("{message}")]
    Fs {
        message: String,
        #[source]
        source: FsError,
    },

    #[error("Error executing command: {0}")]
    Internal(String),
}

/// Attach the user-facing message to a file system failure.
pub trait FsResultExt<T> {
    fn or_report(self, message: impl Into<String>) -> Result<T, CommandError>;
}

impl<T> FsResultExt<T> for Result<T, FsError> {
    fn or_report(self, message: impl Into<String>) -> Result<T, CommandError> {
        self.map_err(|source| CommandError::Fs { message: message.into(), source })
    }
}

/// 命令执行上下文
pub struct CommandContext<'a> {
    pub args: Vec<String>,
    pub cwd: String,
    pub fs: &'a mut VirtualFs,
    pub weather_delay: Duration,
}

impl CommandContext<'_> {
    /// Positional argument `index`, or the given missing-argument message.
    pub fn arg(&self, index: usize, missing: &'static str) -> Result<String, CommandError> {
        self.args
            .get(index)
            .cloned()
            .ok_or(CommandError::MissingArgument(missing))
    }
}

/// 命令 trait
#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;
    async fn execute(&self, ctx: CommandContext<'_>) -> Result<CommandResult, CommandError>;
}
