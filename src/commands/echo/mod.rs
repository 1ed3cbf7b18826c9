// src/commands/echo/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandError, CommandResult};

pub struct EchoCommand;

#[async_trait]
impl Command for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> Result<CommandResult, CommandError> {
        Ok(CommandResult::success(ctx.args.join(" ")))
    }
}
