// src/commands/rm/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandError, CommandResult, FsResultExt};
use crate::fs::path::join;

pub struct RmCommand;

#[async_trait]
impl Command for RmCommand {
    fn name(&self) -> &'static str {
        "rm"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> Result<CommandResult, CommandError> {
        let name = ctx.arg(0, "Please specify a file or directory name")?;
        ctx.fs
            .remove(&join(&ctx.cwd, &name))
            .or_report(format!("Error: {} does not exist", name))?;
        Ok(CommandResult::success(format!("Removed {}", name)).mutated())
    }
}
