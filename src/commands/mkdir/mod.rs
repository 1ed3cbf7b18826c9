// src/commands/mkdir/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandError, CommandResult, FsResultExt};
use crate::fs::path::join;

pub struct MkdirCommand;

#[async_trait]
impl Command for MkdirCommand {
    fn name(&self) -> &'static str {
        "mkdir"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> Result<CommandResult, CommandError> {
        let name = ctx.arg(0, "Please specify a directory name")?;
        ctx.fs
            .make_directory(&join(&ctx.cwd, &name))
            .or_report(format!("Error: {} already exists", name))?;
        Ok(CommandResult::success(format!("Created directory: {}", name)).mutated())
    }
}
