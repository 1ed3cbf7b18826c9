// src/commands/touch/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandError, CommandResult};
use crate::fs::path::join;

pub struct TouchCommand;

#[async_trait]
impl Command for TouchCommand {
    fn name(&self) -> &'static str {
        "touch"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> Result<CommandResult, CommandError> {
        let name = ctx.arg(0, "Please specify a file name")?;
        // No normalization: `docs/../x` becomes that literal key.
        ctx.fs.touch(&join(&ctx.cwd, &name));
        Ok(CommandResult::success(format!("Created file: {}", name)).mutated())
    }
}
