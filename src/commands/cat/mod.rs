// src/commands/cat/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandError, CommandResult, FsResultExt, Output};
use crate::fs::path::join;

pub struct CatCommand;

#[async_trait]
impl Command for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> Result<CommandResult, CommandError> {
        let name = ctx.arg(0, "Please specify a file")?;
        let content = ctx.fs.read(&join(&ctx.cwd, &name)).or_report("File not found")?;
        Ok(CommandResult::output(Output::Preformatted(content.to_string())))
    }
}
