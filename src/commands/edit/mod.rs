// src/commands/edit/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandError, CommandResult, FsResultExt, SessionEffect};
use crate::fs::path::join;

pub struct EditCommand;

#[async_trait]
impl Command for EditCommand {
    fn name(&self) -> &'static str {
        "edit"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> Result<CommandResult, CommandError> {
        let name = ctx.arg(0, "Please specify a file name")?;
        let path = join(&ctx.cwd, &name);
        ctx.fs.read(&path).or_report("File not found")?;
        Ok(CommandResult::success("Opening editor...").with_effect(SessionEffect::OpenEditor(path)))
    }
}
