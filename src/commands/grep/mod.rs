// src/commands/grep/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandError, CommandResult, FsResultExt};
use crate::fs::path::join;

pub struct GrepCommand;

const MISSING: &str = "Please specify a pattern and a file";

/// Lines of `content` containing `pattern` as a literal substring.
fn matching_lines<'a>(content: &'a str, pattern: &str) -> Vec<&'a str> {
    content.split('\n').filter(|line| line.contains(pattern)).collect()
}

#[async_trait]
impl Command for GrepCommand {
    fn name(&self) -> &'static str {
        "grep"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> Result<CommandResult, CommandError> {
        let pattern = ctx.arg(0, MISSING)?;
        let name = ctx.arg(1, MISSING)?;
        let content = ctx.fs.read(&join(&ctx.cwd, &name)).or_report("File not found")?;
        if content.is_empty() {
            return Ok(CommandResult::success("File is empty"));
        }

        let matches = matching_lines(content, &pattern);
        if matches.is_empty() {
            Ok(CommandResult::success("No matches found"))
        } else {
            Ok(CommandResult::success(matches.join("\n")))
        }
    }
}
