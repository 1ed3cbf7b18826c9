// src/commands/mv/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandError, CommandResult};
use crate::fs::path::join;
use crate::fs::FsError;

pub struct MvCommand;

const MISSING: &str = "Please specify source and destination";

/// Message for a failed move or copy of `source`.
pub(crate) fn transfer_failure(source: &str, err: &FsError) -> String {
    match err {
        FsError::InvalidTarget { .. } => format!("Error: cannot place {} inside itself", source),
        _ => format!("Error: {} does not exist", source),
    }
}

#[async_trait]
impl Command for MvCommand {
    fn name(&self) -> &'static str {
        "mv"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> Result<CommandResult, CommandError> {
        let source = ctx.arg(0, MISSING)?;
        let destination = ctx.arg(1, MISSING)?;
        let src_path = join(&ctx.cwd, &source);
        let dest_path = join(&ctx.cwd, &destination);

        ctx.fs
            .move_node(&src_path, &dest_path)
            .map_err(|err| CommandError::Fs { message: transfer_failure(&source, &err), source: err })?;
        Ok(CommandResult::success(format!("Moved {} to {}", source, destination)).mutated())
    }
}
