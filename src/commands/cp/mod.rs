// src/commands/cp/mod.rs
use async_trait::async_trait;
use crate::commands::mv::transfer_failure;
use crate::commands::{Command, CommandContext, CommandError, CommandResult};
use crate::fs::path::join;

pub struct CpCommand;

const MISSING: &str = "Please specify source and destination";

#[async_trait]
impl Command for CpCommand {
    fn name(&self) -> &'static str {
        "cp"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> Result<CommandResult, CommandError> {
        let source = ctx.arg(0, MISSING)?;
        let destination = ctx.arg(1, MISSING)?;
        let src_path = join(&ctx.cwd, &source);
        let dest_path = join(&ctx.cwd, &destination);

        ctx.fs
            .copy(&src_path, &dest_path)
            .map_err(|err| CommandError::Fs { message: transfer_failure(&source, &err), source: err })?;
        Ok(CommandResult::success(format!("Copied {} to {}", source, destination)).mutated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{run, text};

    #[tokio::test]
    async fn test_cp_directory() {
        let (result, fs) = run(&CpCommand, &["documents", "backup"]).await;
        assert_eq!(text(result), "Copied documents to backup");
        assert_eq!(
            fs.read("/home/user/backup/notes.txt").unwrap(),
            fs.read("/home/user/documents/notes.txt").unwrap()
        );
    }

    #[tokio::test]
    async fn test_cp_missing_source() {
        let (result, fs) = run(&CpCommand, &["ghost", "copy"]).await;
        assert_eq!(text(result), "Error: ghost does not exist");
        assert!(!fs.exists("/home/user/copy"));
    }

    #[tokio::test]
    async fn test_cp_missing_arguments() {
        assert_eq!(text(run(&CpCommand, &[]).await.0), MISSING);
    }
}
