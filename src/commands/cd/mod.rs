// src/commands/cd/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandError, CommandResult, FsResultExt, SessionEffect};
use crate::fs::path::resolve;

pub struct CdCommand;

#[async_trait]
impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> Result<CommandResult, CommandError> {
        let target = ctx.arg(0, "Please specify a directory")?;
        let path = resolve(&target, &ctx.cwd);
        ctx.fs.require_directory(&path).or_report("Directory not found")?;
        Ok(CommandResult::success(format!("Changed directory to {}", path))
            .with_effect(SessionEffect::ChangeDirectory(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{run, run_in, text};
    use crate::fs::VirtualFs;

    fn nested() -> VirtualFs {
        let mut fs = VirtualFs::new();
        for dir in ["/a", "/a/b", "/a/b/c"] {
            fs.make_directory(dir).unwrap();
        }
        fs.touch("/a/file.txt");
        fs
    }

    #[tokio::test]
    async fn test_cd_relative() {
        let (result, _) = run(&CdCommand, &["documents"]).await;
        let result = result.unwrap();
        assert_eq!(
            result.effect,
            Some(SessionEffect::ChangeDirectory("/home/user/documents".into()))
        );
        assert_eq!(result.output.unwrap().to_string(), "Changed directory to /home/user/documents");
    }

    #[tokio::test]
    async fn test_cd_up() {
        let (result, _) = run_in(&CdCommand, nested(), "/a/b/c", &[".."]).await;
        assert_eq!(result.unwrap().effect, Some(SessionEffect::ChangeDirectory("/a/b".into())));

        let (result, _) = run_in(&CdCommand, nested(), "/a", &[".."]).await;
        assert_eq!(result.unwrap().effect, Some(SessionEffect::ChangeDirectory("/".into())));
    }

    #[tokio::test]
    async fn test_cd_absolute() {
        let (result, _) = run_in(&CdCommand, nested(), "/", &["/a/b"]).await;
        assert_eq!(result.unwrap().effect, Some(SessionEffect::ChangeDirectory("/a/b".into())));
    }

    #[tokio::test]
    async fn test_cd_into_file_or_missing() {
        let (result, _) = run_in(&CdCommand, nested(), "/a", &["file.txt"]).await;
        assert_eq!(text(result), "Directory not found");
        let (result, _) = run_in(&CdCommand, nested(), "/a", &["nowhere"]).await;
        assert_eq!(text(result), "Directory not found");
    }

    #[tokio::test]
    async fn test_cd_missing_argument() {
        let (result, _) = run(&CdCommand, &[]).await;
        assert!(matches!(result, Err(CommandError::MissingArgument(_))));
    }
}
