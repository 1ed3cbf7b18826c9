use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandError, CommandResult, SessionEffect};

pub struct ClearCommand;

#[async_trait]
impl Command for ClearCommand {
    fn name(&self) -> &'static str {
        "clear"
    }

    async fn execute(&self, _ctx: CommandContext<'_>) -> Result<CommandResult, CommandError> {
        Ok(CommandResult::silent().with_effect(SessionEffect::ClearHistory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::run;

    #[tokio::test]
    async fn test_clear_is_silent() {
        let (result, _) = run(&ClearCommand, &[]).await;
        let result = result.unwrap();
        assert!(result.output.is_none());
        assert_eq!(result.effect, Some(SessionEffect::ClearHistory));
        assert!(!result.mutated);
    }
}
