// src/commands/calc/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandError, CommandResult};

pub mod parser;

pub use parser::{evaluate, format_number, EvalError};

pub struct CalcCommand;

#[async_trait]
impl Command for CalcCommand {
    fn name(&self) -> &'static str {
        "calc"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> Result<CommandResult, CommandError> {
        // Tokens are glued back together, so `calc 2 + 2` and `calc 2+2` agree.
        let expr = ctx.args.concat();
        let value = evaluate(&expr)?;
        Ok(CommandResult::success(format!("{} = {}", expr, format_number(value))))
    }
}
