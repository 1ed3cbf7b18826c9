use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandError, CommandResult};

pub struct WeatherCommand;

#[async_trait]
impl Command for WeatherCommand {
    fn name(&self) -> &'static str { "weather" }

    async fn execute(&self, ctx: CommandContext<'_>) -> Result<CommandResult, CommandError> {
        let city = ctx.args.join(" ");
        if city.is_empty() {
            return Err(CommandError::MissingArgument("Please specify a city"));
        }
        // Stand-in for a remote lookup.
        tokio::time::sleep(ctx.weather_delay).await;
        Ok(CommandResult::success(format!("Weather in {}: 22°C, Partly Cloudy", city)))
    }
}
