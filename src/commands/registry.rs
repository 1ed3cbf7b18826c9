// src/commands/registry.rs
use std::collections::HashMap;
use super::types::Command;

pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registry holding every built-in command.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry);
        registry
    }

    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    /// Look up a command by exact, case-sensitive name.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(|s| s.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use super::calc::CalcCommand;
use super::cat::CatCommand;
use super::cd::CdCommand;
use super::clear_cmd::ClearCommand;
use super::cp::CpCommand;
use super::echo::EchoCommand;
use super::edit::EditCommand;
use super::grep::GrepCommand;
use super::help_cmd::HelpCommand;
use super::ls::LsCommand;
use super::mkdir::MkdirCommand;
use super::mv::MvCommand;
use super::rm::RmCommand;
use super::touch::TouchCommand;
use super::weather_cmd::WeatherCommand;

/// 注册所有内置命令
pub fn register_builtins(registry: &mut CommandRegistry) {
    registry.register(Box::new(HelpCommand));
    registry.register(Box::new(ClearCommand));
    registry.register(Box::new(EchoCommand));
    registry.register(Box::new(LsCommand));
    registry.register(Box::new(CdCommand));
    registry.register(Box::new(CatCommand));
    registry.register(Box::new(TouchCommand));
    registry.register(Box::new(MkdirCommand));
    registry.register(Box::new(RmCommand));
    registry.register(Box::new(EditCommand));
    registry.register(Box::new(MvCommand));
    registry.register(Box::new(CpCommand));
    registry.register(Box::new(GrepCommand));
    registry.register(Box::new(CalcCommand));
    registry.register(Box::new(WeatherCommand));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_registered() {
        let registry = CommandRegistry::with_builtins();
        let mut names = registry.names();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "calc", "cat", "cd", "clear", "cp", "echo", "edit", "grep", "help", "ls", "mkdir",
                "mv", "rm", "touch", "weather",
            ]
        );
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = CommandRegistry::with_builtins();
        assert!(registry.get("ls").is_some());
        assert!(registry.get("LS").is_none());
        assert!(!registry.contains("Echo"));
    }
}
