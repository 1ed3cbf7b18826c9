use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandError, CommandResult, HelpTopic, Output};

pub struct HelpCommand;

const fn topic(usage: &'static str, description: &'static str) -> HelpTopic {
    HelpTopic { usage, description }
}

const COMMANDS: &[HelpTopic] = &[
    topic("help", "Show this help message"),
    topic("clear", "Clear terminal"),
    topic("echo [text]", "Display text"),
    topic("ls", "List directory contents"),
    topic("cd [path]", "Change directory"),
    topic("cat [file]", "Display file contents"),
    topic("touch [file]", "Create new file"),
    topic("mkdir [dir]", "Create new directory"),
    topic("rm [file/dir]", "Remove file or directory"),
    topic("edit [file]", "Edit file contents"),
    topic("weather [city]", "Get weather info"),
    topic("calc [expression]", "Calculate expression"),
    topic("mv [source] [destination]", "Move or rename files and directories"),
    topic("cp [source] [destination]", "Copy files and directories"),
    topic("grep [pattern] [file]", "Search for a pattern in a file"),
];

const EXAMPLES: &[HelpTopic] = &[
    topic("echo Hello World", "Displays \"Hello World\""),
    topic("cd /home/user/docs", "Changes directory to /home/user/docs"),
    topic("cat file.txt", "Displays contents of file.txt"),
    topic("mv oldname.txt newname.txt", "Renames oldname.txt to newname.txt"),
    topic("cp file1.txt file2.txt", "Copies file1.txt to file2.txt"),
    topic("grep search file.txt", "Searches for \"search\" in file.txt"),
];

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &'static str { "help" }

    async fn execute(&self, _ctx: CommandContext<'_>) -> Result<CommandResult, CommandError> {
        Ok(CommandResult::output(Output::Help {
            commands: COMMANDS,
            examples: EXAMPLES,
        }))
    }
}
