use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use vterm::config::Config;
use vterm::storage::{FileStorage, MemoryStorage, Persistence, Storage};
use vterm::Session;

const DEFAULT_STATE_FILE: &str = "vterm-state.json";

#[derive(Parser)]
#[command(name = "vterm")]
#[command(about = "A simulated terminal over a persistent virtual file system")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file the file system is saved to
    #[arg(long)]
    state: Option<PathBuf>,

    /// Keep the file system in memory only
    #[arg(long, conflicts_with = "state")]
    memory: bool,

    /// Starting working directory
    #[arg(long)]
    cwd: Option<String>,

    /// Run this line instead of reading stdin (repeatable)
    #[arg(short = 'c')]
    commands: Vec<String>,

    /// Print the resulting history as JSON (with -c)
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    if let Err(e) = vterm::logging::init_logging(config.logging.level.as_deref()) {
        eprintln!("Error: cannot initialize logging: {}", e);
    }

    let storage: Arc<dyn Storage> = if cli.memory {
        Arc::new(MemoryStorage::new())
    } else {
        let path = cli
            .state
            .clone()
            .or_else(|| config.storage.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));
        Arc::new(FileStorage::new(path))
    };
    let mut options = config.shell_options();
    if cli.cwd.is_some() {
        options.cwd = cli.cwd.clone();
    }
    let persistence = match &options.storage_key {
        Some(key) => Persistence::with_key(storage, key.clone()),
        None => Persistence::new(storage),
    };

    let mut session = Session::new(options, persistence).await;

    if cli.commands.is_empty() {
        repl(&mut session).await;
    } else {
        run_lines(&mut session, &cli.commands, cli.json).await;
    }
}

/// Run `-c` lines without a terminal. An editor opened by `edit` is closed
/// again since there is nobody to type into it.
async fn run_lines(session: &mut Session, lines: &[String], json: bool) {
    for line in lines {
        let before = Mark::take(session);
        if let Err(e) = session.execute(line).await {
            eprintln!("{}", e);
            continue;
        }
        if session.editor().is_open() {
            session.cancel_editor();
        }
        if !json {
            print_new_output(session, before);
        }
    }

    if json {
        match serde_json::to_string_pretty(session.history()) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: cannot encode history: {}", e);
                std::process::exit(1);
            }
        }
    }
}

async fn repl(session: &mut Session) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", session.prompt());
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error: cannot read input: {}", e);
                break;
            }
        };

        let before = Mark::take(session);
        if let Err(e) = session.execute(&line).await {
            eprintln!("{}", e);
            continue;
        }
        print_new_output(session, before);

        if session.editor().is_open() {
            edit(session, &mut lines).await;
        }
    }
}

/// History position before a line runs.
#[derive(Clone, Copy)]
struct Mark {
    len: usize,
    clears: u64,
}

impl Mark {
    fn take(session: &Session) -> Self {
        Self {
            len: session.history().len(),
            clears: session.clears(),
        }
    }
}

fn print_new_output(session: &Session, before: Mark) {
    if session.clears() != before.clears {
        print!("\x1B[2J\x1B[H");
        let _ = std::io::stdout().flush();
        return;
    }
    let history = session.history();
    if history.len() == before.len {
        return;
    }
    if let Some(entry) = history.last() {
        let text = entry.output.to_string();
        if !text.is_empty() {
            println!("{}", text);
        }
    }
}

/// Line-mode stand-in for the editor overlay: collect replacement lines
/// until `.` (save) or `:q` (cancel).
async fn edit(session: &mut Session, lines: &mut Lines<BufReader<Stdin>>) {
    let path = session.editor().path().unwrap_or_default().to_string();
    let draft = session.editor().draft().unwrap_or_default().to_string();

    println!("--- {} ---", path);
    if !draft.is_empty() {
        println!("{}", draft);
        println!("--- type the new content ---");
    }
    println!("(finish with a line containing only '.', or ':q' to discard)");

    let mut buffer: Vec<String> = Vec::new();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if line == "." => {
                let saved = match session.set_draft(buffer.join("\n")) {
                    Ok(()) => session.commit_draft().await,
                    Err(e) => Err(e),
                };
                match saved {
                    Ok(()) => println!("Saved {}", path),
                    Err(e) => eprintln!("Error: {}", e),
                }
                return;
            }
            Ok(Some(line)) if line == ":q" => {
                session.cancel_editor();
                println!("Discarded changes to {}", path);
                return;
            }
            Ok(Some(line)) => buffer.push(line),
            Ok(None) | Err(_) => {
                session.cancel_editor();
                return;
            }
        }
    }
}
