//! Shell Session
//!
//! Owns the file system, working directory, editor state and history, and
//! turns submitted lines into history entries. Lines are processed one at a
//! time, so history order is submission order.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use chrono::Local;
use futures::FutureExt;
use tracing::{debug, info, warn};

use super::types::{EditorState, HistoryEntry, SessionError, ShellOptions, DEFAULT_CWD, DEFAULT_WEATHER_DELAY};
use crate::commands::{CommandContext, CommandError, CommandRegistry, Output, SessionEffect};
use crate::fs::VirtualFs;
use crate::storage::Persistence;

pub struct Session {
    fs: VirtualFs,
    cwd: String,
    editor: EditorState,
    history: Vec<HistoryEntry>,
    clears: u64,
    registry: CommandRegistry,
    persistence: Persistence,
    weather_delay: Duration,
}

impl Session {
    /// Start a session from the stored file system, seeding a default one
    /// when nothing usable is stored.
    pub async fn new(options: ShellOptions, persistence: Persistence) -> Self {
        let (fs, seeded) = match persistence.load().await {
            Some(fs) => (fs, false),
            None => (VirtualFs::seeded(), true),
        };
        info!(entries = fs.len(), seeded, "file system ready");

        let requested = options.cwd.unwrap_or_else(|| DEFAULT_CWD.to_string());
        let cwd = match fs.require_directory(&requested) {
            Ok(()) => requested,
            Err(e) => {
                warn!(cwd = %requested, error = %e, "starting directory unusable, falling back to /");
                "/".to_string()
            }
        };

        let session = Self {
            fs,
            cwd,
            editor: EditorState::Closed,
            history: Vec::new(),
            clears: 0,
            registry: CommandRegistry::with_builtins(),
            persistence,
            weather_delay: options.weather_delay.unwrap_or(DEFAULT_WEATHER_DELAY),
        };
        if seeded {
            session.persist().await;
        }
        session
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn fs(&self) -> &VirtualFs {
        &self.fs
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Number of times `clear` has run. Bumps even when history was already empty.
    pub fn clears(&self) -> u64 {
        self.clears
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn prompt(&self) -> String {
        format!("{} $ ", self.cwd)
    }

    /// Run one input line and record its output in history.
    ///
    /// Blank lines are ignored. Command failures are ordinary history output;
    /// the only error is trying to run a command while the editor is open.
    pub async fn execute(&mut self, line: &str) -> Result<(), SessionError> {
        if let EditorState::Editing { path, .. } = &self.editor {
            return Err(SessionError::EditorOpen { path: path.clone() });
        }

        let line = line.trim();
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(());
        };
        let args: Vec<String> = tokens.map(str::to_string).collect();
        let timestamp = Local::now().format("%H:%M:%S").to_string();

        let Some(command) = self.registry.get(name) else {
            debug!(command = name, "unknown command");
            self.record(line, Output::Text(format!("Command not found: {}", name)), timestamp);
            return Ok(());
        };

        debug!(command = name, args = args.len(), cwd = %self.cwd, "dispatching");
        let ctx = CommandContext {
            args,
            cwd: self.cwd.clone(),
            fs: &mut self.fs,
            weather_delay: self.weather_delay,
        };
        let outcome = AssertUnwindSafe(command.execute(ctx))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(CommandError::Internal(panic_message(payload.as_ref()))));
        let output = match outcome {
            Ok(result) => {
                if result.mutated {
                    self.persist().await;
                }
                if let Some(effect) = result.effect {
                    self.apply(effect);
                }
                result.output
            }
            Err(err) => {
                if let CommandError::Internal(_) = err {
                    warn!(command = name, error = %err, "command failed unexpectedly");
                }
                Some(Output::Text(err.to_string()))
            }
        };

        if let Some(output) = output {
            self.record(line, output, timestamp);
        }
        Ok(())
    }

    /// Open `path` in the editor and return its content as the initial draft.
    pub fn open_editor(&mut self, path: &str) -> Result<String, SessionError> {
        if let EditorState::Editing { path: open, .. } = &self.editor {
            return Err(SessionError::EditorOpen { path: open.clone() });
        }
        let draft = self.fs.read(path)?.to_string();
        self.editor = EditorState::Editing {
            path: path.to_string(),
            draft: draft.clone(),
        };
        Ok(draft)
    }

    /// Replace the unsaved draft.
    pub fn set_draft(&mut self, content: impl Into<String>) -> Result<(), SessionError> {
        match &mut self.editor {
            EditorState::Editing { draft, .. } => {
                *draft = content.into();
                Ok(())
            }
            EditorState::Closed => Err(SessionError::EditorClosed),
        }
    }

    /// Write `content` to the open file and close the editor.
    pub async fn save_editor(&mut self, path: &str, content: impl Into<String>) -> Result<(), SessionError> {
        let open = self.editor.path().ok_or(SessionError::EditorClosed)?;
        if open != path {
            return Err(SessionError::EditorPathMismatch {
                open: open.to_string(),
                requested: path.to_string(),
            });
        }
        self.fs.write(path, content)?;
        self.editor = EditorState::Closed;
        debug!(path, "editor saved");
        self.persist().await;
        Ok(())
    }

    /// Save the current draft to the open file.
    pub async fn commit_draft(&mut self) -> Result<(), SessionError> {
        match &self.editor {
            EditorState::Editing { path, draft } => {
                let (path, draft) = (path.clone(), draft.clone());
                self.save_editor(&path, draft).await
            }
            EditorState::Closed => Err(SessionError::EditorClosed),
        }
    }

    /// Discard the draft and close the editor.
    pub fn cancel_editor(&mut self) {
        self.editor = EditorState::Closed;
    }

    fn apply(&mut self, effect: SessionEffect) {
        match effect {
            SessionEffect::ChangeDirectory(path) => self.cwd = path,
            SessionEffect::ClearHistory => {
                self.history.clear();
                self.clears += 1;
            }
            SessionEffect::OpenEditor(path) => {
                if let Err(e) = self.open_editor(&path) {
                    warn!(path = %path, error = %e, "could not open editor");
                }
            }
        }
    }

    fn record(&mut self, command: &str, output: Output, timestamp: String) {
        self.history.push(HistoryEntry {
            command: command.to_string(),
            output,
            timestamp,
        });
    }

    async fn persist(&self) {
        if let Err(e) = self.persistence.save(&self.fs).await {
            warn!(key = self.persistence.key(), error = %e, "failed to persist file system");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "command panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::commands::{Command, CommandResult};
    use crate::fs::Node;
    use crate::storage::{MemoryStorage, Storage, StorageError, STORAGE_KEY};

    struct ExplodeCommand;

    #[async_trait]
    impl Command for ExplodeCommand {
        fn name(&self) -> &'static str {
            "explode"
        }

        async fn execute(&self, ctx: CommandContext<'_>) -> Result<CommandResult, CommandError> {
            panic!("handler blew up in {}", ctx.cwd);
        }
    }

    /// Reads as empty, refuses every write.
    struct ReadOnlyStorage;

    #[async_trait]
    impl Storage for ReadOnlyStorage {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: String) -> Result<(), StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    fn options() -> ShellOptions {
        ShellOptions {
            weather_delay: Some(Duration::ZERO),
            ..Default::default()
        }
    }

    async fn session() -> (Session, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let session = Session::new(options(), Persistence::new(storage.clone())).await;
        (session, storage)
    }

    fn last(session: &Session) -> String {
        session.history().last().map(|e| e.output.to_string()).unwrap_or_default()
    }

    #[tokio::test]
    async fn test_starts_seeded_in_home() {
        let (session, storage) = session().await;
        assert_eq!(session.cwd(), "/home/user");
        assert_eq!(session.prompt(), "/home/user $ ");
        assert!(session.history().is_empty());
        assert!(storage.get(STORAGE_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_echo_records_history() {
        let (mut session, _) = session().await;
        session.execute("echo hello world").await.unwrap();
        let entry = &session.history()[0];
        assert_eq!(entry.command, "echo hello world");
        assert_eq!(entry.output, Output::Text("hello world".into()));
        assert_eq!(entry.timestamp.len(), 8);
    }

    #[tokio::test]
    async fn test_extra_whitespace_between_arguments() {
        let (mut session, _) = session().await;
        session.execute("  echo   a    b ").await.unwrap();
        assert_eq!(last(&session), "a b");
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let (mut session, _) = session().await;
        let before = session.fs().clone();
        session.execute("frobnicate now").await.unwrap();
        assert_eq!(last(&session), "Command not found: frobnicate");
        assert_eq!(session.fs(), &before);

        session.execute("LS").await.unwrap();
        assert_eq!(last(&session), "Command not found: LS");
    }

    #[tokio::test]
    async fn test_blank_line_is_ignored() {
        let (mut session, _) = session().await;
        session.execute("   ").await.unwrap();
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_clear_empties_history_only() {
        let (mut session, _) = session().await;
        session.execute("mkdir keep").await.unwrap();
        session.execute("echo x").await.unwrap();
        session.execute("clear").await.unwrap();
        assert!(session.history().is_empty());
        assert!(session.fs().exists("/home/user/keep"));
    }

    #[tokio::test]
    async fn test_clear_on_empty_history_is_observable() {
        let (mut session, _) = session().await;
        assert_eq!(session.clears(), 0);
        session.execute("clear").await.unwrap();
        assert!(session.history().is_empty());
        assert_eq!(session.clears(), 1);
        session.execute("echo x").await.unwrap();
        session.execute("clear").await.unwrap();
        assert_eq!(session.clears(), 2);
    }

    #[tokio::test]
    async fn test_panicking_command_is_reported() {
        let (mut session, _) = session().await;
        session.registry.register(Box::new(ExplodeCommand));
        session.execute("explode").await.unwrap();
        assert_eq!(last(&session), "Error executing command: handler blew up in /home/user");

        session.execute("echo still here").await.unwrap();
        assert_eq!(last(&session), "still here");
        assert_eq!(session.history().len(), 2);
    }

    #[tokio::test]
    async fn test_storage_failure_does_not_reach_output() {
        let mut session = Session::new(options(), Persistence::new(Arc::new(ReadOnlyStorage))).await;
        session.execute("mkdir x").await.unwrap();
        assert_eq!(last(&session), "Created directory: x");
        assert!(session.fs().get("/home/user/x").unwrap().is_directory());

        session.execute("touch x/a.txt").await.unwrap();
        session.execute("edit x/a.txt").await.unwrap();
        session.save_editor("/home/user/x/a.txt", "kept").await.unwrap();
        assert_eq!(session.fs().read("/home/user/x/a.txt").unwrap(), "kept");
        assert_eq!(session.history().len(), 3);
    }

    #[tokio::test]
    async fn test_mkdir_then_ls() {
        let (mut session, _) = session().await;
        session.execute("mkdir docs").await.unwrap();
        session.execute("ls").await.unwrap();
        assert_eq!(last(&session), "documents/  docs/");
    }

    #[tokio::test]
    async fn test_cd_navigation() {
        let (mut session, _) = session().await;
        session.execute("cd documents").await.unwrap();
        assert_eq!(session.cwd(), "/home/user/documents");
        session.execute("cd ..").await.unwrap();
        session.execute("cd ..").await.unwrap();
        assert_eq!(session.cwd(), "/home");
        session.execute("cd ..").await.unwrap();
        assert_eq!(session.cwd(), "/");
        session.execute("cd /home/user/documents").await.unwrap();
        assert_eq!(session.cwd(), "/home/user/documents");
        session.execute("cd nowhere").await.unwrap();
        assert_eq!(last(&session), "Directory not found");
        assert_eq!(session.cwd(), "/home/user/documents");
    }

    #[tokio::test]
    async fn test_rm_directory_then_ls() {
        let (mut session, _) = session().await;
        session.execute("rm documents").await.unwrap();
        assert!(!session.fs().exists("/home/user/documents/notes.txt"));
        session.execute("ls").await.unwrap();
        assert_eq!(last(&session), "");
    }

    #[tokio::test]
    async fn test_mv_then_cat() {
        let (mut session, _) = session().await;
        session.execute("cd documents").await.unwrap();
        session.execute("mv notes.txt b.txt").await.unwrap();
        session.execute("cat notes.txt").await.unwrap();
        assert_eq!(last(&session), "File not found");
        session.execute("cat b.txt").await.unwrap();
        assert!(last(&session).starts_with("Welcome to the terminal!"));
    }

    #[tokio::test]
    async fn test_grep_scenario() {
        let (mut session, _) = session().await;
        session.execute("touch a.txt").await.unwrap();
        session.execute("edit a.txt").await.unwrap();
        session.save_editor("/home/user/a.txt", "foo bar\nbaz").await.unwrap();
        session.execute("grep foo a.txt").await.unwrap();
        assert_eq!(last(&session), "foo bar");
    }

    #[tokio::test]
    async fn test_calc_scenarios() {
        let (mut session, _) = session().await;
        session.execute("calc 2+2").await.unwrap();
        assert_eq!(last(&session), "2+2 = 4");
        session.execute("calc )(").await.unwrap();
        assert_eq!(last(&session), "Invalid expression");
    }

    #[tokio::test]
    async fn test_touch_does_not_normalize() {
        let (mut session, _) = session().await;
        session.execute("mkdir docs").await.unwrap();
        session.execute("touch docs/../note.txt").await.unwrap();
        assert!(session.fs().exists("/home/user/docs/../note.txt"));
        assert!(!session.fs().exists("/home/user/note.txt"));
    }

    #[tokio::test]
    async fn test_weather() {
        let (mut session, _) = session().await;
        session.execute("weather Paris").await.unwrap();
        assert_eq!(last(&session), "Weather in Paris: 22°C, Partly Cloudy");
        session.execute("weather").await.unwrap();
        assert_eq!(last(&session), "Please specify a city");
    }

    #[tokio::test]
    async fn test_editor_save_flow() {
        let (mut session, storage) = session().await;
        session.execute("touch todo.txt").await.unwrap();
        session.execute("edit todo.txt").await.unwrap();
        assert_eq!(last(&session), "Opening editor...");
        assert_eq!(session.editor().path(), Some("/home/user/todo.txt"));
        assert_eq!(session.editor().draft(), Some(""));

        let err = session.execute("ls").await.unwrap_err();
        assert_eq!(err, SessionError::EditorOpen { path: "/home/user/todo.txt".into() });

        session.set_draft("buy milk").unwrap();
        session.commit_draft().await.unwrap();
        assert!(!session.editor().is_open());

        let file = session.fs().get("/home/user/todo.txt").and_then(Node::as_file).unwrap();
        assert_eq!(file.content(), "buy milk");
        assert_eq!(file.size(), "buy milk".len());

        let reloaded = Persistence::new(storage).load().await.unwrap();
        assert_eq!(reloaded.read("/home/user/todo.txt").unwrap(), "buy milk");
    }

    #[tokio::test]
    async fn test_editor_cancel_discards_draft() {
        let (mut session, _) = session().await;
        session.execute("cd documents").await.unwrap();
        session.execute("edit notes.txt").await.unwrap();
        session.set_draft("scribble").unwrap();
        session.cancel_editor();
        assert!(!session.editor().is_open());
        assert!(session
            .fs()
            .read("/home/user/documents/notes.txt")
            .unwrap()
            .starts_with("Welcome"));
        session.execute("echo back").await.unwrap();
        assert_eq!(last(&session), "back");
    }

    #[tokio::test]
    async fn test_save_editor_misuse() {
        let (mut session, _) = session().await;
        assert_eq!(session.save_editor("/x", "y").await, Err(SessionError::EditorClosed));
        assert_eq!(session.set_draft("y"), Err(SessionError::EditorClosed));

        session.open_editor("/home/user/documents/notes.txt").unwrap();
        let err = session.save_editor("/other", "y").await.unwrap_err();
        assert!(matches!(err, SessionError::EditorPathMismatch { .. }));
        assert!(session.editor().is_open());
    }

    #[tokio::test]
    async fn test_open_editor_on_directory() {
        let (mut session, _) = session().await;
        let err = session.open_editor("/home/user").unwrap_err();
        assert!(matches!(err, SessionError::Fs(_)));
        assert!(!session.editor().is_open());
    }

    #[tokio::test]
    async fn test_mutations_survive_restart() {
        let (mut session, storage) = session().await;
        session.execute("mkdir projects").await.unwrap();
        session.execute("cd projects").await.unwrap();
        session.execute("touch plan.md").await.unwrap();

        let restarted = Session::new(options(), Persistence::new(storage)).await;
        assert!(restarted.fs().exists("/home/user/projects/plan.md"));
        assert_eq!(restarted.cwd(), "/home/user");
    }

    #[tokio::test]
    async fn test_missing_start_directory_falls_back_to_root() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(STORAGE_KEY, r#"{"/":{"type":"directory"},"/tmp":{"type":"directory"}}"#.into())
            .await
            .unwrap();
        let session = Session::new(options(), Persistence::new(storage)).await;
        assert_eq!(session.cwd(), "/");
    }

    #[tokio::test]
    async fn test_custom_start_directory() {
        let storage = Arc::new(MemoryStorage::new());
        let opts = ShellOptions {
            cwd: Some("/home/user/documents".into()),
            ..options()
        };
        let session = Session::new(opts, Persistence::new(storage)).await;
        assert_eq!(session.cwd(), "/home/user/documents");
    }
}
