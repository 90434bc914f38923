use std::fmt;
use std::io;

use tracing::debug;

mod help;

use crate::core::fs::ops::{self, ListEntry};
use crate::core::fs::{AccessControl, FileBrowser, NativeAccess, PermissionLevel};
use crate::core::state::ProcessState;
use crate::path::PathResolver;
use crate::presentation::Presenter;

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
    AlreadyExists(String),
    NotFound(String),
    OperationFailed(String),
    UnknownCommand(String),
}

impl CommandError {
    pub fn invalid_arguments() -> Self {
        CommandError::InvalidArguments(
            "Invalid number of arguments. See \"help\" for usage instructions.".to_string(),
        )
    }

    /// Classifies an I/O failure, attaching the user-facing `message`.
    pub fn from_io(err: &io::Error, message: String) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => CommandError::NotFound(message),
            io::ErrorKind::AlreadyExists => CommandError::AlreadyExists(message),
            _ => CommandError::OperationFailed(message),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::InvalidArguments(msg)
            | CommandError::AlreadyExists(msg)
            | CommandError::NotFound(msg)
            | CommandError::OperationFailed(msg) => write!(f, "{}", msg),
            CommandError::UnknownCommand(name) => {
                write!(f, "Invalid command '{}'. Please try again.", name)
            }
        }
    }
}

impl std::error::Error for CommandError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Cd,
    Mkdir,
    Mkfile,
    Rename,
    Delete,
    Move,
    Ls,
    Tree,
    Permit,
    Help,
    OpenFe,
    Clear,
    Exit,
}

impl CommandKind {
    pub const ALL: [CommandKind; 13] = [
        CommandKind::Cd,
        CommandKind::Mkdir,
        CommandKind::Mkfile,
        CommandKind::Rename,
        CommandKind::Delete,
        CommandKind::Move,
        CommandKind::Ls,
        CommandKind::Tree,
        CommandKind::Permit,
        CommandKind::Help,
        CommandKind::OpenFe,
        CommandKind::Clear,
        CommandKind::Exit,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Cd => "cd",
            CommandKind::Mkdir => "mkdir",
            CommandKind::Mkfile => "mkfile",
            CommandKind::Rename => "rename",
            CommandKind::Delete => "delete",
            CommandKind::Move => "move",
            CommandKind::Ls => "ls",
            CommandKind::Tree => "tree",
            CommandKind::Permit => "permit",
            CommandKind::Help => "help",
            CommandKind::OpenFe => "openfe",
            CommandKind::Clear => "clear",
            CommandKind::Exit => "exit",
        }
    }

    /// Number of arguments that must be present before the command runs.
    pub fn arity(self) -> usize {
        match self {
            CommandKind::Rename | CommandKind::Move | CommandKind::Permit => 2,
            CommandKind::Cd
            | CommandKind::Mkdir
            | CommandKind::Mkfile
            | CommandKind::Delete
            | CommandKind::Tree => 1,
            CommandKind::Ls
            | CommandKind::Help
            | CommandKind::OpenFe
            | CommandKind::Clear
            | CommandKind::Exit => 0,
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            CommandKind::Cd => "cd <dir>",
            CommandKind::Mkdir => "mkdir <dir>",
            CommandKind::Mkfile => "mkfile <filename>",
            CommandKind::Rename => "rename <name> <new_name>",
            CommandKind::Delete => "delete <file | dir>",
            CommandKind::Move => "move <source> <dest>",
            CommandKind::Ls => "ls",
            CommandKind::Tree => "tree <filename>",
            CommandKind::Permit => "permit <file | dir> <read | write | modify>",
            CommandKind::Help => "help",
            CommandKind::OpenFe => "openfe",
            CommandKind::Clear => "clear",
            CommandKind::Exit => "exit",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CommandKind::Cd => "Navigate to the specified directory",
            CommandKind::Mkdir => "Create a new directory",
            CommandKind::Mkfile => "Create a new file",
            CommandKind::Rename => "Rename a file or directory",
            CommandKind::Delete => "Delete a file or an empty directory",
            CommandKind::Move => "Move a file or directory into another directory",
            CommandKind::Ls => "List files and directories",
            CommandKind::Tree => "Write the directory structure to a file",
            CommandKind::Permit => "Set permissions for a file or directory",
            CommandKind::Help => "Show the available commands",
            CommandKind::OpenFe => "Open the file browser in the current directory",
            CommandKind::Clear => "Clear the console",
            CommandKind::Exit => "Exit the program",
        }
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Cd(String),
    Mkdir(String),
    Mkfile(String),
    Rename(String, String),
    Delete(String),
    Move(String, String),
    Ls,
    Tree(String),
    Permit(String, PermissionLevel),
    Help,
    OpenFe,
    Clear,
    Exit,
}

impl Command {
    /// Parses `line` into a command. Only the first three words count;
    /// anything after them is dropped. A blank line parses to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace().take(3);
        let Some(name) = words.next() else {
            // Blank input re-prompts quietly instead of reporting an invalid command.
            return Ok(None);
        };

        let kind = CommandKind::from_name(name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;

        let args: Vec<String> = words.map(str::to_string).collect();
        if args.len() < kind.arity() {
            return Err(CommandError::invalid_arguments());
        }

        let mut args = args.into_iter();
        let mut next = || args.next().unwrap_or_default();

        let command = match kind {
            CommandKind::Cd => Command::Cd(next()),
            CommandKind::Mkdir => Command::Mkdir(next()),
            CommandKind::Mkfile => Command::Mkfile(next()),
            CommandKind::Rename => Command::Rename(next(), next()),
            CommandKind::Delete => Command::Delete(next()),
            CommandKind::Move => Command::Move(next(), next()),
            CommandKind::Ls => Command::Ls,
            CommandKind::Tree => Command::Tree(next()),
            CommandKind::Permit => {
                let target = next();
                Command::Permit(target, PermissionLevel::parse(&next()))
            }
            CommandKind::Help => Command::Help,
            CommandKind::OpenFe => Command::OpenFe,
            CommandKind::Clear => Command::Clear,
            CommandKind::Exit => Command::Exit,
        };
        Ok(Some(command))
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Cd(_) => CommandKind::Cd,
            Command::Mkdir(_) => CommandKind::Mkdir,
            Command::Mkfile(_) => CommandKind::Mkfile,
            Command::Rename(..) => CommandKind::Rename,
            Command::Delete(_) => CommandKind::Delete,
            Command::Move(..) => CommandKind::Move,
            Command::Ls => CommandKind::Ls,
            Command::Tree(_) => CommandKind::Tree,
            Command::Permit(..) => CommandKind::Permit,
            Command::Help => CommandKind::Help,
            Command::OpenFe => CommandKind::OpenFe,
            Command::Clear => CommandKind::Clear,
            Command::Exit => CommandKind::Exit,
        }
    }
}

/// What a successful command leaves for the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Success(String),
    Listing(Vec<ListEntry>),
    Help,
    Clear,
    Silent,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct CommandExecutor {
    state: ProcessState,
    resolver: PathResolver,
    access: Box<dyn AccessControl>,
    browser: FileBrowser,
}

impl CommandExecutor {
    pub fn new(state: ProcessState) -> Self {
        Self {
            state,
            resolver: PathResolver::new(),
            access: Box::new(NativeAccess),
            browser: FileBrowser::default(),
        }
    }

    pub fn with_access(mut self, access: impl AccessControl + 'static) -> Self {
        self.access = Box::new(access);
        self
    }

    pub fn with_browser(mut self, browser: FileBrowser) -> Self {
        self.browser = browser;
        self
    }

    pub fn state(&self) -> &ProcessState {
        &self.state
    }

    /// Parses, runs and renders one input line.
    pub fn execute(&mut self, line: &str, presenter: &mut dyn Presenter) -> Flow {
        let outcome = Command::parse(line).and_then(|command| match command {
            Some(command) => {
                debug!(command = command.kind().name(), "dispatching");
                self.run(command)
            }
            None => Ok(Report::Silent),
        });

        match outcome {
            Ok(report) => Self::render(report, presenter),
            Err(err) => {
                debug!(error = ?err, "command failed");
                presenter.failure(&err.to_string());
                Flow::Continue
            }
        }
    }

    pub fn run(&mut self, command: Command) -> Result<Report, CommandError> {
        let report = match command {
            Command::Cd(dir) => {
                let path = self.resolve(&dir);
                ops::change_dir(&mut self.state, &path)?;
                Report::Silent
            }
            Command::Mkdir(dir) => Report::Success(ops::create_directory(&self.resolve(&dir))?),
            Command::Mkfile(file) => Report::Success(ops::create_file(&self.resolve(&file))?),
            Command::Rename(old, new) => {
                Report::Success(ops::rename(&self.resolve(&old), &self.resolve(&new))?)
            }
            Command::Delete(target) => Report::Success(ops::delete(&self.resolve(&target))?),
            Command::Move(source, destination) => Report::Success(ops::move_into(
                &self.resolve(&source),
                &self.resolve(&destination),
            )?),
            Command::Ls => Report::Listing(ops::list(self.state.current_dir())?),
            Command::Tree(output) => Report::Success(ops::export_tree(
                self.state.current_dir(),
                &self.resolve(&output),
            )?),
            Command::Permit(target, level) => Report::Success(ops::set_permissions(
                self.access.as_ref(),
                &self.resolve(&target),
                &level,
            )?),
            Command::Help => Report::Help,
            Command::OpenFe => {
                ops::open_in_browser(&self.browser, self.state.current_dir())?;
                Report::Silent
            }
            Command::Clear => Report::Clear,
            Command::Exit => Report::Exit,
        };
        Ok(report)
    }

    fn resolve(&self, token: &str) -> std::path::PathBuf {
        self.resolver.resolve(&self.state, token)
    }

    fn render(report: Report, presenter: &mut dyn Presenter) -> Flow {
        match report {
            Report::Success(message) => presenter.success(&message),
            Report::Listing(entries) => {
                let mut text = String::from("\n");
                for entry in &entries {
                    text.push_str(&entry.display_line());
                    text.push('\n');
                }
                text.push('\n');
                presenter.plain(&text);
            }
            Report::Help => help::render(presenter),
            Report::Clear => presenter.clear_screen(),
            Report::Silent => {}
            Report::Exit => return Flow::Exit,
        }
        Flow::Continue
    }
}
