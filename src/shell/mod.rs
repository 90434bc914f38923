use std::io::IsTerminal;
use std::path::PathBuf;

use rustyline::{config::Configurer, history::FileHistory, Editor};

mod executor;

use crate::{
    core::{
        commands::{CommandExecutor, Flow},
        state::ProcessState,
    },
    error::ShellError,
    flags::Flags,
    highlight::{StyleKind, SyntaxHighlighter},
    input::ShellCompleter,
    presentation::{ConsolePresenter, Presenter},
};

use executor::CommandHandler;

const TITLE: &str = "File Manager";

pub struct Shell {
    pub(crate) editor: Editor<ShellCompleter, FileHistory>,
    pub(crate) executor: CommandExecutor,
    pub(crate) presenter: ConsolePresenter<std::io::Stdout>,
    pub(crate) flags: Flags,
    pub(crate) history_file: Option<PathBuf>,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let state = ProcessState::from_env()?;
        let highlighter = SyntaxHighlighter::new();

        let completer = ShellCompleter::new(state.current_dir().to_path_buf(), highlighter);
        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(completer));
        editor.set_auto_add_history(true);

        let history_file = flags.history_file();
        if let Some(path) = &history_file {
            if path.exists() {
                if let Err(e) = editor.load_history(path) {
                    tracing::warn!(path = %path.display(), error = %e, "could not load history");
                }
            }
        }

        // Interrupts outside line editing must not abort a file operation halfway.
        ctrlc::set_handler(move || {
            println!("\nUse 'exit' to leave the file manager");
        })?;

        Ok(Shell {
            editor,
            executor: CommandExecutor::new(state),
            presenter: ConsolePresenter::new(std::io::stdout(), highlighter)
                .with_screen_control(std::io::stdout().is_terminal()),
            flags,
            history_file,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        self.presenter.set_title(TITLE);
        if !self.flags.is_set("quiet") {
            self.show_heading();
        }

        loop {
            let prompt = format!("{}> ", self.executor.state().current_dir().display());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if self.handle_line(&line) == Flow::Exit {
                        break;
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    continue;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    break;
                }
                Err(e) => {
                    self.presenter.failure(&format!("Error: {}", e));
                    continue;
                }
            }
        }

        self.save_history();
        Ok(())
    }

    fn show_heading(&mut self) {
        self.presenter.set_style(StyleKind::Heading);
        self.presenter.write(&format!(
            "{} [Version {}]\n\n",
            TITLE,
            env!("CARGO_PKG_VERSION")
        ));
        self.presenter.set_style(StyleKind::Default);
    }

    fn save_history(&mut self) {
        let Some(path) = &self.history_file else {
            return;
        };
        if let Err(e) = self.editor.save_history(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not save history");
        }
    }
}
