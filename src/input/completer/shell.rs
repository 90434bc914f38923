use std::{borrow::Cow, path::PathBuf};

use super::{command::CommandCompleter, path::PathCompleter};
use crate::highlight::{StyleKind, SyntaxHighlighter};

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

#[derive(Clone)]
pub struct ShellCompleter {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: SyntaxHighlighter,
}

impl ShellCompleter {
    pub fn new(base_dir: PathBuf, highlighter: SyntaxHighlighter) -> Self {
        ShellCompleter {
            command_completer: CommandCompleter::new(),
            path_completer: PathCompleter::new(base_dir),
            highlighter,
        }
    }

    /// Follows the file manager's current directory after a `cd`.
    pub fn set_base_dir(&mut self, base_dir: PathBuf) {
        self.path_completer.set_base_dir(base_dir);
    }
}

impl Helper for ShellCompleter {}
impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(
            self.highlighter
                .highlight_command(line, |word| self.command_completer.is_command(word)),
        )
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        Cow::Owned(self.highlighter.paint(StyleKind::Path, prompt))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }
}
impl Hinter for ShellCompleter {
    type Hint = String;
}
impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_up_to_cursor = &line[..pos];
        let mut words: Vec<&str> = line_up_to_cursor.split_whitespace().collect();

        if line_up_to_cursor.is_empty() || line_up_to_cursor.ends_with(char::is_whitespace) {
            words.push("");
        }

        let last_word = words.last().copied().unwrap_or("");
        let start = pos - last_word.len();

        let matches = if words.len() <= 1 {
            self.command_completer.complete_command(last_word)
        } else {
            self.path_completer.complete_path(last_word)
        };

        Ok((start, matches))
    }
}
