//! Output side of the file manager.
//!
//! Commands never print directly. They report through a [`Presenter`], which
//! the REPL backs with a [`ConsolePresenter`] and tests back with a
//! [`Transcript`].

use std::io::Write;

use crate::highlight::{StyleKind, SyntaxHighlighter};

pub trait Presenter {
    fn set_style(&mut self, kind: StyleKind);

    fn write(&mut self, text: &str);

    fn clear_screen(&mut self);

    fn set_title(&mut self, title: &str);

    fn success(&mut self, message: &str) {
        self.framed(StyleKind::Success, message);
    }

    fn failure(&mut self, message: &str) {
        self.framed(StyleKind::Error, message);
    }

    fn plain(&mut self, text: &str) {
        self.set_style(StyleKind::Default);
        self.write(text);
    }

    /// Writes `message` on its own line followed by a blank line, then
    /// returns to the default style.
    fn framed(&mut self, kind: StyleKind, message: &str) {
        self.set_style(kind);
        self.write(&format!("\n{}\n\n", message));
        self.set_style(StyleKind::Default);
    }
}

pub struct ConsolePresenter<W: Write> {
    out: W,
    highlighter: SyntaxHighlighter,
    style: StyleKind,
    screen_control: bool,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W, highlighter: SyntaxHighlighter) -> Self {
        Self {
            out,
            highlighter,
            style: StyleKind::Default,
            screen_control: false,
        }
    }

    /// Enables clear-screen and window-title escapes. These depend on the
    /// output being a terminal, not on color support.
    pub fn with_screen_control(mut self, enabled: bool) -> Self {
        self.screen_control = enabled;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        // A closed stdout leaves nothing to report to.
        let _ = self.out.write_all(text.as_bytes());
        let _ = self.out.flush();
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn set_style(&mut self, kind: StyleKind) {
        self.style = kind;
    }

    fn write(&mut self, text: &str) {
        // Paint line by line so newlines never carry color into the prompt.
        let painted = text
            .split_inclusive('\n')
            .map(|line| match line.strip_suffix('\n') {
                Some(body) => format!("{}\n", self.highlighter.paint(self.style, body)),
                None => self.highlighter.paint(self.style, line),
            })
            .collect::<String>();
        self.emit(&painted);
    }

    fn clear_screen(&mut self) {
        if !self.screen_control {
            return;
        }
        self.emit("\x1B[2J\x1B[1;1H");
    }

    fn set_title(&mut self, title: &str) {
        if !self.screen_control {
            return;
        }
        self.emit(&format!("\x1B]0;{}\x07", title));
    }
}

/// Records everything written, tagged with the style active at the time.
#[derive(Debug, Default)]
pub struct Transcript {
    pub entries: Vec<(StyleKind, String)>,
    pub clears: usize,
    pub title: Option<String>,
    style: StyleKind,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.entries.iter().map(|(_, text)| text.as_str()).collect()
    }

    pub fn styled(&self, kind: StyleKind) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(style, _)| *style == kind)
            .map(|(_, text)| text.as_str())
            .collect()
    }
}

impl Presenter for Transcript {
    fn set_style(&mut self, kind: StyleKind) {
        self.style = kind;
    }

    fn write(&mut self, text: &str) {
        self.entries.push((self.style, text.to_string()));
    }

    fn clear_screen(&mut self) {
        self.clears += 1;
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }
}
