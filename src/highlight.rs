use inksac::prelude::*;

/// Visual styles the file manager renders text in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleKind {
    #[default]
    Default,
    Success,
    Error,
    Path,
    Heading,
}

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    /// A highlighter that never emits escape sequences.
    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self.color_support, ColorSupport::NoColor)
    }

    pub fn paint(&self, kind: StyleKind, text: &str) -> String {
        if self.is_plain() || text.is_empty() {
            return text.to_string();
        }

        let style = match kind {
            StyleKind::Default => return text.to_string(),
            StyleKind::Success => Style::builder().foreground(Color::Green).build(),
            StyleKind::Error => Style::builder().foreground(Color::Red).bold().build(),
            StyleKind::Path => Style::builder().foreground(Color::Cyan).build(),
            StyleKind::Heading => Style::builder().foreground(Color::Yellow).bold().build(),
        };

        text.style(style).to_string()
    }

    /// Colors the command word of an input line in place, leaving the
    /// surrounding whitespace untouched so the cursor stays aligned.
    pub fn highlight_command(&self, input: &str, is_known: impl Fn(&str) -> bool) -> String {
        if self.is_plain() {
            return input.to_string();
        }

        let start = input.len() - input.trim_start().len();
        let end = input[start..]
            .find(char::is_whitespace)
            .map_or(input.len(), |pos| start + pos);
        let word = &input[start..end];
        if word.is_empty() {
            return input.to_string();
        }

        let style = if is_known(word) {
            Style::builder().foreground(Color::Cyan).bold().build()
        } else {
            Style::builder().foreground(Color::Red).build()
        };

        format!(
            "{}{}{}",
            &input[..start],
            word.style(style),
            &input[end..]
        )
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if self.is_plain() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();

        hint.style(hint_style).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paint_is_identity() {
        let highlighter = SyntaxHighlighter::plain();
        for kind in [
            StyleKind::Default,
            StyleKind::Success,
            StyleKind::Error,
            StyleKind::Path,
            StyleKind::Heading,
        ] {
            assert_eq!(highlighter.paint(kind, "hello"), "hello");
        }
    }

    #[test]
    fn test_plain_command_highlight_keeps_spacing() {
        let highlighter = SyntaxHighlighter::plain();
        let line = "  mkdir   docs ";
        assert_eq!(highlighter.highlight_command(line, |_| true), line);
    }
}
