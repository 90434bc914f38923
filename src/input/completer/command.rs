use rustyline::completion::Pair;

use crate::core::commands::CommandKind;

#[derive(Clone, Default)]
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self
    }

    pub fn is_command(&self, word: &str) -> bool {
        CommandKind::from_name(word).is_some()
    }

    pub fn complete_command(&self, line: &str) -> Vec<Pair> {
        let input = line.trim();

        CommandKind::ALL
            .iter()
            .map(|kind| kind.name())
            .filter(|name| name.starts_with(input))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: format!("{} ", name),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn displays(pairs: Vec<Pair>) -> Vec<String> {
        pairs.into_iter().map(|p| p.display).collect()
    }

    #[test]
    fn test_prefix_matches() {
        let completer = CommandCompleter::new();
        assert_eq!(
            displays(completer.complete_command("mk")),
            vec!["mkdir".to_string(), "mkfile".to_string()]
        );
        assert_eq!(displays(completer.complete_command("zz")), Vec::<String>::new());
        assert_eq!(completer.complete_command("").len(), CommandKind::ALL.len());
    }

    #[test]
    fn test_is_command() {
        let completer = CommandCompleter::new();
        assert!(completer.is_command("openfe"));
        assert!(!completer.is_command("open"));
    }
}
