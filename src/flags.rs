use crate::error::ShellError;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: HashMap<String, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: String,
    pub long: String,
    pub description: String,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = HashMap::new();

        let mut add = |name: &str, short: &str, long: &str, description: &str, takes_value| {
            flags.insert(
                name.to_string(),
                Flag {
                    short: short.to_string(),
                    long: long.to_string(),
                    description: description.to_string(),
                    takes_value,
                    value: None,
                },
            );
        };

        add("help", "-h", "--help", "Print this help message", false);
        add("version", "-v", "--version", "Show version information", false);
        add("quiet", "-q", "--quiet", "Start without the banner", false);
        add("debug", "-d", "--debug", "Enable debug logging", false);
        add(
            "history",
            "-H",
            "--history",
            "Use <file> for line history (default ~/.fileman_history)",
            true,
        );

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];

            let flag = self
                .flags
                .values_mut()
                .find(|flag| arg == &flag.short || arg == &flag.long)
                .ok_or_else(|| ShellError::FlagError(format!("Unknown option {}", arg)))?;

            if flag.takes_value {
                let value = args.get(i + 1).ok_or_else(|| {
                    ShellError::FlagError(format!("Flag {} requires a value", arg))
                })?;
                flag.value = Some(value.clone());
                i += 1;
            } else {
                flag.value = Some("true".to_string());
            }
            i += 1;
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_ref())
            .is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    /// Where line history is persisted, if anywhere.
    pub fn history_file(&self) -> Option<PathBuf> {
        match self.get_value("history") {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::home_dir().map(|home| home.join(".fileman_history")),
        }
    }

    pub fn print_help(&self) {
        println!("Usage: fileman [OPTIONS]");
        println!("\nOptions:");
        let mut flags: Vec<&Flag> = self.flags.values().collect();
        flags.sort_by(|a, b| a.long.cmp(&b.long));
        for flag in flags {
            let long = if flag.takes_value {
                format!("{} <file>", flag.long)
            } else {
                flag.long.clone()
            };
            println!("  {}, {:<18} {}", flag.short, long, flag.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_short_and_long_flags() -> Result<(), ShellError> {
        let mut flags = Flags::new();
        flags.parse(&args(&["-q", "--debug"]))?;

        assert!(flags.is_set("quiet"));
        assert!(flags.is_set("debug"));
        assert!(!flags.is_set("help"));
        Ok(())
    }

    #[test]
    fn test_history_value() -> Result<(), ShellError> {
        let mut flags = Flags::new();
        flags.parse(&args(&["--history", "/tmp/fm_history"]))?;

        assert_eq!(flags.history_file(), Some(PathBuf::from("/tmp/fm_history")));
        Ok(())
    }

    #[test]
    fn test_history_requires_value() {
        let mut flags = Flags::new();
        assert!(matches!(
            flags.parse(&args(&["-H"])),
            Err(ShellError::FlagError(_))
        ));
    }

    #[test]
    fn test_unknown_flag() {
        let mut flags = Flags::new();
        assert!(matches!(
            flags.parse(&args(&["--frobnicate"])),
            Err(ShellError::FlagError(_))
        ));
    }
}
