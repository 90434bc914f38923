use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Launches the desktop's graphical file browser.
#[derive(Debug, Clone)]
pub struct FileBrowser {
    program: String,
}

impl Default for FileBrowser {
    fn default() -> Self {
        let program = if cfg!(target_os = "windows") {
            "explorer"
        } else if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };
        Self::with_program(program)
    }
}

impl FileBrowser {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Launches the browser on `path` and reaps the launcher.
    ///
    /// `xdg-open`, `open` and `explorer` hand the window off and exit right
    /// away, so waiting here does not block the prompt. A non-zero exit is
    /// only logged: `explorer` reports 1 even when the window opened.
    pub fn open(&self, path: &Path) -> io::Result<()> {
        let mut child = Command::new(&self.program)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        let pid = child.id();
        let status = child.wait()?;
        if status.success() {
            tracing::debug!(program = %self.program, pid, "file browser launched");
        } else {
            tracing::warn!(
                program = %self.program,
                pid,
                %status,
                "file browser launcher exited with failure"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_fails() {
        let browser = FileBrowser::with_program("fileman-no-such-browser");
        assert!(browser.open(Path::new(".")).is_err());
    }

    /// Children of this process left in the zombie state.
    #[cfg(target_os = "linux")]
    fn zombie_children() -> usize {
        let me = std::process::id().to_string();
        let Ok(procs) = std::fs::read_dir("/proc") else {
            return 0;
        };
        procs
            .flatten()
            .filter_map(|entry| std::fs::read_to_string(entry.path().join("stat")).ok())
            .filter(|stat| {
                // Fields after the parenthesised command name: state, ppid, ...
                let Some((_, rest)) = stat.rsplit_once(')') else {
                    return false;
                };
                let mut fields = rest.split_whitespace();
                fields.next() == Some("Z") && fields.next() == Some(me.as_str())
            })
            .count()
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_launcher_is_reaped() {
        let browser = FileBrowser::with_program("true");
        assert!(browser.open(Path::new(".")).is_ok());
        std::thread::sleep(std::time::Duration::from_millis(300));
        assert_eq!(zombie_children(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_launcher_is_not_an_error() {
        let browser = FileBrowser::with_program("false");
        assert!(browser.open(Path::new(".")).is_ok());
    }
}
