use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// The only state carried between commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessState {
    current_dir: PathBuf,
}

impl ProcessState {
    /// Starts from the directory the process was launched in.
    pub fn from_env() -> io::Result<Self> {
        Ok(Self::with_dir(env::current_dir()?))
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: dir.into(),
        }
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub(crate) fn set_current_dir(&mut self, dir: PathBuf) {
        self.current_dir = dir;
    }
}
