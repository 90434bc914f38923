use std::path::{Path, PathBuf};

use crate::core::state::ProcessState;

#[derive(Debug, Clone, Default)]
pub struct PathResolver;

impl PathResolver {
    pub fn new() -> Self {
        Self
    }

    /// Turns a user token into the path an operation acts on.
    ///
    /// Dot-relative and bare relative tokens are both anchored at the
    /// tracked current directory, so the process working directory is never
    /// consulted. No normalization or existence check happens here.
    pub fn resolve(&self, state: &ProcessState, token: &str) -> PathBuf {
        if token.is_empty() || token.starts_with('.') {
            return state.current_dir().join(token);
        }

        if token.starts_with('~') {
            if let Some(home) = self.expand_tilde(token) {
                return home;
            }
        }

        let path = Path::new(token);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            state.current_dir().join(path)
        }
    }

    fn expand_tilde(&self, token: &str) -> Option<PathBuf> {
        let rest = &token[1..];
        if rest.is_empty() {
            return dirs::home_dir();
        }

        // "~user/..." is left to the generic relative handling.
        let stripped = rest.strip_prefix('/')?;
        let mut home = dirs::home_dir()?;
        for part in stripped.split('/').filter(|part| !part.is_empty()) {
            home.push(part);
        }
        Some(home)
    }
}
