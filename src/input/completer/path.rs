use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

/// Completes path arguments against the file manager's current directory
/// rather than the process working directory.
#[derive(Clone)]
pub struct PathCompleter {
    base_dir: PathBuf,
}

impl PathCompleter {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn set_base_dir(&mut self, base_dir: PathBuf) {
        self.base_dir = base_dir;
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (typed_dir, file_prefix) = self.parse_path_input(incomplete);
        let search_dir = self.base_dir.join(&typed_dir);

        self.get_path_matches(&search_dir, &typed_dir, &file_prefix)
    }

    /// Splits the typed text into the directory part, exactly as typed, and
    /// the file-name prefix being completed.
    fn parse_path_input(&self, incomplete: &str) -> (String, String) {
        match incomplete.rfind('/') {
            Some(pos) => (
                incomplete[..=pos].to_string(),
                incomplete[pos + 1..].to_string(),
            ),
            None => (String::new(), incomplete.to_string()),
        }
    }

    fn get_path_matches(&self, search_dir: &Path, typed_dir: &str, file_prefix: &str) -> Vec<Pair> {
        let Ok(entries) = fs::read_dir(search_dir) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(file_prefix) {
                    return None;
                }
                let is_dir = entry.path().is_dir();
                Some(self.create_completion_pair(&name, typed_dir, is_dir))
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }

    fn create_completion_pair(&self, name: &str, typed_dir: &str, is_dir: bool) -> Pair {
        let completed = format!("{}{}", typed_dir, name);
        if is_dir {
            Pair {
                display: format!("{}/", name),
                replacement: format!("{}/", completed),
            }
        } else {
            Pair {
                display: name.to_string(),
                replacement: format!("{} ", completed),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacements(pairs: Vec<Pair>) -> Vec<String> {
        pairs.into_iter().map(|p| p.replacement).collect()
    }

    #[test]
    fn test_completes_relative_to_base() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("photos"))?;
        fs::write(dir.path().join("plan.txt"), "")?;
        fs::write(dir.path().join("readme"), "")?;

        let completer = PathCompleter::new(dir.path().to_path_buf());
        assert_eq!(
            replacements(completer.complete_path("p")),
            vec!["photos/".to_string(), "plan.txt ".to_string()]
        );
        Ok(())
    }

    #[test]
    fn test_completes_inside_typed_directory() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("sub"))?;
        fs::write(dir.path().join("sub").join("notes.md"), "")?;

        let mut completer = PathCompleter::new(PathBuf::from("/nonexistent"));
        assert!(completer.complete_path("sub/").is_empty());

        completer.set_base_dir(dir.path().to_path_buf());
        assert_eq!(
            replacements(completer.complete_path("sub/no")),
            vec!["sub/notes.md ".to_string()]
        );
        Ok(())
    }
}
