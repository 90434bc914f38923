use std::io::{self, Write};
use std::path::Path;

use walkdir::WalkDir;

const INDENT: &str = "  ";
const BRANCH: &str = "|-- ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeSummary {
    pub entries: usize,
    pub skipped: usize,
}

/// Streams the structure below `root` into `sink`, one entry per line.
///
/// Entries directly under `root` are written bare. Each deeper level adds
/// two spaces of indentation and the `|-- ` marker. Directories that cannot
/// be read are skipped and counted. An entry whose path equals `exclude` is
/// left out along with anything below it.
pub fn export<W: Write>(
    root: &Path,
    exclude: Option<&Path>,
    mut sink: W,
) -> io::Result<TreeSummary> {
    let mut summary = TreeSummary::default();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| Some(entry.path()) != exclude);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(
                    path = %err.path().map(|p| p.display().to_string()).unwrap_or_default(),
                    error = %err,
                    "skipping unreadable subtree"
                );
                summary.skipped += 1;
                continue;
            }
        };

        let depth = entry.depth();
        let (indent, prefix) = if depth > 1 {
            (INDENT.repeat(depth - 1), BRANCH)
        } else {
            (String::new(), "")
        };
        writeln!(
            sink,
            "{}{}{}",
            indent,
            prefix,
            entry.file_name().to_string_lossy()
        )?;
        summary.entries += 1;
    }

    sink.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn render(root: &Path) -> io::Result<(String, TreeSummary)> {
        let mut out = Vec::new();
        let summary = export(root, None, &mut out)?;
        Ok((String::from_utf8_lossy(&out).into_owned(), summary))
    }

    #[test]
    fn test_single_nested_file() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("sub"))?;
        fs::write(dir.path().join("sub").join("x.txt"), "")?;

        let (text, summary) = render(dir.path())?;
        assert_eq!(text, "sub\n  |-- x.txt\n");
        assert_eq!(summary, TreeSummary { entries: 2, skipped: 0 });
        Ok(())
    }

    #[test]
    fn test_deeper_levels_indent_further() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join("a").join("b"))?;
        fs::write(dir.path().join("a").join("b").join("c.txt"), "")?;

        let (text, _) = render(dir.path())?;
        assert_eq!(text, "a\n  |-- b\n    |-- c.txt\n");
        Ok(())
    }

    #[test]
    fn test_files_are_not_descended() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("one.txt"), "")?;
        fs::write(dir.path().join("two.txt"), "")?;

        let (text, summary) = render(dir.path())?;
        let mut lines: Vec<&str> = text.lines().collect();
        lines.sort_unstable();
        assert_eq!(lines, vec!["one.txt", "two.txt"]);
        assert_eq!(summary.entries, 2);
        Ok(())
    }

    #[test]
    fn test_empty_root() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let (text, summary) = render(dir.path())?;
        assert!(text.is_empty());
        assert_eq!(summary, TreeSummary::default());
        Ok(())
    }

    #[test]
    fn test_excluded_entry_is_left_out() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join("keep").join("skip"))?;
        fs::write(dir.path().join("keep").join("skip").join("deep.txt"), "")?;
        fs::write(dir.path().join("out.txt"), "")?;

        let mut out = Vec::new();
        let excluded = dir.path().join("keep").join("skip");
        let summary = export(dir.path(), Some(&excluded), &mut out)?;
        let mut lines: Vec<String> = String::from_utf8_lossy(&out)
            .lines()
            .map(str::to_string)
            .collect();
        lines.sort_unstable();
        assert_eq!(lines, vec!["keep", "out.txt"]);
        assert_eq!(summary.entries, 2);
        Ok(())
    }

    #[test]
    fn test_unreadable_root_is_counted() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let (text, summary) = render(&dir.path().join("gone"))?;
        assert!(text.is_empty());
        assert_eq!(summary, TreeSummary { entries: 0, skipped: 1 });
        Ok(())
    }
}
