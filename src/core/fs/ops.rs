use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::browser::FileBrowser;
use super::permissions::{AccessControl, PermissionLevel};
use super::tree::{self, TreeSummary};
use crate::core::commands::CommandError;
use crate::core::state::ProcessState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub is_dir: bool,
}

impl ListEntry {
    pub fn display_line(&self) -> String {
        if self.is_dir {
            format!("{} [DIR]", self.name)
        } else {
            self.name.clone()
        }
    }
}

pub fn change_dir(state: &mut ProcessState, path: &Path) -> Result<(), CommandError> {
    let not_found = || {
        CommandError::NotFound(format!("Failed to change directory to: {}", path.display()))
    };

    let canonical = fs::canonicalize(path).map_err(|_| not_found())?;
    if !canonical.is_dir() {
        return Err(not_found());
    }

    debug!(from = %state.current_dir().display(), to = %canonical.display(), "cd");
    state.set_current_dir(canonical);
    Ok(())
}

pub fn create_file(path: &Path) -> Result<String, CommandError> {
    if path.is_file() {
        return Err(CommandError::AlreadyExists(
            "Failed to create file. The file with the same name already exists.".to_string(),
        ));
    }

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            CommandError::from_io(&e, format!("Failed to create file: {}", path.display()))
        })?;

    debug!(path = %path.display(), "file created");
    Ok(format!("Created file: {}", path.display()))
}

pub fn create_directory(path: &Path) -> Result<String, CommandError> {
    if path.is_dir() {
        return Err(CommandError::AlreadyExists(
            "Failed to create directory. The directory with the same name already exists."
                .to_string(),
        ));
    }

    fs::create_dir(path).map_err(|e| {
        CommandError::from_io(&e, format!("Failed to create directory: {}", path.display()))
    })?;

    debug!(path = %path.display(), "directory created");
    Ok(format!("Created directory: {}", path.display()))
}

pub fn rename(old: &Path, new: &Path) -> Result<String, CommandError> {
    let metadata = fs::symlink_metadata(old).map_err(|_| {
        CommandError::NotFound(format!(
            "The file or directory '{}' does not exist.",
            old.display()
        ))
    })?;

    if fs::symlink_metadata(new).is_ok() {
        return Err(CommandError::AlreadyExists(format!(
            "Failed to rename. The file or directory with the name '{}' already exists.",
            new.display()
        )));
    }

    let kind = if metadata.is_dir() { "directory" } else { "file" };
    fs::rename(old, new).map_err(|e| {
        CommandError::OperationFailed(format!(
            "Failed to rename {} '{}' to '{}': {}",
            kind,
            old.display(),
            new.display(),
            e
        ))
    })?;

    debug!(kind, from = %old.display(), to = %new.display(), "renamed");
    Ok(format!(
        "Renamed {} '{}' to '{}'",
        kind,
        old.display(),
        new.display()
    ))
}

/// Removes a file, or else an empty directory. Never recursive.
pub fn delete(path: &Path) -> Result<String, CommandError> {
    if fs::remove_file(path).is_ok() {
        debug!(path = %path.display(), "file deleted");
        return Ok(format!("Deleted file: {}", path.display()));
    }

    match fs::remove_dir(path) {
        Ok(()) => {
            debug!(path = %path.display(), "directory deleted");
            Ok(format!("Deleted directory: {}", path.display()))
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "delete refused");
            Err(CommandError::OperationFailed(format!(
                "Failed to delete file or directory: {}",
                path.display()
            )))
        }
    }
}

/// Moves `source` into `destination`, keeping its base name.
pub fn move_into(source: &Path, destination: &Path) -> Result<String, CommandError> {
    if !destination.is_dir() {
        return Err(CommandError::NotFound(format!(
            "Failed to move {} to {}. The destination directory does not exist.",
            source.display(),
            destination.display()
        )));
    }

    let name = source.file_name().ok_or_else(|| {
        CommandError::OperationFailed(format!(
            "Failed to move {}. It has no file name.",
            source.display()
        ))
    })?;
    let target: PathBuf = destination.join(name);

    if fs::symlink_metadata(&target).is_ok() {
        return Err(CommandError::AlreadyExists(format!(
            "Failed to move {} to {}. An entry with that name already exists.",
            source.display(),
            target.display()
        )));
    }

    fs::rename(source, &target).map_err(|e| {
        CommandError::from_io(
            &e,
            format!("Failed to move {} to {}", source.display(), target.display()),
        )
    })?;

    debug!(from = %source.display(), to = %target.display(), "moved");
    Ok(format!("Moved {} to {}", source.display(), target.display()))
}

pub fn list(directory: &Path) -> Result<Vec<ListEntry>, CommandError> {
    let failed = |e: &io::Error| {
        CommandError::from_io(
            e,
            format!(
                "Failed to list files and directories in {}",
                directory.display()
            ),
        )
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(directory).map_err(|e| failed(&e))? {
        let entry = entry.map_err(|e| failed(&e))?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push(ListEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }
    Ok(entries)
}

/// Writes the structure of `root` to a new file at `output`. The output file
/// itself is left out of the listing when it lands inside `root`.
pub fn export_tree(root: &Path, output: &Path) -> Result<String, CommandError> {
    let file = File::create(output).map_err(|e| {
        debug!(path = %output.display(), error = %e, "tree sink not created");
        CommandError::OperationFailed("Failed to create directory structure file.".to_string())
    })?;

    let root = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    let output = fs::canonicalize(output).ok();

    let summary = tree::export(&root, output.as_deref(), BufWriter::new(file)).map_err(|e| {
        CommandError::OperationFailed(format!(
            "Failed to write directory structure file: {}",
            e
        ))
    })?;

    debug!(
        root = %root.display(),
        entries = summary.entries,
        skipped = summary.skipped,
        "tree exported"
    );

    Ok(tree_message(&summary))
}

fn tree_message(summary: &TreeSummary) -> String {
    if summary.skipped > 0 {
        format!(
            "Directory structure file created successfully ({} unreadable directories skipped).",
            summary.skipped
        )
    } else {
        "Directory structure file created successfully.".to_string()
    }
}

pub fn set_permissions(
    access: &dyn AccessControl,
    path: &Path,
    level: &PermissionLevel,
) -> Result<String, CommandError> {
    if fs::symlink_metadata(path).is_err() {
        return Err(CommandError::NotFound(format!(
            "Failed to set permissions for {}. It does not exist.",
            path.display()
        )));
    }

    access.apply(path, level).map_err(|e| {
        debug!(path = %path.display(), %level, error = %e, "permissions refused");
        CommandError::OperationFailed(format!(
            "Failed to set permissions for {}",
            path.display()
        ))
    })?;

    debug!(path = %path.display(), %level, "permissions set");
    Ok(format!("Permissions set successfully for {}", path.display()))
}

pub fn open_in_browser(browser: &FileBrowser, path: &Path) -> Result<(), CommandError> {
    browser.open(path).map_err(|e| {
        debug!(program = browser.program(), error = %e, "file browser failed");
        CommandError::OperationFailed("Failed to open the file browser.".to_string())
    })
}
