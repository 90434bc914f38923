use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Access levels accepted by `permit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionLevel {
    Read,
    Write,
    Modify,
    /// Anything else; applied as a no-op write-back of the current attributes.
    Other(String),
}

impl PermissionLevel {
    pub fn parse(token: &str) -> Self {
        match token {
            "read" => PermissionLevel::Read,
            "write" => PermissionLevel::Write,
            "modify" => PermissionLevel::Modify,
            other => PermissionLevel::Other(other.to_string()),
        }
    }

    /// `Some(true)` to make the target read-only, `Some(false)` to make it
    /// writable, `None` to leave it as is.
    ///
    /// `Modify` maps to the same request as `Write`.
    pub fn read_only(&self) -> Option<bool> {
        match self {
            PermissionLevel::Read => Some(true),
            PermissionLevel::Write | PermissionLevel::Modify => Some(false),
            PermissionLevel::Other(_) => None,
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionLevel::Read => write!(f, "read"),
            PermissionLevel::Write => write!(f, "write"),
            PermissionLevel::Modify => write!(f, "modify"),
            PermissionLevel::Other(token) => write!(f, "{}", token),
        }
    }
}

/// Applies a [`PermissionLevel`] to a path on the host platform.
pub trait AccessControl {
    fn apply(&self, path: &Path, level: &PermissionLevel) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeAccess;

impl AccessControl for NativeAccess {
    fn apply(&self, path: &Path, level: &PermissionLevel) -> io::Result<()> {
        let mut permissions = fs::metadata(path)?.permissions();
        if let Some(read_only) = level.read_only() {
            set_read_only(&mut permissions, read_only);
        }
        fs::set_permissions(path, permissions)
    }
}

#[cfg(unix)]
fn set_read_only(permissions: &mut fs::Permissions, read_only: bool) {
    use std::os::unix::fs::PermissionsExt;

    let mode = permissions.mode();
    let mode = if read_only { mode & !0o222 } else { mode | 0o200 };
    permissions.set_mode(mode);
}

#[cfg(not(unix))]
fn set_read_only(permissions: &mut fs::Permissions, read_only: bool) {
    permissions.set_readonly(read_only);
}
