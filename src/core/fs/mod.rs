//! File-system operations behind the file manager's commands.

pub mod browser;
pub mod ops;
pub mod permissions;
pub mod tree;

pub use browser::FileBrowser;
pub use ops::ListEntry;
pub use permissions::{AccessControl, NativeAccess, PermissionLevel};
pub use tree::TreeSummary;
