pub mod collection;
pub mod workspace;

use std::path::PathBuf;

/// Base directory for everything quiver persists: workspaces, collections
/// and the request history database.
pub fn app_data_dir() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("quiver")
}
