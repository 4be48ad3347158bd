use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Persisted workspace metadata (saved to `workspace.toml`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkspaceFile {
    pub name: String,
}

fn workspaces_dir() -> PathBuf {
    super::app_data_dir().join("workspaces")
}

/// Load the `workspace.toml` for `name`. Returns a default `WorkspaceFile`
/// on any error.
pub fn load_workspace(name: &str) -> WorkspaceFile {
    let path = workspaces_dir().join(name).join("workspace.toml");
    if let Ok(content) = std::fs::read_to_string(&path) {
        if let Ok(ws) = toml::from_str::<WorkspaceFile>(&content) {
            return ws;
        }
    }
    WorkspaceFile { name: name.to_string() }
}

/// Persist the workspace file to disk, creating the directory if needed.
pub fn save_workspace(ws: &WorkspaceFile) -> anyhow::Result<()> {
    let dir = workspaces_dir().join(&ws.name);
    std::fs::create_dir_all(&dir)?;
    let content = toml::to_string_pretty(ws)?;
    std::fs::write(dir.join("workspace.toml"), content)?;
    Ok(())
}
