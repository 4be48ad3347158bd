use std::path::{Path, PathBuf};

use crate::state::collection::{Collection, CollectionRequest, CollectionSocket, Folder};

fn collections_dir(ws_name: &str) -> PathBuf {
    super::app_data_dir()
        .join("workspaces")
        .join(ws_name)
        .join("collections")
}

/// Load all collections from a workspace's collections directory.
pub fn load_all_collections(ws_name: &str) -> Vec<Collection> {
    load_from_dir(&collections_dir(ws_name))
}

fn load_from_dir(dir: &Path) -> Vec<Collection> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut collections = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path().join("collection.toml");
        if let Ok(content) = std::fs::read_to_string(&path) {
            match toml::from_str::<Collection>(&content) {
                Ok(col) => collections.push(col),
                Err(err) => log::warn!("skipping unreadable collection {}: {err}", path.display()),
            }
        }
    }
    collections.sort_by(|a, b| a.name.cmp(&b.name));
    collections
}

/// Save a collection to `<ws>/collections/<slug>/collection.toml`.
pub fn save_collection(ws_name: &str, col: &Collection) -> anyhow::Result<()> {
    save_to_dir(&collections_dir(ws_name), col)
}

fn save_to_dir(dir: &Path, col: &Collection) -> anyhow::Result<()> {
    let slug = col.name.to_lowercase().replace(' ', "_");
    let dir = dir.join(&slug);
    std::fs::create_dir_all(&dir)?;
    let content = toml::to_string_pretty(col)?;
    std::fs::write(dir.join("collection.toml"), content)?;
    Ok(())
}

/// Save every collection, logging failures instead of aborting the batch.
pub fn save_all_collections(ws_name: &str, collections: &[Collection]) {
    for col in collections {
        if let Err(err) = save_collection(ws_name, col) {
            log::warn!("failed to save collection '{}': {err}", col.name);
        }
    }
}

/// Starter content written on first run so the sidebar has something to
/// show before the user saves anything.
pub fn seed_collections() -> Vec<Collection> {
    let mut users = Folder::new("users");
    users.requests.push(CollectionRequest::new(
        "list-users",
        "GET",
        "https://jsonplaceholder.typicode.com/users",
    ));
    users.requests.push(CollectionRequest::new(
        "create-user",
        "POST",
        "https://jsonplaceholder.typicode.com/users",
    ));

    let mut demo = Collection::new("Demo APIs");
    demo.folders.push(users);
    demo.requests.push(CollectionRequest::new(
        "health",
        "GET",
        "https://jsonplaceholder.typicode.com/todos/1",
    ));
    demo.sockets
        .push(CollectionSocket::new("echo", "wss://echo.websocket.org"));
    vec![demo]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let collections = seed_collections();
        save_to_dir(tmp.path(), &collections[0]).unwrap();

        let loaded = load_from_dir(tmp.path());
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Demo APIs");
        assert_eq!(loaded[0].folders.len(), 1);
        assert_eq!(loaded[0].folders[0].requests.len(), 2);
        assert_eq!(loaded[0].sockets.len(), 1);
        assert_eq!(loaded[0].id, collections[0].id);
    }

    #[test]
    fn test_load_missing_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let loaded = load_from_dir(&tmp.path().join("does-not-exist"));
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_skips_garbage_files() {
        let tmp = tempfile::tempdir().unwrap();
        let bad = tmp.path().join("broken");
        std::fs::create_dir_all(&bad).unwrap();
        std::fs::write(bad.join("collection.toml"), "not [valid toml").unwrap();

        save_to_dir(tmp.path(), &Collection::new("Good")).unwrap();
        let loaded = load_from_dir(tmp.path());
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Good");
    }

    #[test]
    fn test_loaded_collections_sorted_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        save_to_dir(tmp.path(), &Collection::new("zeta")).unwrap();
        save_to_dir(tmp.path(), &Collection::new("alpha")).unwrap();

        let loaded = load_from_dir(tmp.path());
        let names: Vec<&str> = loaded.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
