use std::collections::HashMap;

use crate::state::collection::{Collection, CollectionRequest, CollectionSocket, Folder};

/// Open/closed flags for tree nodes.
///
/// Keyed by stable node ID rather than display position, so the flags
/// survive re-flattening after the collection data changes underneath.
/// Absent means collapsed.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    open: HashMap<String, bool>,
}

impl ExpansionState {
    pub fn is_expanded(&self, id: &str) -> bool {
        self.open.get(id).copied().unwrap_or(false)
    }

    pub fn expand(&mut self, id: impl Into<String>) {
        self.open.insert(id.into(), true);
    }

    pub fn collapse(&mut self, id: &str) {
        self.open.insert(id.to_string(), false);
    }

    pub fn toggle(&mut self, id: &str) {
        let flag = self.open.entry(id.to_string()).or_insert(false);
        *flag = !*flag;
    }
}

/// Which domain object a display row stands for. Leaf rows carry the
/// object itself so selecting one can hand it straight to the caller;
/// container rows are resolved through their stable ID.
#[derive(Debug, Clone)]
pub enum TreeItemKind {
    Collection,
    Folder,
    Request(CollectionRequest),
    Socket(CollectionSocket),
}

/// One render-ready row of the collections tree. Rows are recomputed from
/// the domain data on every structural change, never mutated in place.
#[derive(Debug, Clone)]
pub struct TreeItem {
    pub id: String,
    pub name: String,
    pub level: usize,
    pub expandable: bool,
    pub expanded: bool,
    pub kind: TreeItemKind,
}

/// Flatten the collection forest into its display order.
///
/// Depth-first pre-order: a node's children follow immediately after it,
/// and only when that node's ID is marked expanded — collapsed subtrees
/// are never visited, so the cost tracks visible rows, not total nodes.
/// Child order within a node is folders, then requests, then sockets.
pub fn flatten(collections: &[Collection], expansion: &ExpansionState) -> Vec<TreeItem> {
    let mut out = Vec::new();
    for col in collections {
        let expanded = expansion.is_expanded(&col.id);
        out.push(TreeItem {
            id: col.id.clone(),
            name: col.name.clone(),
            level: 0,
            expandable: col.has_children(),
            expanded,
            kind: TreeItemKind::Collection,
        });
        if expanded {
            flatten_children(&col.folders, &col.requests, &col.sockets, 1, expansion, &mut out);
        }
    }
    out
}

fn flatten_children(
    folders: &[Folder],
    requests: &[CollectionRequest],
    sockets: &[CollectionSocket],
    level: usize,
    expansion: &ExpansionState,
    out: &mut Vec<TreeItem>,
) {
    for folder in folders {
        let expanded = expansion.is_expanded(&folder.id);
        out.push(TreeItem {
            id: folder.id.clone(),
            name: folder.name.clone(),
            level,
            expandable: folder.has_children(),
            expanded,
            kind: TreeItemKind::Folder,
        });
        if expanded {
            flatten_children(
                &folder.folders,
                &folder.requests,
                &folder.sockets,
                level + 1,
                expansion,
                out,
            );
        }
    }
    for req in requests {
        out.push(TreeItem {
            id: req.id.clone(),
            name: req.name.clone(),
            level,
            expandable: false,
            expanded: false,
            kind: TreeItemKind::Request(req.clone()),
        });
    }
    for sock in sockets {
        out.push(TreeItem {
            id: sock.id.clone(),
            name: sock.name.clone(),
            level,
            expandable: false,
            expanded: false,
            kind: TreeItemKind::Socket(sock.clone()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> CollectionRequest {
        CollectionRequest::new(name, "GET", "https://example.com")
    }

    /// One collection holding a folder (with one request) and a direct
    /// request at the collection root.
    fn sample() -> Vec<Collection> {
        let mut folder = Folder::new("users");
        folder.requests.push(request("get-user"));
        let mut col = Collection::new("API");
        col.folders.push(folder);
        col.requests.push(request("health"));
        vec![col]
    }

    #[test]
    fn test_collapsed_shows_roots_only() {
        let collections = sample();
        let items = flatten(&collections, &ExpansionState::default());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "API");
        assert!(items[0].expandable);
        assert!(!items[0].expanded);
    }

    #[test]
    fn test_expand_reveals_one_level() {
        let collections = sample();
        let mut expansion = ExpansionState::default();
        expansion.expand(collections[0].id.clone());

        let items = flatten(&collections, &expansion);
        // Collection, its folder, its direct request — the folder's own
        // request stays hidden until the folder is expanded too.
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].name, "users");
        assert_eq!(items[1].level, 1);
        assert_eq!(items[2].name, "health");

        expansion.expand(collections[0].folders[0].id.clone());
        let items = flatten(&collections, &expansion);
        assert_eq!(items.len(), 4);
        assert_eq!(items[2].name, "get-user");
        assert_eq!(items[2].level, 2);
    }

    #[test]
    fn test_preorder_folders_before_requests() {
        let mut col = Collection::new("API");
        col.requests.push(request("zzz-first-added"));
        col.folders.push(Folder::new("aaa-folder"));
        let mut expansion = ExpansionState::default();
        expansion.expand(col.id.clone());

        let items = flatten(&[col], &expansion);
        assert_eq!(items[1].name, "aaa-folder");
        assert_eq!(items[2].name, "zzz-first-added");
    }

    #[test]
    fn test_leaves_never_expandable() {
        let mut col = Collection::new("API");
        col.requests.push(request("r"));
        col.sockets.push(CollectionSocket::new("live", "wss://example.com"));
        let mut expansion = ExpansionState::default();
        expansion.expand(col.id.clone());

        let items = flatten(&[col], &expansion);
        assert!(!items[1].expandable);
        assert!(!items[2].expandable);
    }

    #[test]
    fn test_expand_collapse_idempotent() {
        let collections = sample();
        let before = flatten(&collections, &ExpansionState::default());

        let mut expansion = ExpansionState::default();
        expansion.toggle(&collections[0].id);
        expansion.toggle(&collections[0].id);
        let after = flatten(&collections, &expansion);

        let ids = |items: &[TreeItem]| items.iter().map(|i| i.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&before), ids(&after));
    }

    #[test]
    fn test_expansion_survives_data_change() {
        let mut collections = sample();
        let mut expansion = ExpansionState::default();
        expansion.expand(collections[0].id.clone());

        collections[0].requests.push(request("new-request"));
        let items = flatten(&collections, &expansion);
        assert!(items[0].expanded);
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn test_childless_collection_not_expandable() {
        let col = Collection::new("Empty");
        let items = flatten(&[col], &ExpansionState::default());
        assert!(!items[0].expandable);
    }
}
