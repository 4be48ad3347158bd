pub mod filter;
pub mod input;
pub mod tree;
pub mod viewport;

use crate::history::query::HistoryQuery;
use crate::history::store::{HistoryEntry, HistoryStore, QueryOptions, StatusRange};
use crate::state::collection::{Collection, CollectionRequest, CollectionSocket, Folder};
use crate::state::request_state::HttpMethod;

use tree::{ExpansionState, TreeItem, flatten};
use viewport::Viewport;

/// Which list the sidebar is currently browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarMode {
    #[default]
    Collections,
    History,
}

/// Free-text filter state for one mode. `editing` distinguishes "the query
/// is being typed" from "the query is applied".
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    pub editing: bool,
    pub query: String,
}

/// Outgoing message produced by a key press. The caller dispatches it;
/// nothing inside the sidebar performs the effect.
#[derive(Debug, Clone)]
pub enum SidebarMsg {
    OpenRequest(CollectionRequest),
    OpenSocket(CollectionSocket),
    OpenHistoryEntry(HistoryEntry),
}

/// All sidebar navigator state: the collection tree with its expansion
/// flags, the history view with its filters, and one cursor/offset pair per
/// mode. One instance per app, owned exclusively by the update loop.
#[derive(Debug)]
pub struct SidebarState {
    focused: bool,
    mode: SidebarMode,
    chord_pending: bool,
    view_height: usize,

    collections: Vec<Collection>,
    expansion: ExpansionState,
    items: Vec<TreeItem>,
    /// `None` while no query is set — the unfiltered `items` are served
    /// directly, no copy made.
    filtered: Option<Vec<TreeItem>>,
    tree_view: Viewport,
    tree_search: SearchInput,

    history: HistoryQuery,
    history_view: Viewport,
    history_search: SearchInput,
    method_filter: Option<HttpMethod>,
    status_filter: Option<StatusRange>,
}

impl SidebarState {
    pub fn new(collections: Vec<Collection>) -> Self {
        let mut state = Self {
            focused: true,
            mode: SidebarMode::default(),
            chord_pending: false,
            view_height: 20,
            collections,
            expansion: ExpansionState::default(),
            items: Vec::new(),
            filtered: None,
            tree_view: Viewport::default(),
            tree_search: SearchInput::default(),
            history: HistoryQuery::default(),
            history_view: Viewport::default(),
            history_search: SearchInput::default(),
            method_filter: None,
            status_filter: None,
        };
        state.rebuild();
        state
    }

    // ── Read accessors ───────────────────────────────────────────────

    pub fn mode(&self) -> SidebarMode {
        self.mode
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// The display list for collections mode: filtered when a query is set,
    /// the full flattened tree otherwise.
    pub fn visible_items(&self) -> &[TreeItem] {
        self.filtered.as_deref().unwrap_or(&self.items)
    }

    pub fn selected_item(&self) -> Option<&TreeItem> {
        self.visible_items().get(self.tree_view.cursor)
    }

    pub fn history_entries(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn history_stale(&self) -> bool {
        self.history.is_stale()
    }

    pub fn tree_viewport(&self) -> Viewport {
        self.tree_view
    }

    pub fn history_viewport(&self) -> Viewport {
        self.history_view
    }

    /// The current mode's search state.
    pub fn search_input(&self) -> &SearchInput {
        match self.mode {
            SidebarMode::Collections => &self.tree_search,
            SidebarMode::History => &self.history_search,
        }
    }

    pub fn search_editing(&self) -> bool {
        self.search_input().editing
    }

    pub fn method_filter(&self) -> Option<&HttpMethod> {
        self.method_filter.as_ref()
    }

    pub fn status_filter(&self) -> Option<StatusRange> {
        self.status_filter
    }

    // ── Focus / geometry notifications ───────────────────────────────

    /// Focus changes are the only input accepted while unfocused. Losing
    /// focus disarms a half-typed chord so it cannot fire later.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.chord_pending = false;
        }
    }

    pub fn set_view_height(&mut self, height: usize) {
        self.view_height = height.max(1);
        let tree_len = self.visible_len();
        self.tree_view.clamp(tree_len, self.view_height);
        self.history_view.clamp(self.history.len(), self.view_height);
    }

    // ── Collection data ──────────────────────────────────────────────

    /// Replace the collection set wholesale and re-derive the display list.
    /// Expansion flags are ID-keyed, so subtrees that still exist stay open.
    pub fn set_collections(&mut self, collections: Vec<Collection>) {
        self.collections = collections;
        self.rebuild();
    }

    /// Append `request` to the collection under the cursor (or the first
    /// one), creating a default collection when none exist, and expand the
    /// target so the new row is visible. A request with a blank id or name
    /// is rejected without any state change.
    pub fn add_request(&mut self, request: CollectionRequest) -> bool {
        if request.id.is_empty() || request.name.is_empty() {
            return false;
        }
        if self.collections.is_empty() {
            self.collections.push(Collection::new("New Collection"));
        }
        let request_id = request.id.clone();
        let target = self.target_collection_idx();
        let col = &mut self.collections[target];
        col.requests.push(request);
        let id = col.id.clone();
        self.expansion.expand(id);
        self.rebuild();
        // Land the cursor on the row that was just added.
        if let Some(pos) = self.visible_items().iter().position(|i| i.id == request_id) {
            self.select(pos);
        }
        true
    }

    fn target_collection_idx(&self) -> usize {
        let Some(item) = self.selected_item() else {
            return 0;
        };
        self.collections
            .iter()
            .position(|col| collection_contains(col, &item.id))
            .unwrap_or(0)
    }

    // ── Explicit row operations ──────────────────────────────────────
    //
    // All of these treat an out-of-range index as a silent no-op.

    pub fn select(&mut self, index: usize) {
        match self.mode {
            SidebarMode::Collections => {
                if index < self.visible_len() {
                    self.tree_view.cursor = index;
                    self.tree_view.clamp(self.visible_len(), self.view_height);
                }
            }
            SidebarMode::History => {
                if index < self.history.len() {
                    self.history_view.cursor = index;
                    self.history_view.clamp(self.history.len(), self.view_height);
                }
            }
        }
    }

    pub fn toggle_at(&mut self, index: usize) {
        let Some(item) = self.visible_items().get(index) else {
            return;
        };
        if !item.expandable {
            return;
        }
        let id = item.id.clone();
        self.expansion.toggle(&id);
        self.rebuild();
    }

    pub fn expand_at(&mut self, index: usize) {
        let Some(item) = self.visible_items().get(index) else {
            return;
        };
        if !item.expandable || item.expanded {
            return;
        }
        let id = item.id.clone();
        self.expansion.expand(id);
        self.rebuild();
    }

    pub fn collapse_at(&mut self, index: usize) {
        let Some(item) = self.visible_items().get(index) else {
            return;
        };
        if !item.expandable || !item.expanded {
            return;
        }
        let id = item.id.clone();
        self.expansion.collapse(&id);
        self.rebuild();
    }

    // ── Derived list maintenance ─────────────────────────────────────

    pub(crate) fn rebuild(&mut self) {
        self.items = flatten(&self.collections, &self.expansion);
        self.refilter();
    }

    pub(crate) fn refilter(&mut self) {
        self.filtered = if self.tree_search.query.is_empty() {
            None
        } else {
            Some(filter::apply(&self.items, &self.tree_search.query))
        };
        let len = self.visible_len();
        self.tree_view.clamp(len, self.view_height);
    }

    pub(crate) fn visible_len(&self) -> usize {
        self.filtered.as_ref().map_or(self.items.len(), Vec::len)
    }

    // ── History plumbing ─────────────────────────────────────────────

    fn query_options(&self) -> QueryOptions {
        QueryOptions {
            method: self.method_filter.as_ref().map(|m| m.as_str().to_string()),
            status_range: self.status_filter,
            ..QueryOptions::default()
        }
    }

    /// Re-run the history query with the current search text and filters.
    pub fn refresh_history(&mut self, store: &dyn HistoryStore) {
        let opts = self.query_options();
        self.history.refresh(store, &self.history_search.query, &opts);
        self.history_view.clamp(self.history.len(), self.view_height);
    }

    /// Flip between collections and history. Entering history issues a
    /// query; each mode's cursor and offset stay exactly where they were.
    pub fn toggle_mode(&mut self, store: &dyn HistoryStore) {
        self.mode = match self.mode {
            SidebarMode::Collections => {
                self.refresh_history(store);
                SidebarMode::History
            }
            SidebarMode::History => SidebarMode::Collections,
        };
    }
}

fn collection_contains(col: &Collection, id: &str) -> bool {
    col.id == id
        || col.requests.iter().any(|r| r.id == id)
        || col.sockets.iter().any(|s| s.id == id)
        || col.folders.iter().any(|f| folder_contains(f, id))
}

fn folder_contains(folder: &Folder, id: &str) -> bool {
    folder.id == id
        || folder.requests.iter().any(|r| r.id == id)
        || folder.sockets.iter().any(|s| s.id == id)
        || folder.folders.iter().any(|f| folder_contains(f, id))
}
