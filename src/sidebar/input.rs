use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::history::store::{HistoryStore, StatusRange};
use crate::state::request_state::HttpMethod;

use super::tree::TreeItemKind;
use super::{SearchInput, SidebarMode, SidebarMsg, SidebarState};

impl SidebarState {
    /// Route one key press through the modal state machine.
    ///
    /// Returns the outgoing message to dispatch when the key selected
    /// something; every other effect is a state mutation. While the sidebar
    /// is unfocused nothing at all is mutated — only focus and geometry
    /// notifications are accepted through their own methods.
    pub fn handle_key(&mut self, key: KeyEvent, store: &dyn HistoryStore) -> Option<SidebarMsg> {
        if !self.focused {
            return None;
        }

        if self.search_editing() {
            self.handle_search_key(key, store);
            return None;
        }

        // A pending jump-to-top chord either completes on the second `g` or
        // is disarmed, after which the interrupting key keeps its normal
        // meaning.
        if self.chord_pending {
            self.chord_pending = false;
            if key.code == KeyCode::Char('g') {
                self.current_view_mut().jump_top();
                return None;
            }
        } else if key.code == KeyCode::Char('g') {
            self.chord_pending = true;
            return None;
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_cursor(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_cursor(-1);
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                let len = self.current_len();
                let height = self.view_height;
                self.current_view_mut().jump_bottom(len, height);
                None
            }
            KeyCode::Home => {
                self.current_view_mut().jump_top();
                None
            }
            KeyCode::Char('/') => {
                self.enter_search(store);
                None
            }
            KeyCode::Char('v') => {
                self.toggle_mode(store);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            KeyCode::Esc => {
                self.cancel(store);
                None
            }
            _ => {
                match self.mode {
                    SidebarMode::Collections => self.handle_tree_key(key),
                    SidebarMode::History => self.handle_history_key(key, store),
                }
                None
            }
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.current_len();
        let height = self.view_height;
        self.current_view_mut().move_by(delta, len, height);
    }

    fn current_len(&self) -> usize {
        match self.mode {
            SidebarMode::Collections => self.visible_len(),
            SidebarMode::History => self.history.len(),
        }
    }

    fn current_view_mut(&mut self) -> &mut super::viewport::Viewport {
        match self.mode {
            SidebarMode::Collections => &mut self.tree_view,
            SidebarMode::History => &mut self.history_view,
        }
    }

    fn search_input_mut(&mut self) -> &mut SearchInput {
        match self.mode {
            SidebarMode::Collections => &mut self.tree_search,
            SidebarMode::History => &mut self.history_search,
        }
    }

    /// Start editing the current mode's query from scratch.
    fn enter_search(&mut self, store: &dyn HistoryStore) {
        let search = self.search_input_mut();
        search.editing = true;
        search.query.clear();
        match self.mode {
            SidebarMode::Collections => self.refilter(),
            SidebarMode::History => self.refresh_history(store),
        }
    }

    /// Enter/Space on the current row. Expandable rows toggle silently;
    /// leaf rows produce the selection message for their kind.
    fn activate(&mut self) -> Option<SidebarMsg> {
        match self.mode {
            SidebarMode::Collections => {
                let cursor = self.tree_view.cursor;
                let item = self.visible_items().get(cursor)?;
                if item.expandable {
                    self.toggle_at(cursor);
                    return None;
                }
                match &item.kind {
                    TreeItemKind::Request(req) => Some(SidebarMsg::OpenRequest(req.clone())),
                    TreeItemKind::Socket(sock) => Some(SidebarMsg::OpenSocket(sock.clone())),
                    // A childless collection or folder has nothing to open.
                    TreeItemKind::Collection | TreeItemKind::Folder => None,
                }
            }
            SidebarMode::History => self
                .history
                .get(self.history_view.cursor)
                .map(|entry| SidebarMsg::OpenHistoryEntry(entry.clone())),
        }
    }

    /// Escape outside search editing. Collections: drop an applied filter
    /// if one is set, otherwise nothing. History: drop the filter and
    /// re-query, or fall back to collections mode when no filter is set.
    fn cancel(&mut self, store: &dyn HistoryStore) {
        match self.mode {
            SidebarMode::Collections => {
                if !self.tree_search.query.is_empty() {
                    self.tree_search.query.clear();
                    self.refilter();
                }
            }
            SidebarMode::History => {
                if !self.history_search.query.is_empty() {
                    self.history_search.query.clear();
                    self.refresh_history(store);
                } else {
                    self.mode = SidebarMode::Collections;
                }
            }
        }
    }

    fn handle_tree_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('l') | KeyCode::Right => self.expand_at(self.tree_view.cursor),
            KeyCode::Char('h') | KeyCode::Left => self.collapse_at(self.tree_view.cursor),
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent, store: &dyn HistoryStore) {
        match key.code {
            KeyCode::Char('r') => {
                self.refresh_history(store);
                self.history_view.jump_top();
            }
            KeyCode::Char('m') => {
                self.method_filter = next_method_filter(self.method_filter.take());
                self.refresh_history(store);
            }
            KeyCode::Char('s') => {
                self.status_filter = StatusRange::next(self.status_filter);
                self.refresh_history(store);
            }
            KeyCode::Char('x') => {
                let any_active = self.method_filter.is_some()
                    || self.status_filter.is_some()
                    || !self.history_search.query.is_empty();
                if any_active {
                    self.method_filter = None;
                    self.status_filter = None;
                    self.history_search.query.clear();
                    self.refresh_history(store);
                }
            }
            _ => {}
        }
    }

    /// Keys while the query is being edited. Every printable character is
    /// literal input here — including the letters that navigate in normal
    /// mode — because free-text search has to accept anything.
    fn handle_search_key(&mut self, key: KeyEvent, store: &dyn HistoryStore) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            // Ctrl+U empties the input, readline style.
            if key.code == KeyCode::Char('u') {
                self.set_search_query(String::new(), store);
            }
            return;
        }
        match key.code {
            // Confirm and cancel both leave edit mode with the query still
            // applied; only the editing flag changes.
            KeyCode::Enter | KeyCode::Esc => {
                self.search_input_mut().editing = false;
                if self.mode == SidebarMode::Collections {
                    self.refilter();
                }
            }
            KeyCode::Backspace => {
                let mut query = self.search_input().query.clone();
                query.pop();
                self.set_search_query(query, store);
            }
            KeyCode::Char(c) => {
                let mut query = self.search_input().query.clone();
                query.push(c);
                self.set_search_query(query, store);
            }
            _ => {}
        }
    }

    fn set_search_query(&mut self, query: String, store: &dyn HistoryStore) {
        self.search_input_mut().query = query;
        match self.mode {
            SidebarMode::Collections => self.refilter(),
            SidebarMode::History => self.refresh_history(store),
        }
    }
}

fn next_method_filter(current: Option<HttpMethod>) -> Option<HttpMethod> {
    match current {
        None => Some(HttpMethod::Get),
        // The plain cycle wraps OPTIONS back to GET; the filter instead
        // returns to "no filter".
        Some(HttpMethod::Options) => None,
        Some(method) => Some(method.next()),
    }
}
