use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::error::AppError;
use crate::event::Event;
use crate::history::store::{HistoryEntry, SqliteHistoryStore};
use crate::http::builder::normalize_url;
use crate::http::{client::build_client, executor::execute};
use crate::sidebar::{SidebarMode, SidebarMsg, SidebarState};
use crate::state::app_state::{AppState, RequestStatus};
use crate::state::collection::{Collection, CollectionRequest, CollectionSocket};
use crate::state::focus::Focus;
use crate::state::mode::Mode;
use crate::state::request_state::{HttpMethod, RequestState};
use crate::state::response_state::ResponseState;
use crate::storage;
use crate::ui::layout::sidebar_view_height;

pub struct App {
    pub state: AppState,
    client: reqwest::Client,
    history: SqliteHistoryStore,
    tx: UnboundedSender<Event>,
    cancel: Option<CancellationToken>,
}

impl App {
    pub fn new(
        tx: UnboundedSender<Event>,
        workspace_name: String,
        collections: Vec<Collection>,
        history: SqliteHistoryStore,
    ) -> Self {
        let sidebar = SidebarState::new(collections);
        Self {
            state: AppState::new(workspace_name, sidebar),
            client: build_client(),
            history,
            tx,
            cancel: None,
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                self.state.dirty = true;
                // Ctrl+R fires globally regardless of mode or focus
                if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.send_request();
                    return;
                }
                match self.state.mode {
                    Mode::Normal => self.handle_normal_key(key),
                    Mode::Insert => self.handle_insert_key(key),
                }
            }
            Event::Key(_) => {}
            Event::Response(result) => {
                self.state.dirty = true;
                self.handle_response(result);
            }
            // Tick: only dirty when the spinner is visible; otherwise a no-op.
            Event::Tick => self.handle_tick(),
            // Terminal resize always requires a full redraw, and the sidebar
            // must re-clamp its scroll window to the new geometry.
            Event::Resize(_, height) => {
                self.state.sidebar.set_view_height(sidebar_view_height(height));
                self.state.dirty = true;
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        // While the sidebar's search line is live, every key belongs to it —
        // including ones that are global commands otherwise.
        if self.state.focus == Focus::Sidebar && self.state.sidebar.search_editing() {
            self.dispatch_sidebar(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.state.should_quit = true,
            KeyCode::Tab => self.set_focus(self.state.focus.next()),
            KeyCode::BackTab => self.set_focus(self.state.focus.prev()),
            KeyCode::Char('1') => self.set_focus(Focus::Sidebar),
            KeyCode::Char('2') => self.set_focus(Focus::UrlBar),
            KeyCode::Char('3') => self.set_focus(Focus::ResponseViewer),
            KeyCode::Char('i') | KeyCode::Enter if self.state.focus == Focus::UrlBar => {
                self.state.mode = Mode::Insert;
                self.state.request.url_cursor = self.state.request.url.len();
            }
            KeyCode::Char('[') if self.state.focus == Focus::UrlBar => {
                self.state.request.method = self.state.request.method.prev();
            }
            KeyCode::Char(']') if self.state.focus == Focus::UrlBar => {
                self.state.request.method = self.state.request.method.next();
            }
            KeyCode::Char('a')
                if self.state.focus == Focus::Sidebar
                    && self.state.sidebar.mode() == SidebarMode::Collections =>
            {
                self.save_current_request();
            }
            KeyCode::Esc if self.state.focus != Focus::Sidebar => self.cancel_request(),
            KeyCode::Char('j') | KeyCode::Down if self.state.focus == Focus::ResponseViewer => {
                if let Some(resp) = &mut self.state.response {
                    resp.scroll_offset = resp.scroll_offset.saturating_add(1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up if self.state.focus == Focus::ResponseViewer => {
                if let Some(resp) = &mut self.state.response {
                    resp.scroll_offset = resp.scroll_offset.saturating_sub(1);
                }
            }
            _ if self.state.focus == Focus::Sidebar => self.dispatch_sidebar(key),
            _ => {}
        }
    }

    fn dispatch_sidebar(&mut self, key: KeyEvent) {
        let msg = self.state.sidebar.handle_key(key, &self.history);
        match msg {
            Some(SidebarMsg::OpenRequest(req)) => self.open_request(req),
            Some(SidebarMsg::OpenSocket(sock)) => self.open_socket(sock),
            Some(SidebarMsg::OpenHistoryEntry(entry)) => self.open_history_entry(entry),
            None => {}
        }
    }

    fn open_request(&mut self, req: CollectionRequest) {
        self.state.request = RequestState {
            id: req.id,
            name: req.name,
            method: HttpMethod::parse(&req.method).unwrap_or_default(),
            url_cursor: req.url.len(),
            url: req.url,
        };
        self.state.response = None;
        self.state.request_status = RequestStatus::Idle;
    }

    fn open_socket(&mut self, sock: CollectionSocket) {
        // Sockets reuse the request pane as a template holder; executing a
        // WebSocket session lives elsewhere.
        self.state.request = RequestState {
            id: sock.id,
            name: sock.name,
            method: HttpMethod::Get,
            url_cursor: sock.url.len(),
            url: sock.url,
        };
        self.state.response = None;
        self.state.request_status = RequestStatus::Idle;
    }

    fn open_history_entry(&mut self, entry: HistoryEntry) {
        self.state.request = RequestState {
            name: entry.url.clone(),
            method: HttpMethod::parse(&entry.method).unwrap_or_default(),
            url_cursor: entry.url.len(),
            url: entry.url,
            ..RequestState::default()
        };
        self.state.response = None;
        self.state.request_status = RequestStatus::Idle;
    }

    /// Save the request pane's current content into the collection under
    /// the sidebar cursor.
    fn save_current_request(&mut self) {
        if self.state.request.url.is_empty() {
            return;
        }
        let req = CollectionRequest::new(
            self.state.request.name.clone(),
            self.state.request.method.as_str(),
            self.state.request.url.clone(),
        );
        if self.state.sidebar.add_request(req) {
            storage::collection::save_all_collections(
                &self.state.workspace_name,
                self.state.sidebar.collections(),
            );
        }
    }

    fn handle_insert_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.mode = Mode::Normal,
            KeyCode::Enter => {
                self.state.mode = Mode::Normal;
                self.send_request();
            }
            KeyCode::Char(c) => {
                let cursor = self.state.request.url_cursor;
                self.state.request.url.insert(cursor, c);
                self.state.request.url_cursor += c.len_utf8();
            }
            KeyCode::Backspace => {
                let cursor = self.state.request.url_cursor;
                if cursor > 0 {
                    let prev = prev_char_boundary_of(&self.state.request.url, cursor);
                    self.state.request.url.drain(prev..cursor);
                    self.state.request.url_cursor = prev;
                }
            }
            KeyCode::Delete => {
                let cursor = self.state.request.url_cursor;
                if cursor < self.state.request.url.len() {
                    let next = next_char_boundary_of(&self.state.request.url, cursor);
                    self.state.request.url.drain(cursor..next);
                }
            }
            KeyCode::Left => {
                self.state.request.url_cursor =
                    prev_char_boundary_of(&self.state.request.url, self.state.request.url_cursor);
            }
            KeyCode::Right => {
                self.state.request.url_cursor =
                    next_char_boundary_of(&self.state.request.url, self.state.request.url_cursor);
            }
            KeyCode::Home => self.state.request.url_cursor = 0,
            KeyCode::End => self.state.request.url_cursor = self.state.request.url.len(),
            _ => {}
        }
    }

    fn handle_response(&mut self, result: Result<ResponseState, AppError>) {
        self.cancel = None;
        match result {
            Ok(response) => {
                let method = self.state.request.method.as_str();
                let url = normalize_url(&self.state.request.url);
                if let Err(err) =
                    self.history.record(method, &url, response.status, response.received_at)
                {
                    log::warn!("failed to record history entry: {err}");
                }
                // A history view that is open should show the new entry
                // without waiting for a manual refresh.
                if self.state.sidebar.mode() == SidebarMode::History {
                    self.state.sidebar.refresh_history(&self.history);
                }
                self.state.response = Some(response);
                self.state.request_status = RequestStatus::Idle;
            }
            Err(AppError::Cancelled) => {
                self.state.request_status = RequestStatus::Idle;
            }
            Err(e) => {
                self.state.request_status = RequestStatus::Error(e.to_string());
            }
        }
    }

    fn handle_tick(&mut self) {
        if let RequestStatus::Loading { spinner_tick } = &mut self.state.request_status {
            *spinner_tick = spinner_tick.wrapping_add(1);
            self.state.dirty = true;
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.state.focus = focus;
        self.state
            .sidebar
            .set_focused(matches!(self.state.focus, Focus::Sidebar));
    }

    fn send_request(&mut self) {
        if self.state.request.url.is_empty() {
            return;
        }
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        self.state.request_status = RequestStatus::Loading { spinner_tick: 0 };
        self.state.response = None;

        let client = self.client.clone();
        let request = self.state.request.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            execute(client, request, tx, token).await;
        });
    }

    pub fn cancel_request(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        self.state.request_status = RequestStatus::Idle;
    }
}

fn prev_char_boundary_of(text: &str, pos: usize) -> usize {
    if pos == 0 {
        return 0;
    }
    let mut p = pos - 1;
    while p > 0 && !text.is_char_boundary(p) {
        p -= 1;
    }
    p
}

fn next_char_boundary_of(text: &str, pos: usize) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    let mut p = pos + 1;
    while p < text.len() && !text.is_char_boundary(p) {
        p += 1;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_boundaries_handle_multibyte() {
        let text = "a€b";
        assert_eq!(next_char_boundary_of(text, 0), 1);
        assert_eq!(next_char_boundary_of(text, 1), 4);
        assert_eq!(prev_char_boundary_of(text, 4), 1);
        assert_eq!(prev_char_boundary_of(text, 1), 0);
        assert_eq!(next_char_boundary_of(text, 5), 5);
    }
}
