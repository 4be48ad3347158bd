use super::{focus::Focus, mode::Mode, request_state::RequestState, response_state::ResponseState};
use crate::sidebar::SidebarState;

#[derive(Debug, Clone, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading { spinner_tick: u8 },
    Error(String),
}

#[derive(Debug)]
pub struct AppState {
    pub mode: Mode,
    pub focus: Focus,
    pub workspace_name: String,
    pub sidebar: SidebarState,
    pub request: RequestState,
    pub response: Option<ResponseState>,
    pub request_status: RequestStatus,
    pub should_quit: bool,
    /// Set to `true` whenever visible state changes. The render loop skips
    /// `terminal.draw()` when `false`, avoiding redundant work on idle ticks.
    pub dirty: bool,
}

impl AppState {
    pub fn new(workspace_name: String, sidebar: SidebarState) -> Self {
        Self {
            mode: Mode::default(),
            focus: Focus::default(),
            workspace_name,
            sidebar,
            request: RequestState::default(),
            response: None,
            request_status: RequestStatus::default(),
            should_quit: false,
            dirty: true,
        }
    }
}
