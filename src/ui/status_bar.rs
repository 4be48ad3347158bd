use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::layout::{ACCENT_BLUE, BORDER_INACTIVE, GREEN};
use crate::sidebar::SidebarMode;
use crate::state::app_state::AppState;
use crate::state::focus::Focus;
use crate::state::mode::Mode;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let (mode_label, mode_color) = match state.mode {
        Mode::Normal => ("NORMAL", ACCENT_BLUE),
        Mode::Insert => ("INSERT", GREEN),
    };

    let mode_span = Span::styled(
        format!(" {} ", mode_label),
        Style::default()
            .fg(Color::Black)
            .bg(mode_color)
            .add_modifier(Modifier::BOLD),
    );

    let hints = match (&state.focus, state.sidebar.mode()) {
        (Focus::Sidebar, SidebarMode::Collections) => {
            "  · j/k:move · l/h:open/close · Enter:select · /:filter · v:history · a:save · q:quit"
        }
        (Focus::Sidebar, SidebarMode::History) => {
            "  · j/k:move · Enter:load · /:search · m:method · s:status · x:clear · r:refresh · Esc:back"
        }
        _ => "  · Tab:focus · i:edit url · [ ]:method · Ctrl+R:send · q:quit",
    };

    let line = Line::from(vec![
        mode_span,
        Span::styled(hints, Style::default().fg(BORDER_INACTIVE)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
