use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::layout::{ACCENT_BLUE, BORDER_INACTIVE, TEXT_MUTED, TEXT_PRIMARY};
use super::sidebar::method_color;
use crate::state::app_state::AppState;
use crate::state::focus::Focus;
use crate::state::mode::Mode;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = matches!(state.focus, Focus::UrlBar);
    let border_color = if focused { ACCENT_BLUE } else { BORDER_INACTIVE };

    let block = Block::default()
        .title(format!(" {} ", state.request.name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let method = state.request.method.as_str();
    let url_span = if state.request.url.is_empty() {
        Span::styled("Enter a URL… (i to edit)", Style::default().fg(TEXT_MUTED))
    } else {
        Span::styled(state.request.url.clone(), Style::default().fg(TEXT_PRIMARY))
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {method} "),
            Style::default()
                .fg(method_color(method))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        url_span,
    ]);
    frame.render_widget(Paragraph::new(line), inner);

    // Show the text cursor while the URL is being edited.
    if focused && state.mode == Mode::Insert {
        let prefix = method.len() as u16 + 3;
        let col = state.request.url[..state.request.url_cursor.min(state.request.url.len())]
            .chars()
            .count() as u16;
        let x = inner.x + prefix + col;
        if x < inner.x + inner.width {
            frame.set_cursor_position(Position { x, y: inner.y });
        }
    }
}
