use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::layout::{ACCENT_BLUE, BORDER_INACTIVE, RED, SPINNER_FRAMES, TEXT_MUTED, TEXT_PRIMARY};
use super::sidebar::status_color;
use crate::state::app_state::{AppState, RequestStatus};
use crate::state::focus::Focus;
use crate::state::response_state::ResponseBody;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = matches!(state.focus, Focus::ResponseViewer);
    let border_color = if focused { ACCENT_BLUE } else { BORDER_INACTIVE };

    let block = Block::default()
        .title(" Response ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    match &state.request_status {
        RequestStatus::Loading { spinner_tick } => {
            let frame_char = SPINNER_FRAMES[*spinner_tick as usize % SPINNER_FRAMES.len()];
            let line = Line::from(Span::styled(
                format!(" {frame_char} Sending… (Esc to cancel)"),
                Style::default().fg(ACCENT_BLUE),
            ));
            frame.render_widget(Paragraph::new(line), inner);
            return;
        }
        RequestStatus::Error(message) => {
            let line = Line::from(Span::styled(
                format!(" ✗ {message}"),
                Style::default().fg(RED),
            ));
            frame.render_widget(Paragraph::new(line), inner);
            return;
        }
        RequestStatus::Idle => {}
    }

    let Some(response) = &state.response else {
        let hint = Paragraph::new("  No response yet.").style(Style::default().fg(TEXT_MUTED));
        frame.render_widget(hint, inner);
        return;
    };

    let meta = Line::from(vec![
        Span::styled(
            format!(" {} {}", response.status, response.status_text),
            Style::default()
                .fg(status_color(response.status))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  {} B  {} ms  {} headers  {}",
                response.size_bytes,
                response.elapsed_ms,
                response.headers.len(),
                response.received_at.format("%H:%M:%S")
            ),
            Style::default().fg(TEXT_MUTED),
        ),
    ]);

    let mut lines = vec![meta, Line::from("")];
    match &response.body {
        ResponseBody::Empty => {
            lines.push(Line::from(Span::styled(
                "  (empty body)",
                Style::default().fg(TEXT_MUTED),
            )));
        }
        ResponseBody::Text(text) => {
            for line in text.lines() {
                lines.push(Line::from(Span::styled(
                    line.to_string(),
                    Style::default().fg(TEXT_PRIMARY),
                )));
            }
        }
        ResponseBody::Binary(bytes) => {
            lines.push(Line::from(Span::styled(
                format!("  « {} bytes of binary data »", bytes.len()),
                Style::default().fg(TEXT_MUTED),
            )));
        }
    }

    let body = Paragraph::new(lines).scroll((response.scroll_offset, 0));
    frame.render_widget(body, inner);
}
