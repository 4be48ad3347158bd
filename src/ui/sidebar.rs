use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::layout::{
    ACCENT_BLUE, BORDER_INACTIVE, GREEN, ORANGE, PURPLE, RED, SURFACE, TEXT_MUTED, TEXT_PRIMARY,
};
use crate::history::store::HistoryEntry;
use crate::sidebar::tree::{TreeItem, TreeItemKind};
use crate::sidebar::{SidebarMode, SidebarState};
use crate::state::app_state::AppState;
use crate::state::focus::Focus;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let sidebar = &state.sidebar;
    let focused = matches!(state.focus, Focus::Sidebar);
    let border_color = if focused { ACCENT_BLUE } else { BORDER_INACTIVE };

    let title = match sidebar.mode() {
        SidebarMode::Collections => " Collections ".to_string(),
        SidebarMode::History => {
            let mut title = String::from(" History");
            if let Some(method) = sidebar.method_filter() {
                title.push_str(&format!(" [{}]", method.as_str()));
            }
            if let Some(range) = sidebar.status_filter() {
                title.push_str(&format!(" [{}]", range.label()));
            }
            if sidebar.history_stale() {
                title.push_str(" (stale)");
            }
            title.push(' ');
            title
        }
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 || inner.width == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    render_search_line(frame, chunks[0], sidebar);

    match sidebar.mode() {
        SidebarMode::Collections => render_tree(frame, chunks[1], sidebar, focused),
        SidebarMode::History => render_history(frame, chunks[1], sidebar, focused),
    }
}

fn render_search_line(frame: &mut Frame, area: Rect, sidebar: &SidebarState) {
    let search = sidebar.search_input();
    let line = if search.editing {
        Line::from(vec![
            Span::styled("/ ", Style::default().fg(ACCENT_BLUE)),
            Span::styled(search.query.clone(), Style::default().fg(TEXT_PRIMARY)),
            Span::styled("▏", Style::default().fg(ACCENT_BLUE)),
        ])
    } else if !search.query.is_empty() {
        Line::from(vec![
            Span::styled("/ ", Style::default().fg(TEXT_MUTED)),
            Span::styled(search.query.clone(), Style::default().fg(TEXT_PRIMARY)),
        ])
    } else {
        let hint = match sidebar.mode() {
            SidebarMode::Collections => "/:filter  v:history",
            SidebarMode::History => "/:search  v:collections",
        };
        Line::from(Span::styled(hint, Style::default().fg(TEXT_MUTED)))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_tree(frame: &mut Frame, area: Rect, sidebar: &SidebarState, focused: bool) {
    let items = sidebar.visible_items();
    if items.is_empty() {
        let message = if sidebar.search_input().query.is_empty() {
            "  No collections yet. Press 'a' to save one."
        } else {
            "  No matches."
        };
        let empty = Paragraph::new(message).style(Style::default().fg(TEXT_MUTED));
        frame.render_widget(empty, area);
        return;
    }

    let vp = sidebar.tree_viewport();
    let height = area.height as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (row, item) in items.iter().enumerate().skip(vp.offset).take(height) {
        lines.push(tree_row_line(item, row == vp.cursor && focused, area.width));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn tree_row_line(item: &TreeItem, selected: bool, width: u16) -> Line<'static> {
    let base_style = if selected {
        Style::default()
            .bg(SURFACE)
            .fg(TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_PRIMARY)
    };

    let mut spans: Vec<Span<'static>> = Vec::new();
    spans.push(Span::styled("  ".repeat(item.level), base_style));

    let arrow = if item.expandable {
        if item.expanded { "▾ " } else { "▸ " }
    } else {
        "  "
    };
    spans.push(Span::styled(arrow.to_string(), base_style.fg(TEXT_MUTED)));

    match &item.kind {
        TreeItemKind::Collection | TreeItemKind::Folder => {
            spans.push(Span::styled(
                item.name.clone(),
                base_style.fg(if selected { TEXT_PRIMARY } else { ACCENT_BLUE }),
            ));
        }
        TreeItemKind::Request(req) => {
            spans.push(Span::styled(
                format!("{:<4}", req.method),
                base_style.fg(method_color(&req.method)),
            ));
            spans.push(Span::styled(format!(" {}", item.name), base_style));
        }
        TreeItemKind::Socket(_) => {
            spans.push(Span::styled("WS  ".to_string(), base_style.fg(PURPLE)));
            spans.push(Span::styled(format!(" {}", item.name), base_style));
        }
    }

    if selected {
        pad_to_width(&mut spans, width, SURFACE);
    }
    Line::from(spans)
}

fn render_history(frame: &mut Frame, area: Rect, sidebar: &SidebarState, focused: bool) {
    let entries = sidebar.history_entries();
    if entries.is_empty() {
        let empty = Paragraph::new("  No history yet. Send a request with Ctrl+R.")
            .style(Style::default().fg(TEXT_MUTED));
        frame.render_widget(empty, area);
        return;
    }

    let vp = sidebar.history_viewport();
    let height = area.height as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (row, entry) in entries.iter().enumerate().skip(vp.offset).take(height) {
        lines.push(history_row_line(entry, row == vp.cursor && focused, area.width));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn history_row_line(entry: &HistoryEntry, selected: bool, width: u16) -> Line<'static> {
    let base_style = if selected {
        Style::default()
            .bg(SURFACE)
            .fg(TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_PRIMARY)
    };

    let mut spans = vec![
        Span::styled(
            format!("{:<7}", entry.method),
            base_style.fg(method_color(&entry.method)),
        ),
        Span::styled(format!("{:<4}", entry.status), base_style.fg(status_color(entry.status))),
        Span::styled(entry.url.clone(), base_style),
        Span::styled(
            format!("  {}", entry.created_at.format("%H:%M")),
            base_style.fg(TEXT_MUTED),
        ),
    ];

    if selected {
        pad_to_width(&mut spans, width, SURFACE);
    }
    Line::from(spans)
}

fn pad_to_width(spans: &mut Vec<Span<'static>>, width: u16, bg: Color) {
    let content_width: usize = spans.iter().map(|s| s.content.width()).sum();
    let remaining = (width as usize).saturating_sub(content_width);
    if remaining > 0 {
        spans.push(Span::styled(" ".repeat(remaining), Style::default().bg(bg)));
    }
}

pub fn method_color(method: &str) -> Color {
    match method {
        "GET" => GREEN,
        "POST" => ACCENT_BLUE,
        "PUT" => ORANGE,
        "PATCH" => PURPLE,
        "DELETE" => RED,
        _ => TEXT_MUTED,
    }
}

pub fn status_color(status: u16) -> Color {
    match status {
        200..=299 => GREEN,
        300..=399 => ACCENT_BLUE,
        400..=499 => ORANGE,
        _ => RED,
    }
}
