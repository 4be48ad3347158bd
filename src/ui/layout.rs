use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::Color,
};

use super::{response_viewer, sidebar, status_bar, url_bar};
use crate::state::app_state::AppState;

// TokyoNight palette
pub const ACCENT_BLUE: Color = Color::Rgb(122, 162, 247); // #7aa2f7
pub const BORDER_INACTIVE: Color = Color::Rgb(65, 72, 104); // #414868
pub const TEXT_MUTED: Color = Color::Rgb(86, 95, 137); // #565f89
pub const TEXT_PRIMARY: Color = Color::Rgb(192, 202, 245); // #c0caf5
pub const SURFACE: Color = Color::Rgb(36, 40, 59); // #24283b
pub const GREEN: Color = Color::Rgb(158, 206, 106); // #9ece6a
pub const ORANGE: Color = Color::Rgb(224, 175, 104); // #e0af68
pub const RED: Color = Color::Rgb(247, 118, 142); // #f7768e
pub const PURPLE: Color = Color::Rgb(187, 154, 247); // #bb9af7

pub const SPINNER_FRAMES: &[char] = &['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];

pub const SIDEBAR_WIDTH: u16 = 32;

/// Rows available for sidebar list items given the full terminal height:
/// the status bar (1), the sidebar borders (2) and its search line (1).
/// Must agree with the splits below — the navigator clamps its scroll
/// offset against this number.
pub fn sidebar_view_height(term_height: u16) -> usize {
    term_height.saturating_sub(4) as usize
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Split off the status bar at the bottom.
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let main_area = vertical[0];
    let status_area = vertical[1];

    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(main_area);

    sidebar::render(frame, horiz[0], state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(horiz[1]);

    url_bar::render(frame, right[0], state);
    response_viewer::render(frame, right[1], state);

    status_bar::render(frame, status_area, state);
}
