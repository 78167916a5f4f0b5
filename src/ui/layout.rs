//! Layout helpers: split the terminal area into regions.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, BorderType, Borders},
};

use super::theme::Theme;

/// Primary screen layout with tree pane and a bottom status bar.
pub struct AppLayout {
    pub tree_area: Rect,
    /// Rows inside the tree pane border; pointer hit-testing happens here.
    pub tree_inner: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // tree pane
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            tree_area: chunks[0],
            tree_inner: tree_block().inner(chunks[0]),
            status_area: chunks[1],
        }
    }
}

/// Border around the tree pane.
pub fn tree_block() -> Block<'static> {
    Block::default()
        .title(" Files ")
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_style())
}
