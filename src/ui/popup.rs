//! Popup overlay widgets for the context menu and the delete confirmation.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::core::session::MenuAnchor;

use super::theme::Theme;

/// Entries of the context menu, in display order.
pub const MENU_ITEMS: [&str; 2] = ["Rename", "Delete"];

const MENU_WIDTH: u16 = 14;

// ───────────────────────────────────────── context menu ──────

/// Rectangle the context menu occupies when anchored at `anchor`.
///
/// The menu opens down and to the right of the anchor and is pushed back
/// inside `area` when it would overflow the screen edge.
pub fn menu_rect(anchor: MenuAnchor, area: Rect) -> Rect {
    let w = MENU_WIDTH.min(area.width);
    let h = (MENU_ITEMS.len() as u16 + 2).min(area.height);
    let max_x = area.x + area.width - w;
    let max_y = area.y + area.height - h;
    let x = anchor.column.clamp(area.x, max_x);
    let y = anchor.row.clamp(area.y, max_y);
    Rect::new(x, y, w, h)
}

/// Menu entry under the pointer, if any.
pub fn menu_item_at(rect: Rect, col: u16, row: u16) -> Option<usize> {
    if col <= rect.x || col + 1 >= rect.x + rect.width {
        return None;
    }
    if row <= rect.y {
        return None;
    }
    let idx = (row - rect.y - 1) as usize;
    (idx < MENU_ITEMS.len()).then_some(idx)
}

/// Floating Rename / Delete menu.
pub struct ContextMenu {
    pub anchor: MenuAnchor,
    pub selected: usize,
}

impl Widget for ContextMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = menu_rect(self.anchor, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines: Vec<Line> = MENU_ITEMS
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let (prefix, style) = if i == self.selected {
                    ("▸ ", Theme::menu_selected_style())
                } else {
                    ("  ", Theme::menu_item_style())
                };
                let width = inner.width as usize;
                Line::from(Span::styled(format!("{prefix}{item:<width$}"), style))
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── confirm dialog ────

/// Modal yes/no prompt shown before a delete.
///
/// The prompt is never truncated: the dialog grows by one row per wrapped
/// line, and the spacer rows go first when the screen is too short.
pub struct ConfirmDialog<'a> {
    pub prompt: &'a str,
}

const CONFIRM_HINT: &str = "[y] Yes  [n/Esc] Cancel";

impl<'a> Widget for ConfirmDialog<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (self.prompt.chars().count() as u16 + 6)
            .clamp(32, 60)
            .min(area.width);
        let prompt_lines = wrap_chars(self.prompt, width.saturating_sub(2) as usize);
        // Spacer, prompt, spacer, hint, and the two border rows.
        let height = prompt_lines.len() as u16 + 5;
        let popup = centered_fixed(width, height, area);
        let compact = popup.height < height;
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Delete ")
            .title_style(Theme::danger_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::danger_style());
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = Vec::with_capacity(prompt_lines.len() + 3);
        if !compact {
            lines.push(Line::raw(""));
        }
        lines.extend(
            prompt_lines
                .into_iter()
                .map(|l| Line::from(Span::styled(l, Theme::menu_item_style()))),
        );
        if !compact {
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(Span::styled(CONFIRM_HINT, Theme::hint_style())));

        Paragraph::new(lines).centered().render(inner, buf);
    }
}

/// Split `text` into rows of at most `width` characters.
fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|row| row.iter().collect())
        .collect()
}

// ───────────────────────────────────────── helpers ───────────

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
