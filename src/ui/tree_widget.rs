//! Custom Ratatui widget that renders a [`Forest`] as an indented,
//! collapsible tree, plus the row geometry used to dispatch pointer events.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, StatefulWidget, Widget},
};

use crate::config::IconStyle;
use crate::core::editor::RenameSession;
use crate::core::icons::IconRef;
use crate::core::tree::{Forest, NodeId};

use super::glyphs;
use super::theme::Theme;

// ───────────────────────────────────────── state ─────────────

/// Keyboard cursor and scroll offset. The cursor is only a pointer for
/// keyboard input; the highlighted selection lives in the session.
#[derive(Debug, Default)]
pub struct TreeWidgetState {
    /// Index into the visible row list.
    pub cursor: usize,
    /// Vertical scroll offset (first visible row).
    pub offset: usize,
}

impl TreeWidgetState {
    pub fn select_next(&mut self, max: usize) {
        if max > 0 && self.cursor < max - 1 {
            self.cursor += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Keep the cursor inside a list of `len` rows after rows disappear.
    pub fn clamp_cursor(&mut self, len: usize) {
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    /// Ensure the cursor row is visible within the viewport of `height` rows.
    pub fn clamp_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor - height + 1;
        }
    }
}

// ───────────────────────────────────────── row model ─────────

/// One rendered row in the tree view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub node_id: NodeId,
    pub depth: usize,
    pub is_folder: bool,
    pub expanded: bool,
    pub active: bool,
    pub icon: Option<IconRef>,
    pub label: String,
}

/// Flatten the currently visible part of the forest into rows.
pub fn build_rows(forest: &Forest) -> Vec<TreeRow> {
    forest
        .visible()
        .into_iter()
        .filter_map(|id| forest.live(id).ok().map(|node| (id, node)))
        .map(|(id, node)| TreeRow {
            node_id: id,
            depth: node.depth,
            is_folder: node.is_folder(),
            expanded: node.is_expanded(),
            active: node.active,
            icon: node.icon,
            label: node.label.clone(),
        })
        .collect()
}

/// Row index under a pointer at (`col`, `row`) inside the tree's inner area.
pub fn row_at(
    inner: Rect,
    state: &TreeWidgetState,
    row_count: usize,
    col: u16,
    row: u16,
) -> Option<usize> {
    if col < inner.x || col >= inner.x + inner.width {
        return None;
    }
    if row < inner.y || row >= inner.y + inner.height {
        return None;
    }
    let idx = (row - inner.y) as usize + state.offset;
    (idx < row_count).then_some(idx)
}

/// Screen row of a row index, if it is scrolled into view.
pub fn screen_row(inner: Rect, state: &TreeWidgetState, idx: usize) -> Option<u16> {
    let rel = idx.checked_sub(state.offset)?;
    (rel < inner.height as usize).then(|| inner.y + rel as u16)
}

// ───────────────────────────────────────── widget ────────────

/// The tree widget itself: created fresh each frame.
pub struct TreeWidget<'a> {
    forest: &'a Forest,
    icon_style: IconStyle,
    indent: u16,
    block: Option<Block<'a>>,
    editing: Option<&'a RenameSession>,
}

impl<'a> TreeWidget<'a> {
    pub fn new(forest: &'a Forest) -> Self {
        Self {
            forest,
            icon_style: IconStyle::default(),
            indent: crate::config::DEFAULT_INDENT,
            block: None,
            editing: None,
        }
    }

    pub fn icon_style(mut self, style: IconStyle) -> Self {
        self.icon_style = style;
        self
    }

    pub fn indent(mut self, indent: u16) -> Self {
        self.indent = indent;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Replace the label of the node being renamed with its input field.
    pub fn editing(mut self, editing: Option<&'a RenameSession>) -> Self {
        self.editing = editing;
        self
    }

    fn row_spans(&self, row: &TreeRow) -> Vec<Span<'a>> {
        let indent = " ".repeat(row.depth * self.indent as usize);
        let mut spans = vec![Span::raw(indent)];

        if row.is_folder {
            spans.push(Span::styled(
                glyphs::arrow(row.expanded, self.icon_style),
                Theme::arrow_style(),
            ));
            spans.push(Span::styled(
                glyphs::folder(row.expanded, self.icon_style),
                Theme::folder_style(),
            ));
        } else {
            let icon = row.icon.unwrap_or(IconRef::DefaultFile);
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                glyphs::file(icon, self.icon_style),
                Theme::icon_style(icon),
            ));
        }

        match self.editing.filter(|e| e.node() == row.node_id) {
            Some(edit) => spans.extend(input_spans(edit)),
            None => {
                let style = if row.is_folder {
                    Theme::folder_style()
                } else {
                    Theme::file_style()
                };
                spans.push(Span::styled(row.label.clone(), style));
            }
        }
        spans
    }
}

/// Input text split around a block cursor.
fn input_spans<'a>(edit: &RenameSession) -> Vec<Span<'a>> {
    let (before, rest) = edit.input.split_at(edit.cursor);
    let mut chars = rest.chars();
    let under = chars.next().map(String::from).unwrap_or_else(|| " ".into());
    let after: String = chars.collect();
    vec![
        Span::styled(before.to_string(), Theme::input_style()),
        Span::styled(under, Theme::input_cursor_style()),
        Span::styled(after, Theme::input_style()),
    ]
}

impl<'a> StatefulWidget for TreeWidget<'a> {
    type State = TreeWidgetState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        // Resolve the inner area (inside the optional block border).
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        let rows = build_rows(self.forest);
        state.clamp_cursor(rows.len());
        state.clamp_scroll(inner.height as usize);

        let visible_rows = rows
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(inner.height as usize);

        for (i, (row_idx, row)) in visible_rows.enumerate() {
            let y = inner.y + i as u16;
            let row_style = if row.active {
                Theme::active_style()
            } else if row_idx == state.cursor {
                Theme::cursor_style()
            } else {
                Style::default()
            };
            buf.set_style(Rect::new(inner.x, y, inner.width, 1), row_style);

            let mut line = Line::from(self.row_spans(row));
            if row.active {
                line = line.patch_style(row_style);
            }
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
