//! Input handling: maps key/mouse events to state mutations.
//!
//! Overlays take input in priority order: the delete confirmation swallows
//! everything, then the inline rename field, then the context menu, and only
//! then does the tree itself see the event.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::core::editor::{DeleteOutcome, RenameOutcome, RenameSession};
use crate::core::error::TreeError;
use crate::core::session::MenuAnchor;
use crate::core::tree::NodeId;
use crate::ui::layout::AppLayout;
use crate::ui::popup::{menu_item_at, menu_rect, MENU_ITEMS};
use crate::ui::tree_widget::{build_rows, row_at, screen_row, TreeRow};

use super::state::AppState;

/// Menu entry indices, matching [`MENU_ITEMS`].
const MENU_RENAME: usize = 0;
const MENU_DELETE: usize = 1;

/// Process a key event, dispatching to whichever overlay owns input.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+c always quits, regardless of overlay.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    if state.delete.pending().is_some() {
        handle_confirm_key(state, key);
    } else if state.rename.is_some() {
        handle_rename_key(state, key);
    } else if state.session.menu_open() {
        handle_menu_key(state, key);
    } else {
        handle_tree_key(state, key);
    }
}

// ── Tree view (configurable bindings) ───────────────────────────

fn handle_tree_key(state: &mut AppState, key: KeyEvent) {
    let rows = build_rows(&state.forest);

    match key.code {
        KeyCode::Home => {
            state.tree_state.cursor = 0;
            state.tree_state.offset = 0;
            return;
        }
        KeyCode::End => {
            state.tree_state.cursor = rows.len().saturating_sub(1);
            return;
        }
        _ => {}
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;

    match action {
        Action::Quit => state.should_quit = true,
        Action::MoveUp => state.tree_state.select_prev(),
        Action::MoveDown => state.tree_state.select_next(rows.len()),
        Action::Select => {
            if let Some(row) = rows.get(state.tree_state.cursor) {
                select(state, row.node_id);
            }
        }
        Action::OpenMenu => {
            let idx = state.tree_state.cursor;
            let Some(row) = rows.get(idx) else {
                return;
            };
            let anchor = cursor_anchor(state, idx, row);
            open_menu(state, Some(row.node_id), anchor);
        }
    }
}

/// Screen position just below the label of row `idx`.
fn cursor_anchor(state: &AppState, idx: usize, row: &TreeRow) -> MenuAnchor {
    let inner = AppLayout::from_area(state.terminal_area).tree_inner;
    let y = screen_row(inner, &state.tree_state, idx).unwrap_or(inner.y);
    let indent = (row.depth as u16).saturating_mul(state.config.indent);
    MenuAnchor {
        column: inner.x.saturating_add(indent).saturating_add(4),
        row: y.saturating_add(1),
    }
}

// ── Context menu ────────────────────────────────────────────────

fn handle_menu_key(state: &mut AppState, key: KeyEvent) {
    let action = state.config.match_key(key);
    match (key.code, action) {
        (KeyCode::Esc, _) => state.session.dismiss_context_menu(),
        (KeyCode::Up, _) | (_, Some(Action::MoveUp)) => {
            state.menu_selected = state.menu_selected.saturating_sub(1);
        }
        (KeyCode::Down, _) | (_, Some(Action::MoveDown)) => {
            if state.menu_selected + 1 < MENU_ITEMS.len() {
                state.menu_selected += 1;
            }
        }
        (KeyCode::Enter, _) | (_, Some(Action::Select)) => {
            let item = state.menu_selected;
            apply_menu_item(state, item);
        }
        (_, Some(Action::Quit)) => state.session.dismiss_context_menu(),
        _ => {}
    }
}

fn open_menu(state: &mut AppState, target: Option<NodeId>, anchor: MenuAnchor) {
    if state.session.open_context_menu(&state.forest, target, anchor) {
        state.menu_selected = 0;
    }
}

/// Run a menu entry against the node the menu was opened on.
fn apply_menu_item(state: &mut AppState, item: usize) {
    let Some(target) = state.session.menu_focus else {
        state.session.dismiss_context_menu();
        return;
    };
    state.session.dismiss_context_menu();

    match item {
        MENU_RENAME => match RenameSession::begin(&state.forest, target) {
            Ok(session) => state.rename = Some(session),
            Err(e) => report(state, "rename", e),
        },
        MENU_DELETE => match state.delete.request(&state.forest, target) {
            Ok(prompt) => state.confirm_prompt = Some(prompt),
            Err(e) => report(state, "delete", e),
        },
        _ => {}
    }
}

// ── Delete confirmation ─────────────────────────────────────────

fn handle_confirm_key(state: &mut AppState, key: KeyEvent) {
    let answer = match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => true,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
        _ => return,
    };
    resolve_delete(state, answer);
}

fn resolve_delete(state: &mut AppState, confirmed: bool) {
    let prompt = state.confirm_prompt.take();
    match state
        .delete
        .resolve(&mut state.forest, &mut state.session, confirmed)
    {
        Ok(DeleteOutcome::Removed { count }) => {
            let rows = build_rows(&state.forest);
            state.tree_state.clamp_cursor(rows.len());
            state.status_message = Some(match count {
                1 => "Deleted 1 item".to_string(),
                n => format!("Deleted {n} items"),
            });
        }
        Ok(DeleteOutcome::Cancelled) => {
            tracing::debug!(?prompt, "delete declined");
        }
        Err(e) => report(state, "delete", e),
    }
}

// ── Inline rename ───────────────────────────────────────────────

fn handle_rename_key(state: &mut AppState, key: KeyEvent) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Tab) {
        commit_rename(state);
        return;
    }
    let Some(edit) = state.rename.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            edit.insert_char(c);
        }
        KeyCode::Backspace => edit.backspace(),
        KeyCode::Delete => edit.delete(),
        KeyCode::Left => edit.move_left(),
        KeyCode::Right => edit.move_right(),
        KeyCode::Home => edit.home(),
        KeyCode::End => edit.end(),
        _ => {}
    }
}

fn commit_rename(state: &mut AppState) {
    let Some(mut edit) = state.rename.take() else {
        return;
    };
    match edit.commit(&mut state.forest) {
        Ok(RenameOutcome::Renamed { from, to }) => {
            state.status_message = Some(format!("Renamed \"{from}\" to \"{to}\""));
        }
        Ok(RenameOutcome::Kept | RenameOutcome::AlreadyCommitted) => {}
        Err(e) => report(state, "rename", e),
    }
}

// ── Mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    // The confirmation is modal.
    if state.delete.pending().is_some() {
        return;
    }

    let layout = AppLayout::from_area(state.terminal_area);
    let rows = build_rows(&state.forest);
    let hit = row_at(
        layout.tree_inner,
        &state.tree_state,
        rows.len(),
        mouse.column,
        mouse.row,
    );

    if matches!(mouse.kind, MouseEventKind::Down(_)) {
        if let Some(edit) = &state.rename {
            let on_field = hit.and_then(|i| rows.get(i)).map(|r| r.node_id) == Some(edit.node());
            if on_field {
                return;
            }
            commit_rename(state);
        }
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(anchor) = state.session.menu {
                let rect = menu_rect(anchor, state.terminal_area);
                if point_in_rect(rect, mouse.column, mouse.row) {
                    if let Some(item) = menu_item_at(rect, mouse.column, mouse.row) {
                        state.menu_selected = item;
                        apply_menu_item(state, item);
                    }
                    return;
                }
                state.session.dismiss_context_menu();
            }

            if let Some(idx) = hit {
                state.tree_state.cursor = idx;
                state.status_message = None;
                select(state, rows[idx].node_id);
            }
        }
        MouseEventKind::Down(MouseButton::Right) => {
            if let Some(anchor) = state.session.menu {
                if point_in_rect(menu_rect(anchor, state.terminal_area), mouse.column, mouse.row) {
                    return;
                }
            }
            let target = hit.map(|idx| rows[idx].node_id);
            if let Some(idx) = hit {
                state.tree_state.cursor = idx;
            }
            let anchor = MenuAnchor {
                column: mouse.column,
                row: mouse.row,
            };
            open_menu(state, target, anchor);
        }
        MouseEventKind::ScrollUp if !state.session.menu_open() => {
            state.tree_state.select_prev();
        }
        MouseEventKind::ScrollDown if !state.session.menu_open() => {
            state.tree_state.select_next(rows.len());
        }
        _ => {}
    }
}

// ── helpers ─────────────────────────────────────────────────────

fn select(state: &mut AppState, id: NodeId) {
    if let Err(e) = state.session.select_or_toggle(&mut state.forest, id) {
        report(state, "select", e);
    }
}

fn report(state: &mut AppState, op: &str, err: TreeError) {
    tracing::warn!(op, error = %err, "operation failed");
    state.status_message = Some(format!("{op} failed: {err}"));
}

fn point_in_rect(rect: ratatui::layout::Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::editor::DeleteState;
    use crate::core::tree::tests::{find, sample_forest};
    use crate::core::tree::CollapseState;
    use ratatui::layout::Rect;

    // Tree rows start at screen row 1 inside the pane border:
    // src (1), data (2), README.md (3), .gitignore (4).

    fn app() -> AppState {
        let mut state = AppState::new(sample_forest(), AppConfig::default());
        state.terminal_area = Rect::new(0, 0, 80, 24);
        state
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, key(code));
    }

    fn click(state: &mut AppState, button: MouseButton, column: u16, row: u16) {
        handle_mouse(
            state,
            MouseEvent {
                kind: MouseEventKind::Down(button),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    fn label(state: &AppState, id: NodeId) -> &str {
        &state.forest.get(id).unwrap().label
    }

    #[test]
    fn left_click_selects_and_toggles_folder() {
        let mut state = app();
        let src = find(&state.forest, "src");

        click(&mut state, MouseButton::Left, 5, 1);
        let node = state.forest.get(src).unwrap();
        assert!(node.active);
        assert_eq!(node.collapse, Some(CollapseState::Expanded));
        assert_eq!(state.session.active, Some(src));

        click(&mut state, MouseButton::Left, 5, 1);
        assert_eq!(
            state.forest.get(src).unwrap().collapse,
            Some(CollapseState::Collapsed)
        );
    }

    #[test]
    fn click_below_last_row_does_nothing() {
        let mut state = app();
        click(&mut state, MouseButton::Left, 5, 10);
        assert_eq!(state.session.active, None);
    }

    #[test]
    fn keyboard_moves_cursor_and_selects() {
        let mut state = app();
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);

        let readme = find(&state.forest, "README.md");
        assert_eq!(state.session.active, Some(readme));

        press(&mut state, KeyCode::End);
        assert_eq!(state.tree_state.cursor, 3);
        press(&mut state, KeyCode::Home);
        assert_eq!(state.tree_state.cursor, 0);
    }

    #[test]
    fn right_click_opens_menu_at_pointer() {
        let mut state = app();
        let data = find(&state.forest, "data");

        click(&mut state, MouseButton::Right, 10, 2);
        assert_eq!(state.session.menu_focus, Some(data));
        assert_eq!(state.session.menu, Some(MenuAnchor { column: 10, row: 2 }));
        // Opening the menu does not change the selection.
        assert_eq!(state.session.active, None);
    }

    #[test]
    fn right_click_on_empty_space_dismisses_menu() {
        let mut state = app();
        click(&mut state, MouseButton::Right, 10, 2);
        assert!(state.session.menu_open());

        click(&mut state, MouseButton::Right, 10, 15);
        assert!(!state.session.menu_open());
    }

    #[test]
    fn click_outside_menu_dismisses_and_selects() {
        let mut state = app();
        click(&mut state, MouseButton::Right, 10, 2);

        click(&mut state, MouseButton::Left, 50, 3);
        assert!(!state.session.menu_open());
        let readme = find(&state.forest, "README.md");
        assert_eq!(state.session.active, Some(readme));
    }

    #[test]
    fn keyboard_menu_opens_on_cursor_row() {
        let mut state = app();
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Char('m'));

        let data = find(&state.forest, "data");
        assert_eq!(state.session.menu_focus, Some(data));
        assert_eq!(state.session.menu, Some(MenuAnchor { column: 5, row: 3 }));

        press(&mut state, KeyCode::Esc);
        assert!(!state.session.menu_open());
    }

    #[test]
    fn delete_cancelled_keeps_node() {
        let mut state = app();
        click(&mut state, MouseButton::Right, 10, 1);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);

        assert_eq!(
            state.confirm_prompt.as_deref(),
            Some("Are you sure you want to delete \"src\"?")
        );
        press(&mut state, KeyCode::Char('n'));
        assert_eq!(state.confirm_prompt, None);
        assert_eq!(state.delete.state(), DeleteState::Idle);
        assert_eq!(build_rows(&state.forest).len(), 4);
    }

    #[test]
    fn delete_confirmed_removes_subtree() {
        let mut state = app();
        let src = find(&state.forest, "src");
        // Make src active so its removal clears the selection.
        click(&mut state, MouseButton::Left, 5, 1);
        press(&mut state, KeyCode::End);

        click(&mut state, MouseButton::Right, 10, 1);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Char('y'));

        assert!(!state.forest.is_live(src));
        assert_eq!(state.session.active, None);
        assert_eq!(state.delete.state(), DeleteState::Removed(src));
        let rows = build_rows(&state.forest);
        assert_eq!(rows.len(), 3);
        assert!(state.tree_state.cursor < rows.len());
    }

    #[test]
    fn confirmation_swallows_mouse_and_other_keys() {
        let mut state = app();
        click(&mut state, MouseButton::Right, 10, 2);
        click(&mut state, MouseButton::Left, 12, 4);
        assert!(state.confirm_prompt.is_some());

        click(&mut state, MouseButton::Left, 5, 1);
        press(&mut state, KeyCode::Char('q'));
        assert_eq!(state.session.active, None);
        assert!(!state.should_quit);
        assert!(state.delete.pending().is_some());
    }

    #[test]
    fn rename_via_menu_and_enter() {
        let mut state = app();
        let readme = find(&state.forest, "README.md");
        click(&mut state, MouseButton::Right, 10, 3);
        // Rename is the first entry; click it.
        click(&mut state, MouseButton::Left, 12, 4);
        assert_eq!(state.rename.as_ref().map(|r| r.input.as_str()), Some("README.md"));

        for _ in 0..3 {
            press(&mut state, KeyCode::Backspace);
        }
        for c in ".txt".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        press(&mut state, KeyCode::Enter);

        assert!(state.rename.is_none());
        assert_eq!(label(&state, readme), "README.txt");
    }

    #[test]
    fn empty_rename_keeps_label() {
        let mut state = app();
        let data = find(&state.forest, "data");
        click(&mut state, MouseButton::Right, 10, 2);
        press(&mut state, KeyCode::Enter);
        for _ in 0..4 {
            press(&mut state, KeyCode::Backspace);
        }
        press(&mut state, KeyCode::Esc);
        assert_eq!(label(&state, data), "data");
    }

    #[test]
    fn clicking_elsewhere_commits_rename_and_dispatches() {
        let mut state = app();
        let data = find(&state.forest, "data");
        let src = find(&state.forest, "src");
        click(&mut state, MouseButton::Right, 10, 2);
        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Char('2'));

        // Clicking the field itself keeps editing.
        click(&mut state, MouseButton::Left, 5, 2);
        assert!(state.rename.is_some());

        click(&mut state, MouseButton::Left, 5, 1);
        assert!(state.rename.is_none());
        assert_eq!(label(&state, data), "data2");
        assert_eq!(state.session.active, Some(src));
    }

    #[test]
    fn ctrl_c_quits_from_modal() {
        let mut state = app();
        click(&mut state, MouseButton::Right, 10, 2);
        click(&mut state, MouseButton::Left, 12, 4);
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(state.should_quit);
    }
}
