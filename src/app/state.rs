//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    editor::{DeleteFlow, RenameSession},
    session::Session,
    tree::Forest,
};
use crate::ui::tree_widget::TreeWidgetState;

/// Top-level application state.
pub struct AppState {
    /// The projected tree.
    pub forest: Forest,
    /// Active node and context-menu focus.
    pub session: Session,
    /// Widget-level state (keyboard cursor, scroll).
    pub tree_state: TreeWidgetState,
    /// User-configurable keybindings and display options.
    pub config: AppConfig,
    /// Delete confirmation state machine.
    pub delete: DeleteFlow,
    /// Prompt of the delete currently awaiting an answer.
    pub confirm_prompt: Option<String>,
    /// Inline rename in progress, if any.
    pub rename: Option<RenameSession>,
    /// Highlighted entry in the open context menu.
    pub menu_selected: usize,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Last known full terminal size, for mapping pointer positions.
    pub terminal_area: Rect,
}

impl AppState {
    pub fn new(forest: Forest, config: AppConfig) -> Self {
        let status_message = forest
            .is_empty()
            .then(|| "The tree is empty: nothing to show".to_string());
        Self {
            forest,
            session: Session::new(),
            tree_state: TreeWidgetState::default(),
            config,
            delete: DeleteFlow::new(),
            confirm_prompt: None,
            rename: None,
            menu_selected: 0,
            should_quit: false,
            status_message,
            terminal_area: Rect::default(),
        }
    }
}
