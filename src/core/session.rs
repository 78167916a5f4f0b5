//! Interaction controller: the session-wide singletons and the handlers that
//! toggle, select and open/dismiss the context menu.
//!
//! Every handler takes the [`Session`] and the [`Forest`] explicitly; there is
//! no ambient global state.

use super::error::Result;
use super::tree::{Forest, NodeId};

/// Screen position the context menu is anchored at (column, row).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuAnchor {
    pub column: u16,
    pub row: u16,
}

/// Session context passed to every handler.
#[derive(Debug, Default)]
pub struct Session {
    /// The single highlighted node, if any.
    pub active: Option<NodeId>,
    /// Node the context menu was last opened on. Left stale on dismiss.
    pub menu_focus: Option<NodeId>,
    /// `Some` while the context menu is open.
    pub menu: Option<MenuAnchor>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a folder's collapse state (files are never toggled) and make
    /// `id` the only active node.
    pub fn select_or_toggle(&mut self, forest: &mut Forest, id: NodeId) -> Result<()> {
        let node = forest.live_mut(id)?;
        if let Some(state) = node.collapse {
            node.collapse = Some(state.toggled());
            tracing::debug!(id, label = %node.label, state = ?node.collapse, "toggled folder");
        }

        for other in forest.live_ids() {
            if let Ok(n) = forest.live_mut(other) {
                n.active = other == id;
            }
        }
        self.active = Some(id);
        tracing::debug!(id, "selected");
        Ok(())
    }

    /// Open the context menu on `target` at `anchor`.
    ///
    /// When the pointer did not land on a node the menu stays closed and any
    /// open menu is dismissed. Returns whether the menu is now open.
    pub fn open_context_menu(
        &mut self,
        forest: &Forest,
        target: Option<NodeId>,
        anchor: MenuAnchor,
    ) -> bool {
        match target.filter(|&id| forest.is_live(id)) {
            Some(id) => {
                self.menu_focus = Some(id);
                self.menu = Some(anchor);
                tracing::debug!(id, ?anchor, "context menu opened");
                true
            }
            None => {
                self.dismiss_context_menu();
                false
            }
        }
    }

    pub fn dismiss_context_menu(&mut self) {
        if self.menu.take().is_some() {
            tracing::debug!("context menu dismissed");
        }
    }

    pub fn menu_open(&self) -> bool {
        self.menu.is_some()
    }

    /// Forget references into a subtree that has just been removed.
    pub fn forget_detached(&mut self, forest: &Forest) {
        if self.active.is_some_and(|id| !forest.is_live(id)) {
            self.active = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::tests::{arb_forest, find, sample_forest};
    use crate::core::tree::{CollapseState, Forest};
    use crate::core::icons::IconTable;
    use proptest::prelude::*;

    const AT: MenuAnchor = MenuAnchor { column: 4, row: 2 };

    fn active_count(forest: &Forest) -> usize {
        forest
            .live_ids()
            .into_iter()
            .filter(|&id| forest.live(id).unwrap().active)
            .count()
    }

    fn collapse_states(forest: &Forest) -> Vec<Option<CollapseState>> {
        forest
            .live_ids()
            .into_iter()
            .map(|id| forest.live(id).unwrap().collapse)
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            .. ProptestConfig::default()
        })]

        /// Whatever is selected, exactly that one node is active afterwards.
        #[test]
        fn any_select_sequence_leaves_one_active(
            input in arb_forest(),
            picks in prop::collection::vec(any::<usize>(), 1..24),
        ) {
            let mut forest = Forest::project(&input, &IconTable::default());
            let ids = forest.live_ids();
            prop_assume!(!ids.is_empty());

            let mut session = Session::new();
            for pick in picks {
                let id = ids[pick % ids.len()];
                session.select_or_toggle(&mut forest, id).unwrap();
                prop_assert_eq!(active_count(&forest), 1);
                prop_assert!(forest.live(id).unwrap().active);
                prop_assert_eq!(session.active, Some(id));
            }
        }

        /// Selecting a node twice restores every collapse state, and
        /// selecting a file never changes any of them.
        #[test]
        fn double_select_restores_collapse_and_files_never_toggle(
            input in arb_forest(),
            picks in prop::collection::vec(any::<usize>(), 1..24),
        ) {
            let mut forest = Forest::project(&input, &IconTable::default());
            let ids = forest.live_ids();
            prop_assume!(!ids.is_empty());

            let mut session = Session::new();
            for pick in picks {
                let id = ids[pick % ids.len()];
                let before = collapse_states(&forest);

                session.select_or_toggle(&mut forest, id).unwrap();
                if !forest.live(id).unwrap().is_folder() {
                    prop_assert_eq!(&collapse_states(&forest), &before);
                }
                session.select_or_toggle(&mut forest, id).unwrap();
                prop_assert_eq!(&collapse_states(&forest), &before);

                // Leave the forest in a mixed state for the next pick.
                session.select_or_toggle(&mut forest, id).unwrap();
            }
        }
    }

    #[test]
    fn toggling_folder_expands_then_collapses() {
        let mut forest = sample_forest();
        let mut session = Session::new();
        let src = find(&forest, "src");

        session.select_or_toggle(&mut forest, src).unwrap();
        assert_eq!(forest.live(src).unwrap().collapse, Some(CollapseState::Expanded));
        session.select_or_toggle(&mut forest, src).unwrap();
        assert_eq!(forest.live(src).unwrap().collapse, Some(CollapseState::Collapsed));
    }

    #[test]
    fn empty_folder_still_toggles() {
        let mut forest = sample_forest();
        let mut session = Session::new();
        let data = find(&forest, "data");
        session.select_or_toggle(&mut forest, data).unwrap();
        assert!(forest.live(data).unwrap().is_expanded());
    }

    #[test]
    fn selecting_file_leaves_folders_alone() {
        let mut forest = sample_forest();
        let mut session = Session::new();
        let src = find(&forest, "src");
        session.select_or_toggle(&mut forest, src).unwrap();

        let index = find(&forest, "index.js");
        session.select_or_toggle(&mut forest, index).unwrap();

        assert!(forest.live(src).unwrap().is_expanded());
        assert_eq!(forest.live(index).unwrap().collapse, None);
        assert_eq!(session.active, Some(index));
    }

    #[test]
    fn at_most_one_node_is_active() {
        let mut forest = sample_forest();
        let mut session = Session::new();
        assert_eq!(active_count(&forest), 0);

        for label in ["src", "README.md", "components", "Header.jsx", "src", ".gitignore"] {
            let id = find(&forest, label);
            session.select_or_toggle(&mut forest, id).unwrap();
            assert_eq!(active_count(&forest), 1);
            assert!(forest.live(id).unwrap().active);
            assert_eq!(session.active, Some(id));
        }
    }

    #[test]
    fn selecting_detached_node_is_rejected() {
        let mut forest = sample_forest();
        let mut session = Session::new();
        let readme = find(&forest, "README.md");
        forest.detach(readme).unwrap();
        assert!(session.select_or_toggle(&mut forest, readme).is_err());
        assert_eq!(session.active, None);
    }

    #[test]
    fn context_menu_opens_on_node() {
        let forest = sample_forest();
        let mut session = Session::new();
        let readme = find(&forest, "README.md");

        assert!(session.open_context_menu(&forest, Some(readme), AT));
        assert_eq!(session.menu_focus, Some(readme));
        assert_eq!(session.menu, Some(AT));
    }

    #[test]
    fn context_menu_without_target_does_not_open_and_dismisses() {
        let forest = sample_forest();
        let mut session = Session::new();
        let readme = find(&forest, "README.md");
        session.open_context_menu(&forest, Some(readme), AT);

        assert!(!session.open_context_menu(&forest, None, AT));
        assert!(!session.menu_open());
        // Focus is not cleared, only the open state.
        assert_eq!(session.menu_focus, Some(readme));
    }

    #[test]
    fn dismiss_leaves_focus_stale() {
        let forest = sample_forest();
        let mut session = Session::new();
        let src = find(&forest, "src");
        session.open_context_menu(&forest, Some(src), AT);
        session.dismiss_context_menu();
        assert!(!session.menu_open());
        assert_eq!(session.menu_focus, Some(src));
    }

    #[test]
    fn forget_detached_clears_removed_active() {
        let mut forest = sample_forest();
        let mut session = Session::new();
        let header = find(&forest, "Header.jsx");
        session.select_or_toggle(&mut forest, header).unwrap();
        let components = find(&forest, "components");
        forest.detach(components).unwrap();
        session.forget_detached(&forest);
        assert_eq!(session.active, None);
    }
}
