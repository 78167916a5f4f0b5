//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* forest and session and turns them into cells
//! on the terminal. It never mutates the forest.

pub mod glyphs;
pub mod layout;
pub mod popup;
pub mod theme;
pub mod tree_widget;
