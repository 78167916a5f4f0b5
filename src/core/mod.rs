//! Core model – input forest, projection, session controller and editors.
//!
//! Nothing in this module depends on any TUI or rendering crate, so every
//! handler can be driven headlessly from tests.

pub mod editor;
pub mod error;
pub mod icons;
pub mod model;
pub mod session;
pub mod tree;
