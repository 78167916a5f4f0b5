//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::icons::IconRef;

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── tree view ──────────────────────────────────────────────
    pub fn folder_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn file_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn arrow_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    /// The single selected (active) row.
    pub fn active_style() -> Style {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    /// Keyboard cursor row, layered under the active highlight.
    pub fn cursor_style() -> Style {
        Style::default().bg(Color::DarkGray)
    }

    pub fn icon_style(icon: IconRef) -> Style {
        let color = match icon {
            IconRef::Css => Color::Blue,
            IconRef::Font => Color::Red,
            IconRef::Git => Color::LightRed,
            IconRef::Html => Color::LightRed,
            IconRef::Image => Color::Magenta,
            IconRef::Javascript => Color::Yellow,
            IconRef::Json => Color::LightYellow,
            IconRef::Markdown => Color::LightBlue,
            IconRef::React => Color::LightCyan,
            IconRef::DefaultFile => Color::Gray,
        };
        Style::default().fg(color)
    }

    // ── inline rename ──────────────────────────────────────────
    pub fn input_style() -> Style {
        Style::default().fg(Color::White).bg(Color::Black)
    }

    pub fn input_cursor_style() -> Style {
        Style::default()
            .bg(Color::White)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }

    // ── popups ─────────────────────────────────────────────────
    pub fn menu_item_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn menu_selected_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn danger_style() -> Style {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }

    pub fn hint_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
