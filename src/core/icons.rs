//! File icon lookup by name suffix.

use std::collections::HashMap;

/// Icon identity, rendered to a glyph by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconRef {
    Css,
    Font,
    Git,
    Html,
    Image,
    Javascript,
    Json,
    Markdown,
    React,
    DefaultFile,
}

/// `suffix -> IconRef` table with a fallback.
#[derive(Debug, Clone)]
pub struct IconTable {
    by_suffix: HashMap<String, IconRef>,
    default: IconRef,
}

impl Default for IconTable {
    fn default() -> Self {
        use IconRef::*;
        let by_suffix = [
            ("css", Css),
            ("ttf", Font),
            ("git", Git),
            ("html", Html),
            ("img", Image),
            ("js", Javascript),
            ("json", Json),
            ("md", Markdown),
            ("jsx", React),
        ]
        .into_iter()
        .map(|(suffix, icon)| (suffix.to_string(), icon))
        .collect();

        Self {
            by_suffix,
            default: DefaultFile,
        }
    }
}

impl IconTable {
    pub fn new(by_suffix: HashMap<String, IconRef>, default: IconRef) -> Self {
        Self { by_suffix, default }
    }

    /// Resolve the icon for a file name.
    ///
    /// Any suffix containing `git` maps to [`IconRef::Git`] before the exact
    /// lookup runs, so `logo.svg.git` and `.gitignore` both get the git icon.
    pub fn resolve(&self, file_name: &str) -> IconRef {
        let suffix = suffix_of(file_name);
        if suffix.contains("git") {
            return IconRef::Git;
        }
        self.by_suffix.get(suffix).copied().unwrap_or(self.default)
    }
}

/// Last `.`-separated segment of `name` (the whole name when there is no dot).
pub fn suffix_of(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}
