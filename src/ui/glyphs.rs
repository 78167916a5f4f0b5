//! Glyphs for icons, in Nerd Font or plain ASCII flavour.

use crate::config::IconStyle;
use crate::core::icons::IconRef;

/// Disclosure arrow shown before every folder, empty ones included.
pub fn arrow(expanded: bool, style: IconStyle) -> &'static str {
    match (style, expanded) {
        (IconStyle::Nerd, true) => "▼ ",
        (IconStyle::Nerd, false) => "▶ ",
        (IconStyle::Ascii, true) => "v ",
        (IconStyle::Ascii, false) => "> ",
    }
}

/// Closed or open folder icon.
pub fn folder(expanded: bool, style: IconStyle) -> &'static str {
    match (style, expanded) {
        (IconStyle::Nerd, true) => "\u{f115} ",
        (IconStyle::Nerd, false) => "\u{f114} ",
        (IconStyle::Ascii, true) => "[-] ",
        (IconStyle::Ascii, false) => "[+] ",
    }
}

pub fn file(icon: IconRef, style: IconStyle) -> &'static str {
    match style {
        IconStyle::Nerd => match icon {
            IconRef::Css => "\u{e749} ",
            IconRef::Font => "\u{f031} ",
            IconRef::Git => "\u{e702} ",
            IconRef::Html => "\u{e736} ",
            IconRef::Image => "\u{f1c5} ",
            IconRef::Javascript => "\u{e74e} ",
            IconRef::Json => "\u{e60b} ",
            IconRef::Markdown => "\u{e73e} ",
            IconRef::React => "\u{e7ba} ",
            IconRef::DefaultFile => "\u{f15b} ",
        },
        IconStyle::Ascii => match icon {
            IconRef::Css => "[css] ",
            IconRef::Font => "[ttf] ",
            IconRef::Git => "[git] ",
            IconRef::Html => "[htm] ",
            IconRef::Image => "[img] ",
            IconRef::Javascript => "[js]  ",
            IconRef::Json => "[{}]  ",
            IconRef::Markdown => "[md]  ",
            IconRef::React => "[jsx] ",
            IconRef::DefaultFile => "[ ]   ",
        },
    }
}
