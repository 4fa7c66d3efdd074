//! Shared text helpers for the components.

use crate::ui::theme::Theme;

/// Cuts `text` to at most `max` characters, ending with `…` when shortened.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

/// A full-width horizontal rule in `color`.
#[must_use]
pub fn rule(color: &str, cols: usize) -> String {
    format!("{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset())
}

/// Wraps `text` in `color` and resets afterwards.
#[must_use]
pub fn colored(color: &str, text: &str) -> String {
    format!("{}{text}{}", Theme::fg(color), Theme::reset())
}
