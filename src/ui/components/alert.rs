//! Notification alert component.
//!
//! ```text
//! ✖ Critical Error                         [1] dismiss
//!   Server error. Please try again later.
//!   relation "users" does not exist
//!   Code: 42P01
//! ```

use crate::domain::Severity;
use crate::ui::helpers::{colored, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::AlertItem;
use std::fmt::Write;

const INDENT: &str = "  ";

const fn severity_icon(severity: Severity) -> char {
    match severity {
        Severity::Critical => '✖',
        Severity::High => '▲',
        Severity::Medium => '●',
        Severity::Low => 'ℹ',
    }
}

/// Renders one alert. `position` is the 1-based slot shown as the dismiss key.
#[must_use]
pub fn render_alert(item: &AlertItem, position: usize, theme: &Theme, cols: usize) -> String {
    let accent = theme.severity_color(item.severity);
    let body_width = cols.saturating_sub(INDENT.len());

    let heading = format!("{} {}", severity_icon(item.severity), item.title);
    let dismiss = format!("[{position}] dismiss");
    let gap = cols.saturating_sub(heading.chars().count() + dismiss.len()).max(1);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}{}{}{}{}",
        Theme::bold(),
        colored(accent, &heading),
        " ".repeat(gap),
        Theme::dim(),
        colored(&theme.colors.text_dim, &dismiss),
    );
    let _ = writeln!(
        out,
        "{INDENT}{}",
        colored(&theme.colors.text_normal, &truncate(&item.message, body_width))
    );
    if let Some(details) = &item.details {
        let _ = writeln!(
            out,
            "{INDENT}{}",
            colored(&theme.colors.text_dim, &truncate(details, body_width))
        );
    }
    if let Some(code) = &item.code {
        let _ = writeln!(
            out,
            "{INDENT}{}",
            colored(&theme.colors.text_dim, &format!("Code: {code}"))
        );
    }
    out
}
