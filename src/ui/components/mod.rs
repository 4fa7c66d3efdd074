//! Composable UI components.
//!
//! Components return ANSI-styled text instead of printing, so the renderer
//! decides where the frame goes.
//!
//! - [`alert`]: One notification with title, message and optional details
//! - [`status`]: Connection status line with hint

pub mod alert;
pub mod status;

pub use alert::render_alert;
pub use status::render_status;

use crate::ui::helpers::{colored, rule};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NotificationsViewModel;

/// Renders the alert stack separated by rules, plus an overflow line.
///
/// Returns an empty string when there is nothing to show.
#[must_use]
pub fn render_notifications(vm: &NotificationsViewModel, theme: &Theme, cols: usize) -> String {
    if vm.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    for (index, item) in vm.alerts.iter().enumerate() {
        out.push_str(&rule(theme.severity_color(item.severity), cols));
        out.push('\n');
        out.push_str(&render_alert(item, index + 1, theme, cols));
    }
    out.push_str(&rule(&theme.colors.border, cols));
    out.push('\n');

    if vm.hidden_count > 0 {
        let more = format!("+{} more", vm.hidden_count);
        out.push_str(&colored(&theme.colors.text_dim, &more));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionState, Severity};
    use crate::ui::viewmodel::{AlertItem, StatusViewModel};

    fn alert(severity: Severity, details: Option<&str>, code: Option<&str>) -> AlertItem {
        AlertItem {
            id: "error_1_abcdefghi".to_string(),
            severity,
            title: severity.title(),
            message: "Server error. Please try again later.".to_string(),
            details: details.map(String::from),
            code: code.map(String::from),
        }
    }

    #[test]
    fn empty_stack_renders_nothing() {
        let vm = NotificationsViewModel::default();
        assert!(render_notifications(&vm, &Theme::default(), 60).is_empty());
    }

    #[test]
    fn alert_shows_title_message_and_dismiss_slot() {
        let out = render_alert(&alert(Severity::Critical, None, None), 2, &Theme::default(), 60);
        assert!(out.contains("Critical Error"));
        assert!(out.contains("Server error. Please try again later."));
        assert!(out.contains("[2] dismiss"));
        assert!(!out.contains("Code:"));
    }

    #[test]
    fn details_and_code_are_rendered_when_present() {
        let item = alert(Severity::High, Some("relation does not exist"), Some("42P01"));
        let out = render_alert(&item, 1, &Theme::default(), 60);
        assert!(out.contains("relation does not exist"));
        assert!(out.contains("Code: 42P01"));
    }

    #[test]
    fn overflow_count_is_shown() {
        let vm = NotificationsViewModel {
            alerts: vec![alert(Severity::Low, None, None)],
            hidden_count: 4,
        };
        assert!(render_notifications(&vm, &Theme::default(), 40).contains("+4 more"));
    }

    #[test]
    fn disconnected_status_includes_hint() {
        let state = ConnectionState::failed("timeout".into(), chrono::Utc::now());
        let out = render_status(&StatusViewModel::new("Backend", &state), &Theme::default());
        assert!(out.contains("Backend Status: Disconnected"));
        assert!(out.contains(crate::ui::viewmodel::DISCONNECTED_HINT));
    }
}
