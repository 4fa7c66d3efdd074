//! Connection status indicator.

use crate::ui::helpers::colored;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusViewModel;
use std::fmt::Write;

#[must_use]
pub fn render_status(vm: &StatusViewModel, theme: &Theme) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        colored(theme.status_color(vm.status), "●"),
        colored(&theme.colors.text_normal, &format!("{} Status: {}", vm.service, vm.label)),
    );
    if let Some(hint) = vm.hint {
        let _ = writeln!(out, "  {}", colored(&theme.colors.text_dim, hint));
    }
    out
}
