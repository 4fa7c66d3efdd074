//! Frame rendering.
//!
//! ```text
//! AppState → compute_viewmodel → ShellViewModel → render_frame → ANSI text
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ShellViewModel;
use std::io::{self, Write};

/// Renders the current state to stdout.
///
/// # Errors
///
/// Returns any error from writing to stdout.
pub fn render(state: &AppState, cols: usize) -> io::Result<()> {
    let frame = render_frame(&state.compute_viewmodel(), &state.theme, cols);
    let mut stdout = io::stdout().lock();
    stdout.write_all(frame.as_bytes())?;
    stdout.flush()
}

/// Renders a view model to a string: the status line, then the notification stack.
#[must_use]
pub fn render_frame(vm: &ShellViewModel, theme: &Theme, cols: usize) -> String {
    let mut frame = components::render_status(&vm.status, theme);
    frame.push_str(&components::render_notifications(&vm.notifications, theme, cols));
    frame
}
