//! Filesystem locations for traces and diagnostics.
//!
//! The data directory is resolved in this order:
//!
//! 1. The configured `data_dir` (with `~` expanded)
//! 2. `$XDG_DATA_HOME/app-shell`
//! 3. `$HOME/.local/share/app-shell`
//! 4. `<temp dir>/app-shell`

use std::env;
use std::path::{Path, PathBuf};

/// Directory name used under the platform data location.
pub const APP_DIR_NAME: &str = "app-shell";

/// Returns the directory where the shell writes its trace and diagnostics files.
///
/// The directory is not created.
#[must_use]
pub fn data_dir(configured: Option<&Path>) -> PathBuf {
    resolve_data_dir(
        configured,
        env::var_os("XDG_DATA_HOME").map(PathBuf::from).as_deref(),
        home_dir().as_deref(),
    )
}

fn resolve_data_dir(configured: Option<&Path>, xdg_data_home: Option<&Path>, home: Option<&Path>) -> PathBuf {
    if let Some(dir) = configured {
        return expand_tilde_with(dir, home);
    }
    if let Some(xdg) = xdg_data_home.filter(|p| p.is_absolute()) {
        return xdg.join(APP_DIR_NAME);
    }
    if let Some(home) = home {
        return home.join(".local").join("share").join(APP_DIR_NAME);
    }
    env::temp_dir().join(APP_DIR_NAME)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or any path when `$HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use app_shell::infrastructure::expand_tilde;
/// use std::path::Path;
///
/// assert_eq!(expand_tilde(Path::new("/var/log")), Path::new("/var/log"));
/// ```
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    expand_tilde_with(path, home_dir().as_deref())
}

fn expand_tilde_with(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME").filter(|h| !h.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = "/home/dana";

    #[test]
    fn configured_directory_wins_and_expands_tilde() {
        let dir = resolve_data_dir(Some(Path::new("~/shell-data")), Some(Path::new("/xdg")), Some(Path::new(HOME)));
        assert_eq!(dir, PathBuf::from("/home/dana/shell-data"));
    }

    #[test]
    fn xdg_data_home_is_next() {
        let dir = resolve_data_dir(None, Some(Path::new("/xdg")), Some(Path::new(HOME)));
        assert_eq!(dir, PathBuf::from("/xdg/app-shell"));
    }

    #[test]
    fn relative_xdg_data_home_is_ignored() {
        let dir = resolve_data_dir(None, Some(Path::new("relative")), Some(Path::new(HOME)));
        assert_eq!(dir, PathBuf::from("/home/dana/.local/share/app-shell"));
    }

    #[test]
    fn falls_back_to_temp_dir() {
        assert_eq!(resolve_data_dir(None, None, None), env::temp_dir().join(APP_DIR_NAME));
    }

    #[test]
    fn tilde_only_expands_as_a_leading_component() {
        let home = Some(Path::new(HOME));
        assert_eq!(expand_tilde_with(Path::new("~"), home), PathBuf::from(HOME));
        assert_eq!(expand_tilde_with(Path::new("~user/x"), home), PathBuf::from("~user/x"));
        assert_eq!(expand_tilde_with(Path::new("/abs/~"), home), PathBuf::from("/abs/~"));
    }
}
