// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! # Path Resolution Order
//!
//! Paths are resolved in the following priority order:
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--config-dir`, `--img-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`ULTIMATE_GUI_CONFIG_DIR`, `ULTIMATE_GUI_IMG_DIR`)
//! 4. **Platform default** - via `dirs` crate, or next to the executable for the image folder
//!
//! The image folder has one more step between 3 and 4: the `[gallery] folder`
//! entry of `settings.toml`, passed in by the caller.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "UltimateGui";

/// Name of the gallery folder created next to the executable.
pub const IMG_FOLDER_NAME: &str = "img";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ULTIMATE_GUI_CONFIG_DIR";

/// Environment variable to override the gallery image folder.
pub const ENV_IMG_DIR: &str = "ULTIMATE_GUI_IMG_DIR";

#[derive(Debug, Default)]
struct CliOverrides {
    config_dir: Option<PathBuf>,
    img_dir: Option<PathBuf>,
}

/// Global CLI overrides (set once at startup).
static CLI_OVERRIDES: OnceLock<CliOverrides> = OnceLock::new();

/// Initializes CLI overrides for the config and image directories.
///
/// Should be called once at startup, before any path is resolved. Later calls
/// are ignored and logged.
pub fn init_cli_overrides(config_dir: Option<String>, img_dir: Option<String>) {
    let overrides = CliOverrides {
        config_dir: config_dir.map(PathBuf::from),
        img_dir: img_dir.map(PathBuf::from),
    };
    if CLI_OVERRIDES.set(overrides).is_err() {
        tracing::warn!("CLI path overrides already initialized; ignoring");
    }
}

fn cli_overrides() -> Option<&'static CliOverrides> {
    CLI_OVERRIDES.get()
}

fn env_path(var: &str) -> Option<PathBuf> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => Some(PathBuf::from(value)),
        _ => None,
    }
}

/// Returns the application config directory path (where `settings.toml` lives).
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory path with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = cli_overrides().and_then(|o| o.config_dir.clone()) {
        return Some(path);
    }

    if let Some(path) = env_path(ENV_CONFIG_DIR) {
        return Some(path);
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the gallery image folder.
///
/// `configured` is the `[gallery] folder` value from the settings file.
/// Falls back to `img/` next to the running executable, then to `img/` in
/// the working directory.
pub fn get_img_dir(configured: Option<&Path>) -> PathBuf {
    get_img_dir_with_override(None, configured)
}

/// Returns the gallery image folder with an optional override.
pub fn get_img_dir_with_override(
    override_path: Option<PathBuf>,
    configured: Option<&Path>,
) -> PathBuf {
    if let Some(path) = override_path {
        return path;
    }

    if let Some(path) = cli_overrides().and_then(|o| o.img_dir.clone()) {
        return path;
    }

    if let Some(path) = env_path(ENV_IMG_DIR) {
        return path;
    }

    if let Some(path) = configured {
        return path.to_path_buf();
    }

    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(IMG_FOLDER_NAME)))
        .unwrap_or_else(|| PathBuf::from(IMG_FOLDER_NAME))
}

/// Creates the gallery folder if it does not exist yet.
pub fn ensure_img_dir(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to prevent parallel tests from interfering with each other's env vars
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn app_config_dir_contains_app_name() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_CONFIG_DIR);

        if let Some(path) = get_app_config_dir() {
            assert!(
                path.to_string_lossy().contains(APP_NAME),
                "App config dir should contain app name"
            );
        }
    }

    #[test]
    fn override_path_takes_precedence_for_config_dir() {
        let override_path = PathBuf::from("/custom/config/path");
        let result = get_app_config_dir_with_override(Some(override_path.clone()));
        assert_eq!(result, Some(override_path));
    }

    #[test]
    fn env_var_overrides_default_config_dir() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let test_path = "/test/config/dir";
        std::env::set_var(ENV_CONFIG_DIR, test_path);

        let result = get_app_config_dir();
        assert_eq!(result, Some(PathBuf::from(test_path)));

        std::env::remove_var(ENV_CONFIG_DIR);
    }

    #[test]
    fn empty_env_var_uses_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "");

        if let Some(path) = get_app_config_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }

        std::env::remove_var(ENV_CONFIG_DIR);
    }

    #[test]
    fn img_dir_env_beats_configured_folder() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_IMG_DIR, "/env/img");

        let result = get_img_dir(Some(Path::new("/configured/img")));
        assert_eq!(result, PathBuf::from("/env/img"));

        std::env::remove_var(ENV_IMG_DIR);
    }

    #[test]
    fn img_dir_uses_configured_folder_without_env() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_IMG_DIR);

        let result = get_img_dir(Some(Path::new("/configured/img")));
        assert_eq!(result, PathBuf::from("/configured/img"));
    }

    #[test]
    fn img_dir_defaults_to_folder_named_img() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_IMG_DIR);

        let result = get_img_dir(None);
        assert_eq!(result.file_name().and_then(|n| n.to_str()), Some("img"));
    }

    #[test]
    fn ensure_img_dir_creates_nested_folder() {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let target = temp_dir.path().join("a").join("img");
        ensure_img_dir(&target).expect("create img dir");
        assert!(target.is_dir());
    }
}
