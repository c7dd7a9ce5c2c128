use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

/// Top-level configuration for Zocalo.
///
/// Loaded from `~/.config/zocalo/config.toml`. Missing sections fall back
/// to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bar appearance and timing settings.
    pub bar: BarConfig,
    /// File logging settings.
    pub logging: LogConfig,
}

/// Bar appearance and timing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    /// Bar height in logical pixels, scaled by the display DPI.
    pub height: i32,
    /// Foreground-window poll interval in milliseconds.
    pub poll_interval_ms: u64,
    /// Clock format (`%H`/`%M`/`%S`/`%d`/`%Y` placeholders).
    pub clock_format: String,
    /// Bar colors as `#rrggbb` hex strings.
    pub colors: ColorConfig,
}

/// Bar colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub background: String,
    pub highlight: String,
    pub text: String,
}

/// One launchable application in the start menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherItem {
    /// Display name shown in the menu.
    pub name: String,
    /// Executable path or shell URI handed to the OS launcher.
    pub path: String,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            height: 52,
            poll_interval_ms: 500,
            clock_format: "%H:%M".into(),
            colors: ColorConfig::default(),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#1e1e2e".into(),
            highlight: "#45475a".into(),
            text: "#cdd6f4".into(),
        }
    }
}

impl Config {
    /// Clamps bar values to safe ranges.
    ///
    /// Prevents a zero-height bar, a poll loop tight enough to burn a core,
    /// and intervals so long the highlight feels broken.
    pub fn validate(&mut self) {
        self.bar.height = self.bar.height.clamp(24, 160);
        self.bar.poll_interval_ms = self.bar.poll_interval_ms.clamp(100, 5000);
    }
}

/// Returns the built-in start menu entries.
pub fn default_launcher() -> Vec<LauncherItem> {
    [
        ("File Explorer", "explorer.exe"),
        ("Settings", "ms-settings:"),
        ("Notepad", "notepad.exe"),
        ("Calculator", "calc.exe"),
        ("Paint", "mspaint.exe"),
        ("Command Prompt", "cmd.exe"),
        ("PowerShell", "powershell.exe"),
        ("Task Manager", "taskmgr.exe"),
    ]
    .into_iter()
    .map(|(name, path)| LauncherItem {
        name: name.into(),
        path: path.into(),
    })
    .collect()
}

/// Wrapper for deserializing the launcher file.
///
/// The file contains a top-level `[[app]]` array of tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LauncherFile {
    #[serde(default = "default_launcher")]
    pub(crate) app: Vec<LauncherItem>,
}

/// Returns the config directory: `~/.config/zocalo/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("zocalo"))
}

/// Returns the config file path: `~/.config/zocalo/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Returns the launcher file path: `~/.config/zocalo/launcher.toml`.
pub fn launcher_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("launcher.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns `Ok(Config)` on success, or an error string describing what
/// went wrong (IO error, parse error, etc.).
pub fn try_load() -> Result<Config, String> {
    let path = config_path().ok_or("could not determine config path")?;
    let content = std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    let mut config: Config =
        toml::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))?;
    config.validate();
    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// After loading, values are clamped to safe ranges via [`Config::validate`].
pub fn load() -> Config {
    load_or_default(try_load, Config::default)
}

/// Tries to load and parse `launcher.toml`.
pub fn try_load_launcher() -> Result<Vec<LauncherItem>, String> {
    let path = launcher_path().ok_or("could not determine launcher path")?;
    let content = std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    let file: LauncherFile =
        toml::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(file.app)
}

/// Loads the start menu entries from `~/.config/zocalo/launcher.toml`.
///
/// Falls back to the built-in defaults if the file is missing or invalid.
pub fn load_launcher() -> Vec<LauncherItem> {
    load_or_default(try_load_launcher, default_launcher)
}

/// Loads a config value from disk, falling back to defaults.
///
/// Non-existent files silently return defaults; other errors are logged.
fn load_or_default<T>(try_load: impl FnOnce() -> Result<T, String>, default: impl Fn() -> T) -> T {
    match try_load() {
        Ok(val) => val,
        Err(e) if is_file_not_found(&e) => default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            default()
        }
    }
}

/// Returns true if the error message indicates a missing file.
fn is_file_not_found(e: &str) -> bool {
    e.contains("cannot find the path") || e.contains("The system cannot find")
}

pub mod template {
    /// Generates the default `config.toml` contents with explanatory comments.
    ///
    /// This is used by `zocalo init` to create a starter config file that
    /// users can immediately edit.
    pub fn generate_config() -> String {
        r##"# Zocalo configuration
# Location: ~/.config/zocalo/config.toml

[bar]
# Bar height in logical pixels. Scaled by the display DPI at startup.
height = 52
# How often the foreground window is polled, in milliseconds.
poll_interval_ms = 500
# Clock format. Supported placeholders: %H %M %S %d %m %Y, and %% for a
# literal percent sign.
clock_format = "%H:%M"

[bar.colors]
# All colors are "#rrggbb" hex strings.
background = "#1e1e2e"
highlight = "#45475a"
text = "#cdd6f4"

[logging]
# Enable file logging to ~/.config/zocalo/logs/zocalo.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
        .to_string()
    }

    /// Generates the default `launcher.toml` contents.
    pub fn generate_launcher() -> String {
        let mut out = String::from(
            "# Zocalo start menu entries\n\
             # Location: ~/.config/zocalo/launcher.toml\n\
             #\n\
             # Each [[app]] table adds one entry, in order. `path` is handed to\n\
             # the OS launcher, so executables and shell URIs both work.\n",
        );
        for item in super::default_launcher() {
            out.push_str(&format!(
                "\n[[app]]\nname = \"{}\"\npath = \"{}\"\n",
                item.name, item.path
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        // Arrange / Act
        let config = Config::default();

        // Assert
        assert_eq!(config.bar.height, 52);
        assert_eq!(config.bar.poll_interval_ms, 500);
        assert_eq!(config.bar.clock_format, "%H:%M");
    }

    #[test]
    fn default_launcher_is_not_empty() {
        // Act
        let apps = default_launcher();

        // Assert
        assert!(!apps.is_empty());
        assert!(apps.iter().any(|a| a.path == "explorer.exe"));
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_fields() {
        // Arrange
        let toml_str = "[bar]\nheight = 64\n";

        // Act
        let config: Config = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(config.bar.height, 64);
        assert_eq!(config.bar.poll_interval_ms, 500);
    }

    #[test]
    fn validate_clamps_extreme_values() {
        // Arrange
        let mut config = Config::default();
        config.bar.height = 5000;
        config.bar.poll_interval_ms = 1;

        // Act
        config.validate();

        // Assert
        assert_eq!(config.bar.height, 160);
        assert_eq!(config.bar.poll_interval_ms, 100);
    }

    #[test]
    fn launcher_file_parses_app_tables() {
        // Arrange
        let toml_str = "[[app]]\nname = \"Notepad\"\npath = \"notepad.exe\"\n";

        // Act
        let file: LauncherFile = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(file.app.len(), 1);
        assert_eq!(file.app[0].name, "Notepad");
    }

    #[test]
    fn empty_launcher_file_falls_back_to_defaults() {
        // Act
        let file: LauncherFile = toml::from_str("").unwrap();

        // Assert
        assert_eq!(file.app, default_launcher());
    }

    #[test]
    fn config_template_matches_default_values() {
        // Arrange
        let toml_str = template::generate_config();

        // Act
        let config: Config = toml::from_str(&toml_str).unwrap();

        // Assert
        let defaults = Config::default();
        assert_eq!(config.bar.height, defaults.bar.height);
        assert_eq!(config.bar.poll_interval_ms, defaults.bar.poll_interval_ms);
        assert_eq!(config.bar.clock_format, defaults.bar.clock_format);
        assert_eq!(config.bar.colors.background, defaults.bar.colors.background);
        assert_eq!(config.logging.enabled, defaults.logging.enabled);
        assert_eq!(config.logging.level, defaults.logging.level);
    }

    #[test]
    fn launcher_template_matches_default_entries() {
        // Arrange
        let toml_str = template::generate_launcher();

        // Act
        let file: LauncherFile = toml::from_str(&toml_str).unwrap();

        // Assert
        assert_eq!(file.app, default_launcher());
    }
}
