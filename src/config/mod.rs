use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::editor::tools::{Rgba, ToolOptions};
use crate::swatch::{default_catalog, SwatchCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathError {
    MissingHomeDirectory,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("failed to read editor config: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse editor config: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

const APP_DIR: &str = "paintwand";
const APP_CONFIG_FILE: &str = "config.json";

/// Editor settings from `config.json`; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub default_tolerance: Option<u16>,
    #[serde(default)]
    pub brush_width: Option<f32>,
    #[serde(default)]
    pub default_color: Option<String>,
    #[serde(default)]
    pub selection_highlight: Option<String>,
    #[serde(default)]
    pub catalog: Option<Vec<SwatchCategory>>,
}

impl EditorConfig {
    /// Tool defaults with configured overrides applied. Invalid colors fall
    /// back to the built-in value with a warning.
    pub fn tool_options(&self) -> ToolOptions {
        let mut options = ToolOptions::default();
        if let Some(tolerance) = self.default_tolerance {
            options.set_tolerance(tolerance);
        }
        if let Some(width) = self.brush_width {
            options.set_brush_width(width);
        }
        if let Some(color) = parse_paint_color(self.default_color.as_deref()) {
            options.set_color(color);
        }
        if let Some(highlight) = parse_color_override(
            "selection_highlight",
            self.selection_highlight.as_deref(),
        ) {
            options.set_highlight(highlight);
        }
        options
    }

    pub fn catalog(&self) -> Vec<SwatchCategory> {
        match self.catalog.as_deref() {
            Some([]) => {
                tracing::warn!("config catalog is empty; using built-in swatches");
                default_catalog()
            }
            Some(catalog) => catalog.to_vec(),
            None => default_catalog(),
        }
    }
}

/// Paint colors are opaque, so only the `#RRGGBB` form is accepted.
fn parse_paint_color(raw: Option<&str>) -> Option<Rgba> {
    let raw = raw?;
    let color = Some(raw.trim())
        .filter(|hex| hex.starts_with('#') && hex.len() == 7)
        .and_then(Rgba::from_hex);
    if color.is_none() {
        tracing::warn!(key = "default_color", raw, "invalid color in config; expected #RRGGBB");
    }
    color
}

fn parse_color_override(key: &str, raw: Option<&str>) -> Option<Rgba> {
    let raw = raw?;
    let color = Rgba::from_hex(raw);
    if color.is_none() {
        tracing::warn!(key, raw, "invalid color in config; expected #RRGGBB or #RRGGBBAA");
    }
    color
}

pub fn load_editor_config() -> EditorConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_editor_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_editor_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> EditorConfig {
    let path = match editor_config_path_with(xdg_config_home, home) {
        Ok(p) => p,
        Err(err) => {
            tracing::debug!(%err, "no config directory; using defaults");
            return EditorConfig::default();
        }
    };
    if !path.exists() {
        return EditorConfig::default();
    }
    read_editor_config(&path).unwrap_or_else(|err| {
        tracing::warn!(%err, ?path, "failed to load config.json; using defaults");
        EditorConfig::default()
    })
}

pub fn read_editor_config(path: &Path) -> ConfigResult<EditorConfig> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn editor_config_path() -> ConfigResult<PathBuf> {
    let (xdg_config_home, home) = config_env_dirs();
    editor_config_path_with(xdg_config_home.as_deref(), home.as_deref())
}

fn editor_config_path_with(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> ConfigResult<PathBuf> {
    app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home).map_err(
        |error| match error {
            ConfigPathError::MissingHomeDirectory => ConfigError::MissingHomeDirectory,
        },
    )
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::tools::{DEFAULT_HIGHLIGHT, DEFAULT_PAINT_COLOR, MAX_BRUSH_WIDTH};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("paintwand-config-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join(APP_DIR)).expect("scratch dir is writable");
        dir
    }

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "paintwand",
            "config.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/config-root/paintwand/config.json"));
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path(
            "paintwand",
            "config.json",
            Some(Path::new("")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/paintwand/config.json"));
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("paintwand", "config.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn editor_config_path_requires_home_when_xdg_unset() {
        assert!(matches!(
            editor_config_path_with(None, None),
            Err(ConfigError::MissingHomeDirectory)
        ));
        assert_eq!(
            editor_config_path_with(None, Some(Path::new("/tmp/home")))
                .expect("path should resolve"),
            PathBuf::from("/tmp/home/.config/paintwand/config.json")
        );
        assert_eq!(load_editor_config_with(None, None), EditorConfig::default());
    }

    #[test]
    fn default_color_rejects_alpha_and_short_forms() {
        for raw in ["#DCEEF380", "DCEEF3", "#DEF"] {
            let config = EditorConfig {
                default_color: Some(raw.to_string()),
                ..EditorConfig::default()
            };
            assert_eq!(config.tool_options().color, DEFAULT_PAINT_COLOR, "{raw}");
        }
    }

    #[test]
    fn empty_config_yields_default_tool_options() {
        let config: EditorConfig = serde_json::from_str("{}").expect("empty object parses");
        assert_eq!(config.tool_options(), ToolOptions::default());
        assert_eq!(config.catalog().len(), 3);
    }

    #[test]
    fn config_overrides_apply_with_clamping() {
        let config: EditorConfig = serde_json::from_str(
            r##"{
                "default_tolerance": 12,
                "brush_width": 4096,
                "default_color": "#DCEEF3",
                "selection_highlight": "#00FF0080"
            }"##,
        )
        .expect("config parses");

        let options = config.tool_options();
        assert_eq!(options.tolerance.value(), 12);
        assert_eq!(options.brush_width, MAX_BRUSH_WIDTH);
        assert_eq!(options.color, Rgba::opaque(0xDC, 0xEE, 0xF3));
        assert_eq!(options.highlight, Rgba::new(0, 255, 0, 128));
    }

    #[test]
    fn invalid_config_colors_fall_back_to_defaults() {
        let config = EditorConfig {
            default_color: Some("teal".to_string()),
            selection_highlight: Some("#12".to_string()),
            ..EditorConfig::default()
        };
        let options = config.tool_options();
        assert_eq!(options.color, DEFAULT_PAINT_COLOR);
        assert_eq!(options.highlight, DEFAULT_HIGHLIGHT);
    }

    #[test]
    fn empty_catalog_override_falls_back_to_built_in() {
        let config = EditorConfig {
            catalog: Some(Vec::new()),
            ..EditorConfig::default()
        };
        assert_eq!(config.catalog(), default_catalog());
    }

    #[test]
    fn load_editor_config_reads_file_under_xdg_home() {
        let dir = scratch_dir("read");
        std::fs::write(
            dir.join(APP_DIR).join(APP_CONFIG_FILE),
            r#"{"default_tolerance": 40}"#,
        )
        .expect("config is writable");

        let config = load_editor_config_with(Some(&dir), None);
        assert_eq!(config.default_tolerance, Some(40));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_config_file_falls_back_to_defaults() {
        let dir = scratch_dir("malformed");
        let path = dir.join(APP_DIR).join(APP_CONFIG_FILE);
        std::fs::write(&path, "{ not json").expect("config is writable");

        assert!(matches!(
            read_editor_config(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(
            load_editor_config_with(Some(&dir), None),
            EditorConfig::default()
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = scratch_dir("missing");
        assert_eq!(
            load_editor_config_with(Some(&dir), None),
            EditorConfig::default()
        );
        let _ = std::fs::remove_dir_all(&dir);
    }
}
