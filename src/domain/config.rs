use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{FilterType, ViewOptions};

/// The heading shown when the configuration does not set one.
pub const DEFAULT_TITLE: &str = "Health & Safety Framework";

/// Configuration for the viewer.
///
/// This struct holds settings that control how the framework is presented:
/// the page heading, the filter selected at start-up, whether searches open
/// matching categories, and terminal colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The heading shown above the framework.
    ///
    /// Falls back to [`DEFAULT_TITLE`] when unset.
    title: Option<String>,

    /// The filter that is active when the viewer starts.
    pub default_filter: FilterType,

    /// Whether an active search opens every matching category.
    ///
    /// When `false` (default), categories keep their own open/closed state
    /// during a search, so a match can sit inside a closed category.
    pub expand_matches: bool,

    /// When to colour the output.
    pub color: ColorChoice,
}

/// When to colour terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Colour when the output stream supports it.
    #[default]
    Auto,
    /// Always colour.
    Always,
    /// Never colour.
    Never,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: None,
            default_filter: FilterType::default(),
            expand_matches: false,
            color: ColorChoice::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration at `path`, or the defaults if there is no file
    /// there.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, String> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The heading shown above the framework.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Sets the heading. An empty title restores the default.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.title = (!title.trim().is_empty()).then_some(title);
    }

    /// The view derivation options implied by this configuration.
    #[must_use]
    pub const fn view_options(&self) -> ViewOptions {
        ViewOptions {
            expand_matches: self.expand_matches,
        }
    }
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,

        #[serde(default)]
        default_filter: FilterType,

        #[serde(default)]
        expand_matches: bool,

        #[serde(default)]
        color: ColorChoice,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                title,
                default_filter,
                expand_matches,
                color,
            } => Self {
                title,
                default_filter,
                expand_matches,
                color,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            title: config.title,
            default_filter: config.default_filter,
            expand_matches: config.expand_matches,
            color: config.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\ntitle = \"LawnScience St Albans\"\ndefault_filter = \"controlMeasures\"\nexpand_matches = true\ncolor = \"never\"\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.title(), "LawnScience St Albans");
        assert_eq!(config.default_filter, FilterType::ControlMeasures);
        assert!(config.expand_matches);
        assert_eq!(config.color, ColorChoice::Never);
        assert!(config.view_options().expand_matches);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_or_default_without_file_is_default() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        assert_eq!(Config::load_or_default(&missing).unwrap(), Config::default());
    }

    #[test]
    fn load_accepts_kebab_case_filter() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndefault_filter = \"control-measures\"\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.default_filter, FilterType::ControlMeasures);
    }

    #[test]
    fn load_invalid_filter_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndefault_filter = \"hazards\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
        assert_eq!(actual.title(), DEFAULT_TITLE);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        let mut config = Config::default();
        config.set_title("Site Safety");
        config.default_filter = FilterType::Elements;
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn blank_title_restores_default() {
        let mut config = Config::default();
        config.set_title("Site Safety");
        config.set_title("  ");

        assert_eq!(config.title(), DEFAULT_TITLE);
    }
}
