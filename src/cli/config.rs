use std::path::Path;

use safety_framework::{domain::ColorChoice, Config, FilterType};
use tracing::instrument;

use crate::cli::terminal::Palette;

const KEYS: &str = "title, default_filter, expand_matches, color";

#[derive(Debug, clap::Parser)]
/// Show or modify viewer configuration
///
/// Configuration is stored in .hsf.toml (see --config) and controls how the
/// framework is presented.
///
/// Available configuration keys:
///   title            Heading shown above the framework
///   `default_filter` Filter selected at start-up (all, elements,
/// control-measures)
///   `expand_matches` Open every matching category while searching (default:
/// false)
///   color            auto, always or never (default: auto)
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show all configuration values
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key to retrieve
        key: String,
    },

    /// Set a configuration value
    ///
    /// Examples:
    ///   hsf config set title "LawnScience St Albans - Health & Safety"
    ///   hsf config set `expand_matches` true
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

impl Command {
    #[instrument(skip(config, palette))]
    pub fn run(self, config_path: &Path, config: Config, palette: Palette) -> anyhow::Result<()> {
        match self.command {
            ConfigCommand::Show => {
                Self::show_config(config_path, &config, palette);
                Ok(())
            }
            ConfigCommand::Get { key } => {
                println!("{}", get(&config, &key)?);
                Ok(())
            }
            ConfigCommand::Set { key, value } => {
                let message = Self::set_config(config_path, config, &key, &value)?;
                println!("{}", palette.success(&message));
                Ok(())
            }
        }
    }

    fn show_config(config_path: &Path, config: &Config, palette: Palette) {
        let source = if config_path.exists() {
            config_path.display().to_string()
        } else {
            format!("{} (not found, using defaults)", config_path.display())
        };

        println!("Configuration: {}", palette.dim(&source));
        println!("  title: {}", config.title());
        println!("  default_filter: {}", config.default_filter);
        println!(
            "  expand_matches: {} ({})",
            config.expand_matches,
            palette.dim(if config.expand_matches {
                "search opens matching categories"
            } else {
                "categories keep their own state"
            })
        );
        println!("  color: {}", color_name(config.color));
    }

    fn set_config(
        config_path: &Path,
        mut config: Config,
        key: &str,
        value: &str,
    ) -> anyhow::Result<String> {
        set(&mut config, key, value)?;
        config
            .save(config_path)
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        Ok(format!("Set {key} = {}", get(&config, key)?))
    }
}

fn get(config: &Config, key: &str) -> anyhow::Result<String> {
    Ok(match key {
        "title" => config.title().to_string(),
        "default_filter" => config.default_filter.to_string(),
        "expand_matches" => config.expand_matches.to_string(),
        "color" => color_name(config.color).to_string(),
        _ => anyhow::bail!("Unknown configuration key: '{key}'\nAvailable keys: {KEYS}"),
    })
}

fn set(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "title" => config.set_title(value),
        "default_filter" => config.default_filter = value.parse::<FilterType>()?,
        "expand_matches" => {
            config.expand_matches = value
                .parse::<bool>()
                .map_err(|_| anyhow::anyhow!("Value must be 'true' or 'false'"))?;
        }
        "color" => {
            config.color = match value.to_ascii_lowercase().as_str() {
                "auto" => ColorChoice::Auto,
                "always" => ColorChoice::Always,
                "never" => ColorChoice::Never,
                _ => anyhow::bail!("Value must be 'auto', 'always' or 'never'"),
            }
        }
        _ => anyhow::bail!("Unknown configuration key: '{key}'\nSupported keys: {KEYS}"),
    }
    Ok(())
}

const fn color_name(color: ColorChoice) -> &'static str {
    match color {
        ColorChoice::Auto => "auto",
        ColorChoice::Always => "always",
        ColorChoice::Never => "never",
    }
}
