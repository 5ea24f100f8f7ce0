use std::path::{Path, PathBuf};

mod browse;
mod config;
mod render;
mod sections;
mod show;
mod terminal;

use anyhow::Context;
use browse::Browse;
use clap::ArgAction;
use safety_framework::{Action, Config, Document};
use sections::Sections;
use show::Show;
use terminal::Palette;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The framework document (.json, .yaml, .yml or .toml)
    #[arg(short, long, default_value = "health-safety-data.json", global = true)]
    data: PathBuf,

    /// The viewer configuration file
    #[arg(short, long, default_value = ".hsf.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Show(Show::default()))
            .run(&self.data, &self.config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show the framework (default)
    ///
    /// Sections and categories start collapsed. Searching expands every
    /// section; categories are opened individually with --open.
    Show(Show),

    /// List the sections of the framework
    Sections(Sections),

    /// Browse the framework interactively
    ///
    /// Reads one command per line from standard input and redraws the
    /// framework after each one. Type 'help' for the list of commands.
    Browse(Browse),

    /// Show or modify configuration settings
    Config(config::Command),
}

impl Command {
    fn run(self, data: &Path, config_path: &Path) -> anyhow::Result<()> {
        let config = Config::load_or_default(config_path).map_err(|e| anyhow::anyhow!("{e}"))?;
        let palette = Palette::for_terminal(config.color);

        match self {
            Self::Show(command) => command.run(&load(data)?, &config, palette)?,
            Self::Sections(command) => command.run(&load(data)?, palette)?,
            Self::Browse(command) => command.run(&load(data)?, &config, palette)?,
            Self::Config(command) => command.run(config_path, config, palette)?,
        }
        Ok(())
    }
}

fn load(path: &Path) -> anyhow::Result<Document> {
    safety_framework::load_document(path)
        .with_context(|| format!("failed to load framework from {}", path.display()))
}

/// Checks that an action only refers to sections and categories that exist.
fn check_keys(document: &Document, action: &Action) -> anyhow::Result<()> {
    match action {
        Action::ToggleSection(key) if document.section(key).is_none() => {
            anyhow::bail!("no section with key '{key}'")
        }
        Action::ToggleCategory(path) if document.category(path).is_none() => {
            anyhow::bail!("no category at '{path}'")
        }
        _ => Ok(()),
    }
}
