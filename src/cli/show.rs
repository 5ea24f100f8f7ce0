use std::{
    collections::BTreeSet,
    io::{self, Write},
};

use anyhow::Context;
use clap::Parser;
use safety_framework::{
    Action, CategoryPath, Config, Document, FilterType, FrameworkView, ViewState,
};
use tracing::instrument;

use super::{check_keys, render::Renderer, terminal::Palette};

#[derive(Debug, Parser, Default)]
#[command(about = "Show the framework for a search, filter and expansion")]
pub struct Show {
    /// Search text (case-insensitive, matched literally)
    ///
    /// A non-empty search expands every section.
    #[arg(long, short)]
    search: Option<String>,

    /// Which lists to show: all, elements or control-measures
    ///
    /// Defaults to the configured filter.
    #[arg(long, short)]
    filter: Option<FilterType>,

    /// Expand a single section by key
    ///
    /// Applied after the search, so it narrows an expanded search result to
    /// one section.
    #[arg(long, short, value_name = "SECTION")]
    expand: Option<String>,

    /// Open a category, as SECTION/CATEGORY (repeatable)
    ///
    /// Naming the same category twice still opens it once.
    #[arg(long, short, value_name = "SECTION/CATEGORY")]
    open: Vec<CategoryPath>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Show {
    #[instrument(level = "debug", skip_all)]
    pub fn run(
        self,
        document: &Document,
        config: &Config,
        palette: Palette,
    ) -> anyhow::Result<()> {
        let mut state = ViewState::new(config.default_filter);
        for action in self.actions() {
            check_keys(document, &action)?;
            state.apply(action);
        }

        let view = FrameworkView::derive(document, &state, config.view_options());
        let mut stdout = io::stdout().lock();

        match self.output {
            OutputFormat::Pretty => Renderer::for_terminal(palette)
                .render(&mut stdout, config.title(), &view)
                .context("failed to write output")?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut stdout, &view)
                    .context("failed to render json output")?;
                writeln!(stdout)?;
            }
        }
        Ok(())
    }

    /// The flags replayed as user inputs, in the order a user would make
    /// them.
    fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();

        if let Some(filter) = self.filter {
            actions.push(Action::SetFilter(filter));
        }
        let mut opened = BTreeSet::new();
        actions.extend(
            self.open
                .iter()
                .filter(|path| opened.insert(*path))
                .cloned()
                .map(Action::ToggleCategory),
        );
        if let Some(term) = &self.search {
            actions.push(Action::Search(term.clone()));
        }
        if let Some(key) = &self.expand {
            actions.push(Action::ToggleSection(key.clone()));
        }

        actions
    }
}
