use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use safety_framework::{Action, Config, Document, FrameworkView, ViewState};
use tracing::{debug, instrument};

use super::{
    check_keys,
    render::Renderer,
    terminal::Palette,
};

const HELP: &str = "\
Commands:
  /TEXT               search for TEXT ('/' alone clears the search)
  s SECTION           expand or collapse a section
  c SECTION/CATEGORY  expand or collapse a category
  f FILTER            show all, elements or control-measures
  help                show this message
  q                   quit";

#[derive(Debug, Parser, Default)]
#[command(about = "Browse the framework interactively")]
pub struct Browse {}

impl Browse {
    #[instrument(level = "debug", skip_all)]
    pub fn run(
        self,
        document: &Document,
        config: &Config,
        palette: Palette,
    ) -> anyhow::Result<()> {
        let renderer = Renderer::for_terminal(palette);
        let stdin = io::stdin();
        Session::new(document, config, renderer).run(stdin.lock(), io::stdout().lock())
    }
}

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Apply(Action),
    Redraw,
    Help,
    Quit,
}

fn parse_input(line: &str) -> anyhow::Result<Input> {
    let line = line.trim_end_matches(['\r', '\n']);

    if let Some(term) = line.strip_prefix('/') {
        return Ok(Input::Apply(Action::Search(term.to_string())));
    }

    let line = line.trim();
    let (command, argument) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, rest)| (command, rest.trim()));

    let input = match (command, argument) {
        ("", _) => Input::Redraw,
        ("q" | "quit" | "exit", "") => Input::Quit,
        ("help" | "?" | "h", "") => Input::Help,
        ("s" | "section", key) if !key.is_empty() => {
            Input::Apply(Action::ToggleSection(key.to_string()))
        }
        ("c" | "category", path) if !path.is_empty() => {
            Input::Apply(Action::ToggleCategory(path.parse()?))
        }
        ("f" | "filter", filter) if !filter.is_empty() => {
            Input::Apply(Action::SetFilter(filter.parse()?))
        }
        _ => anyhow::bail!("unrecognised command '{line}' (type 'help' for commands)"),
    };
    Ok(input)
}

/// The interactive loop: read a line, apply it, redraw.
struct Session<'a> {
    document: &'a Document,
    config: &'a Config,
    renderer: Renderer,
    state: ViewState,
}

impl<'a> Session<'a> {
    fn new(document: &'a Document, config: &'a Config, renderer: Renderer) -> Self {
        Self {
            document,
            config,
            renderer,
            state: ViewState::new(config.default_filter),
        }
    }

    fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> anyhow::Result<()> {
        self.draw(&mut out)?;
        writeln!(out, "\n{HELP}")?;

        for line in input.lines() {
            let line = line.context("failed to read input")?;
            match parse_input(&line).and_then(|input| self.validate(input)) {
                Ok(Input::Quit) => break,
                Ok(Input::Help) => writeln!(out, "{HELP}")?,
                Ok(Input::Redraw) => self.draw(&mut out)?,
                Ok(Input::Apply(action)) => {
                    debug!(?action, "applying input");
                    self.state.apply(action);
                    self.draw(&mut out)?;
                }
                Err(error) => writeln!(
                    out,
                    "{}",
                    self.renderer.palette().warning(&format!("error: {error}"))
                )?,
            }
            out.flush()?;
        }
        Ok(())
    }

    fn validate(&self, input: Input) -> anyhow::Result<Input> {
        if let Input::Apply(action) = &input {
            check_keys(self.document, action)?;
        }
        Ok(input)
    }

    fn draw<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let view = FrameworkView::derive(self.document, &self.state, self.config.view_options());
        writeln!(out)?;
        self.renderer.render(out, self.config.title(), &view)?;
        write!(out, "\n> ")?;
        out.flush()?;
        Ok(())
    }
}
