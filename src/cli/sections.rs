use std::io::{self, Write};

use clap::Parser;
use safety_framework::Document;
use serde::Serialize;
use tracing::instrument;

use super::terminal::Palette;

#[derive(Debug, Parser, Default)]
#[command(about = "List section keys, titles and category counts")]
pub struct Sections {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Row<'a> {
    key: &'a str,
    title: &'a str,
    categories: usize,
}

impl Sections {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, document: &Document, palette: Palette) -> anyhow::Result<()> {
        let rows = rows(document);

        if rows.is_empty() {
            println!("The framework has no sections.");
            return Ok(());
        }

        match self.output {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
            OutputFormat::Table if self.quiet => {
                for row in &rows {
                    println!("{}\t{}\t{}", row.key, row.title, row.categories);
                }
            }
            OutputFormat::Table => print_table(&mut io::stdout().lock(), &rows, palette)?,
        }
        Ok(())
    }
}

fn rows(document: &Document) -> Vec<Row<'_>> {
    document
        .sections()
        .map(|(key, section)| Row {
            key,
            title: section.title(),
            categories: section.category_count(),
        })
        .collect()
}

fn print_table<W: Write>(out: &mut W, rows: &[Row<'_>], palette: Palette) -> io::Result<()> {
    let key_width = rows
        .iter()
        .map(|row| row.key.chars().count())
        .max()
        .unwrap_or(0)
        .max("Key".len());
    let title_width = rows
        .iter()
        .map(|row| row.title.chars().count())
        .max()
        .unwrap_or(0)
        .max("Title".len());

    writeln!(out, "{:<key_width$}  {:<title_width$}  Categories", "Key", "Title")?;
    writeln!(
        out,
        "{}",
        palette.dim(&format!("{:-<key_width$}  {:-<title_width$}  ----------", "", ""))
    )?;
    for row in rows {
        writeln!(
            out,
            "{:<key_width$}  {:<title_width$}  {:>10}",
            row.key, row.title, row.categories
        )?;
    }

    let total: usize = rows.iter().map(|row| row.categories).sum();
    writeln!(
        out,
        "\n{}",
        palette.dim(&format!("{} sections, {total} categories", rows.len()))
    )
}
