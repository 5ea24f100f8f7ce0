use std::io::{self, Write};

use safety_framework::{
    domain::{CategoryView, ItemView, SectionView},
    FilterType, FrameworkView,
};

use super::terminal::{is_narrow, terminal_width, Palette};

const MAX_RULE_WIDTH: usize = 80;

/// Draws a [`FrameworkView`] as indented text.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    palette: Palette,
    show_keys: bool,
    rule_width: usize,
}

impl Renderer {
    /// A renderer sized to the current terminal.
    pub fn for_terminal(palette: Palette) -> Self {
        Self {
            palette,
            show_keys: !is_narrow(),
            rule_width: terminal_width()
                .map_or(MAX_RULE_WIDTH, |w| usize::from(w).min(MAX_RULE_WIDTH)),
        }
    }

    /// A renderer with fixed settings, independent of the terminal.
    pub const fn plain() -> Self {
        Self {
            palette: Palette::new(false),
            show_keys: true,
            rule_width: 40,
        }
    }

    pub const fn palette(&self) -> Palette {
        self.palette
    }

    pub fn render<W: Write>(
        &self,
        out: &mut W,
        title: &str,
        view: &FrameworkView,
    ) -> io::Result<()> {
        writeln!(out, "{}", self.palette.heading(title))?;
        writeln!(out, "{}", "─".repeat(self.rule_width))?;

        let search = if view.search_term.is_empty() {
            self.palette.dim("(none)")
        } else {
            format!("\"{}\"", view.search_term)
        };
        writeln!(out, "Search: {search}")?;
        writeln!(out, "Filter: {}", self.filter_bar(view.filter_type))?;
        writeln!(
            out,
            "{}",
            self.palette.dim(&format!(
                "{} matching categories, {} matching items",
                view.visible_categories, view.visible_items
            ))
        )?;

        for section in &view.sections {
            writeln!(out)?;
            self.render_section(out, section)?;
        }
        Ok(())
    }

    fn filter_bar(&self, active: FilterType) -> String {
        FilterType::ALL
            .iter()
            .map(|&filter| {
                if filter == active {
                    self.palette.active(filter.label())
                } else {
                    filter.label().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn render_section<W: Write>(&self, out: &mut W, section: &SectionView) -> io::Result<()> {
        writeln!(
            out,
            "{} {}{}",
            marker(section.expanded),
            self.palette.heading(section.title),
            self.key_hint(section.key)
        )?;

        if section.expanded && section.categories.is_empty() {
            writeln!(out, "    {}", self.palette.dim("No matching categories"))?;
        }

        for category in &section.categories {
            self.render_category(out, section.key, category)?;
        }
        Ok(())
    }

    fn render_category<W: Write>(
        &self,
        out: &mut W,
        section_key: &str,
        category: &CategoryView,
    ) -> io::Result<()> {
        writeln!(
            out,
            "    {} {}{}",
            marker(category.expanded),
            category.name,
            self.key_hint(&format!("{section_key}/{}", category.key))
        )?;

        if let Some(elements) = &category.elements {
            self.render_list(out, "Elements:", elements)?;
        }
        if let Some(measures) = &category.control_measures {
            self.render_list(out, "Control Measures:", measures)?;
        }
        Ok(())
    }

    fn render_list<W: Write>(
        &self,
        out: &mut W,
        heading: &str,
        items: &[ItemView],
    ) -> io::Result<()> {
        writeln!(out, "        {heading}")?;
        if items.is_empty() {
            writeln!(out, "          {}", self.palette.dim("(no matches)"))?;
        }
        for item in items {
            writeln!(out, "          • {}", self.item_text(item))?;
        }
        Ok(())
    }

    fn item_text(&self, item: &ItemView) -> String {
        item.segments
            .iter()
            .map(|segment| {
                if segment.matched {
                    self.palette.matched(segment.text)
                } else {
                    segment.text.to_string()
                }
            })
            .collect()
    }

    fn key_hint(&self, key: &str) -> String {
        if self.show_keys {
            format!("  {}", self.palette.dim(&format!("({key})")))
        } else {
            String::new()
        }
    }
}

const fn marker(expanded: bool) -> &'static str {
    if expanded { "▾" } else { "▸" }
}
