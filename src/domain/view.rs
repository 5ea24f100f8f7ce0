// FrameworkView - a borrowed render snapshot of the document for one state.

use serde::Serialize;

use crate::domain::{
    search::{Needle, Segment},
    state::{CategoryPath, ViewState},
    Document, FilterType,
};

/// Options that change how a view is derived without touching the state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Treat every matching category as expanded while a search is active.
    pub expand_matches: bool,
}

/// Everything the presentation layer needs to draw one frame.
///
/// Holds references into the [`Document`], so deriving a view never clones
/// document text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkView<'a> {
    /// The search text the view was derived for.
    pub search_term: &'a str,
    /// The active filter.
    pub filter_type: FilterType,
    /// Every section, in document order.
    pub sections: Vec<SectionView<'a>>,
    /// Categories matching the search, across all sections (expanded or not).
    pub visible_categories: usize,
    /// Items matching the search in the lists the filter shows, across all
    /// matching categories (expanded or not).
    pub visible_items: usize,
}

/// A section header and, when expanded, its visible categories.
#[derive(Debug, Clone, Serialize)]
pub struct SectionView<'a> {
    /// The section key.
    pub key: &'a str,
    /// The section title.
    pub title: &'a str,
    /// Whether the section body is shown.
    pub expanded: bool,
    /// Visible categories. Empty when the section is collapsed.
    pub categories: Vec<CategoryView<'a>>,
}

/// A visible category header and, when expanded, its visible lists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView<'a> {
    /// The category key.
    pub key: &'a str,
    /// The category name.
    pub name: &'a str,
    /// Whether the category body is shown.
    pub expanded: bool,
    /// Matching elements. `None` when collapsed or hidden by the filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<ItemView<'a>>>,
    /// Matching control measures. `None` when collapsed or hidden by the
    /// filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_measures: Option<Vec<ItemView<'a>>>,
}

/// A single list entry with its highlighted runs.
#[derive(Debug, Clone, Serialize)]
pub struct ItemView<'a> {
    /// The full item text.
    pub text: &'a str,
    /// The text split into matched and unmatched runs.
    pub segments: Vec<Segment<'a>>,
}

impl<'a> FrameworkView<'a> {
    /// Derives the view of `document` for `state`.
    #[must_use]
    pub fn derive(document: &'a Document, state: &'a ViewState, options: ViewOptions) -> Self {
        let needle = Needle::new(state.search_term());
        let fields = state.filter_type().visible_fields();
        let force_open = options.expand_matches && !needle.is_empty();

        let mut visible_categories = 0;
        let mut visible_items = 0;
        let mut sections = Vec::with_capacity(document.len());

        for (section_key, section) in document.sections() {
            let section_expanded = state.is_section_expanded(section_key);
            let mut categories = Vec::new();

            for (category_key, category) in section.categories() {
                if !needle.matches_category(category) {
                    continue;
                }

                let elements = fields
                    .show_elements
                    .then(|| needle.filter(category.elements()));
                let control_measures = fields
                    .show_measures
                    .then(|| needle.filter(category.control_measures()));

                visible_categories += 1;
                visible_items += elements.as_ref().map_or(0, Vec::len)
                    + control_measures.as_ref().map_or(0, Vec::len);

                if !section_expanded {
                    continue;
                }

                let expanded = force_open
                    || state.is_category_expanded(&CategoryPath::new(section_key, category_key));
                let items = |list: Option<Vec<&'a str>>| -> Option<Vec<ItemView<'a>>> {
                    list.filter(|_| expanded).map(|list| {
                        list.into_iter()
                            .map(|text| ItemView {
                                text,
                                segments: needle.highlight(text),
                            })
                            .collect()
                    })
                };

                categories.push(CategoryView {
                    key: category_key,
                    name: category.name(),
                    expanded,
                    elements: items(elements),
                    control_measures: items(control_measures),
                });
            }

            sections.push(SectionView {
                key: section_key,
                title: section.title(),
                expanded: section_expanded,
                categories,
            });
        }

        Self {
            search_term: state.search_term(),
            filter_type: state.filter_type(),
            sections,
            visible_categories,
            visible_items,
        }
    }

    /// Looks up a section in the view by key.
    #[must_use]
    pub fn section(&self, key: &str) -> Option<&SectionView<'a>> {
        self.sections.iter().find(|section| section.key == key)
    }
}

impl<'a> SectionView<'a> {
    /// Looks up a visible category in the section by key.
    #[must_use]
    pub fn category(&self, key: &str) -> Option<&CategoryView<'a>> {
        self.categories.iter().find(|category| category.key == key)
    }
}

impl ItemView<'_> {
    /// Whether any part of this item matched the search.
    #[must_use]
    pub fn has_match(&self) -> bool {
        self.segments.iter().any(|segment| segment.matched)
    }
}
