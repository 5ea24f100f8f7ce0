//! Transient view state and the transitions that change it.
//!
//! The state is owned by the presentation layer and mutated only through the
//! named transition methods (or [`ViewState::apply`]). Everything shown on
//! screen is derived from a state snapshot by [`crate::FrameworkView`].

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::Serialize;
use tracing::debug;

use crate::domain::FilterType;

/// Which section bodies are expanded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase", tag = "mode", content = "key")]
pub enum ExpandedSection {
    /// Every section is collapsed.
    #[default]
    None,
    /// Every section is expanded.
    All,
    /// Only the named section is expanded.
    Section(String),
}

impl ExpandedSection {
    /// Whether the section with `key` is expanded.
    #[must_use]
    pub fn includes(&self, key: &str) -> bool {
        match self {
            Self::None => false,
            Self::All => true,
            Self::Section(expanded) => expanded == key,
        }
    }
}

/// Identifies a category by its section key and its own key.
///
/// Written as `section/category`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CategoryPath {
    section: String,
    category: String,
}

impl CategoryPath {
    /// Creates a path from its two keys.
    pub fn new(section: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            category: category.into(),
        }
    }

    /// The section key.
    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    /// The category key within the section.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.section, self.category)
    }
}

/// A category path that is not of the form `section/category`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid category path '{0}' (expected SECTION/CATEGORY)")]
pub struct ParsePathError(String);

impl FromStr for CategoryPath {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((section, category)) if !section.is_empty() && !category.is_empty() => {
                Ok(Self::new(section, category))
            }
            _ => Err(ParsePathError(s.to_string())),
        }
    }
}

/// A user input, expressed as a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The search box now contains this text.
    Search(String),
    /// A section header was clicked.
    ToggleSection(String),
    /// A category header was clicked.
    ToggleCategory(CategoryPath),
    /// A filter button was pressed.
    SetFilter(FilterType),
}

/// The transient state of the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    search_term: String,
    filter_type: FilterType,
    expanded_section: ExpandedSection,
    expanded_categories: BTreeSet<CategoryPath>,
}

impl ViewState {
    /// A fresh state with nothing expanded, an empty search, and the given
    /// filter.
    #[must_use]
    pub fn new(filter_type: FilterType) -> Self {
        Self {
            filter_type,
            ..Self::default()
        }
    }

    /// The current search text.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// The active filter.
    #[must_use]
    pub const fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    /// Which sections are expanded.
    #[must_use]
    pub const fn expanded_section(&self) -> &ExpandedSection {
        &self.expanded_section
    }

    /// Whether the section with `key` is expanded.
    #[must_use]
    pub fn is_section_expanded(&self, key: &str) -> bool {
        self.expanded_section.includes(key)
    }

    /// Whether the category at `path` has been toggled open.
    #[must_use]
    pub fn is_category_expanded(&self, path: &CategoryPath) -> bool {
        self.expanded_categories.contains(path)
    }

    /// Updates the search text.
    ///
    /// A non-empty term expands every section. An empty term collapses every
    /// section. Category expansion is left as it is.
    pub fn on_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.expanded_section = if self.search_term.is_empty() {
            ExpandedSection::None
        } else {
            ExpandedSection::All
        };
        debug!(term = %self.search_term, expanded = ?self.expanded_section, "search changed");
    }

    /// Toggles a section header.
    ///
    /// If the section is the one expanded it collapses; otherwise it becomes
    /// the only expanded section.
    pub fn on_toggle_section(&mut self, key: &str) {
        self.expanded_section = match &self.expanded_section {
            ExpandedSection::Section(expanded) if expanded == key => ExpandedSection::None,
            _ => ExpandedSection::Section(key.to_string()),
        };
        debug!(key, expanded = ?self.expanded_section, "section toggled");
    }

    /// Changes the active filter.
    pub fn on_filter_change(&mut self, filter_type: FilterType) {
        self.filter_type = filter_type;
        debug!(filter = %filter_type, "filter changed");
    }

    /// Toggles a category header.
    pub fn on_toggle_category(&mut self, path: CategoryPath) {
        let expanded = if self.expanded_categories.remove(&path) {
            false
        } else {
            self.expanded_categories.insert(path.clone())
        };
        debug!(%path, expanded, "category toggled");
    }

    /// Applies a single user input.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Search(term) => self.on_search(term),
            Action::ToggleSection(key) => self.on_toggle_section(&key),
            Action::ToggleCategory(path) => self.on_toggle_category(path),
            Action::SetFilter(filter_type) => self.on_filter_change(filter_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ppe() -> CategoryPath {
        CategoryPath::new("induction", "ppe")
    }

    #[test]
    fn starts_collapsed() {
        let state = ViewState::default();

        assert_eq!(state.expanded_section(), &ExpandedSection::None);
        assert_eq!(state.filter_type(), FilterType::All);
        assert!(!state.is_section_expanded("induction"));
    }

    #[test]
    fn search_expands_all_sections() {
        let mut state = ViewState::default();
        state.on_search("glov");

        assert_eq!(state.expanded_section(), &ExpandedSection::All);
        assert!(state.is_section_expanded("induction"));
        assert!(state.is_section_expanded("anything"));
    }

    #[test]
    fn clearing_search_collapses_everything() {
        let mut state = ViewState::default();
        state.on_toggle_section("induction");
        state.on_search("glov");
        state.on_search("");

        assert_eq!(state.expanded_section(), &ExpandedSection::None);
        assert!(!state.is_section_expanded("induction"));
    }

    #[test]
    fn clearing_search_collapses_a_single_open_section() {
        let mut state = ViewState::default();
        state.on_toggle_section("induction");
        state.on_search("");

        assert_eq!(state.expanded_section(), &ExpandedSection::None);
    }

    #[test]
    fn toggling_a_section_opens_then_closes_it() {
        let mut state = ViewState::default();

        state.on_toggle_section("induction");
        assert!(state.is_section_expanded("induction"));
        assert!(!state.is_section_expanded("chemicals"));

        state.on_toggle_section("induction");
        assert_eq!(state.expanded_section(), &ExpandedSection::None);
    }

    #[test]
    fn toggling_another_section_switches_to_it() {
        let mut state = ViewState::default();
        state.on_toggle_section("induction");
        state.on_toggle_section("chemicals");

        assert!(!state.is_section_expanded("induction"));
        assert!(state.is_section_expanded("chemicals"));
    }

    #[test]
    fn toggling_while_all_expanded_narrows_to_one_section() {
        let mut state = ViewState::default();
        state.on_search("glov");
        state.on_toggle_section("chemicals");

        assert_eq!(
            state.expanded_section(),
            &ExpandedSection::Section("chemicals".to_string())
        );
    }

    #[test]
    fn section_keyed_all_is_not_the_sentinel() {
        let mut state = ViewState::default();
        state.on_toggle_section("all");

        assert!(state.is_section_expanded("all"));
        assert!(!state.is_section_expanded("induction"));
    }

    #[test]
    fn category_expansion_survives_search_and_filter_changes() {
        let mut state = ViewState::default();
        state.on_toggle_category(ppe());
        state.on_search("glov");
        state.on_filter_change(FilterType::Elements);
        state.on_search("");

        assert!(state.is_category_expanded(&ppe()));
        assert_eq!(state.filter_type(), FilterType::Elements);
    }

    #[test]
    fn toggling_a_category_twice_closes_it() {
        let mut state = ViewState::default();
        state.on_toggle_category(ppe());
        state.on_toggle_category(ppe());

        assert!(!state.is_category_expanded(&ppe()));
    }

    #[test]
    fn apply_dispatches_to_transitions() {
        let mut state = ViewState::new(FilterType::ControlMeasures);
        for action in [
            Action::ToggleCategory(ppe()),
            Action::Search("check".to_string()),
            Action::SetFilter(FilterType::Elements),
            Action::ToggleSection("induction".to_string()),
        ] {
            state.apply(action);
        }

        assert_eq!(state.search_term(), "check");
        assert_eq!(state.filter_type(), FilterType::Elements);
        assert_eq!(
            state.expanded_section(),
            &ExpandedSection::Section("induction".to_string())
        );
        assert!(state.is_category_expanded(&ppe()));
    }

    #[test]
    fn parses_category_paths() {
        assert_eq!("induction/ppe".parse::<CategoryPath>().unwrap(), ppe());
        assert!("induction".parse::<CategoryPath>().is_err());
        assert!("/ppe".parse::<CategoryPath>().is_err());
        assert!("induction/".parse::<CategoryPath>().is_err());
    }

    #[test]
    fn category_path_display_round_trips() {
        assert_eq!(ppe().to_string().parse::<CategoryPath>().unwrap(), ppe());
    }
}
