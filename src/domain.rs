//! Domain models for the framework viewer.
//!
//! This module contains the framework document, the search and filter engine,
//! the transient view state, and the derived view that the presentation layer
//! draws.

/// The framework document schema.
pub mod document;
pub use document::{Category, Document, Section};

mod config;
pub use config::{ColorChoice, Config, DEFAULT_TITLE};

mod filter;
pub use filter::{visible_fields, FilterType, ParseFilterError, VisibleFields};

/// Case-insensitive literal search and highlighting.
pub mod search;
pub use search::{filter_items, highlight, matches_search, Needle, Segment};

/// View state and its transitions.
pub mod state;
pub use state::{Action, CategoryPath, ExpandedSection, ParsePathError, ViewState};

mod view;
pub use view::{CategoryView, FrameworkView, ItemView, SectionView, ViewOptions};
