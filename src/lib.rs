//! Health-and-Safety Framework Viewer
//!
//! A framework is a static document of sections, each holding categories of
//! elements and control measures. This crate loads such a document, and
//! derives what to show for a given search term, filter and set of expanded
//! sections and categories.

pub mod domain;
pub use domain::{
    Action, Category, CategoryPath, Config, Document, ExpandedSection, FilterType,
    FrameworkView, Section, Segment, ViewOptions, ViewState,
};

/// Loading framework documents from disk.
pub mod storage;
pub use storage::{load_document, LoadError};
