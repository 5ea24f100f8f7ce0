//! The framework document: sections, categories, elements and control
//! measures.
//!
//! The document is read-only once loaded. Section and category keys are kept
//! in the order they appear in the source file, since that order is the
//! display order.

use std::{fmt, marker::PhantomData};

use indexmap::IndexMap;
use serde::{
    de::{self, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};

use crate::domain::state::CategoryPath;

/// The whole framework, as an ordered mapping from section key to
/// [`Section`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    sections: Keyed<Section>,
}

impl Document {
    /// Parses a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid JSON, if a required field is
    /// missing, or if a section or category key is repeated.
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Parses a document from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid YAML or does not match the
    /// document shape.
    pub fn from_yaml_str(input: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(input)
    }

    /// Parses a document from TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid TOML or does not match the
    /// document shape.
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Iterates over `(key, section)` pairs in document order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter()
    }

    /// Looks up a section by key.
    #[must_use]
    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections.get(key)
    }

    /// Looks up a category by its section and category keys.
    #[must_use]
    pub fn category(&self, path: &CategoryPath) -> Option<&Category> {
        self.section(path.section())?.category(path.category())
    }

    /// The number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the document has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// A top-level grouping with a title and a set of categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    title: String,
    categories: Keyed<Category>,
}

impl Section {
    /// The display title of the section.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Iterates over `(key, category)` pairs in document order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.categories.iter()
    }

    /// Looks up a category by key.
    #[must_use]
    pub fn category(&self, key: &str) -> Option<&Category> {
        self.categories.get(key)
    }

    /// The number of categories in this section.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

/// A named grouping holding two parallel lists: elements and control
/// measures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    name: String,
    elements: Vec<String>,
    control_measures: Vec<String>,
}

impl Category {
    /// Creates a category.
    pub fn new(
        name: impl Into<String>,
        elements: impl IntoIterator<Item = impl Into<String>>,
        control_measures: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            elements: elements.into_iter().map(Into::into).collect(),
            control_measures: control_measures.into_iter().map(Into::into).collect(),
        }
    }

    /// The display name of the category.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The descriptive items of the category, in display order.
    #[must_use]
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// The mitigation items of the category, in display order.
    #[must_use]
    pub fn control_measures(&self) -> &[String] {
        &self.control_measures
    }
}

/// An insertion-ordered map with unique string keys.
///
/// Deserialization rejects repeated keys instead of silently keeping the last
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
struct Keyed<T>(IndexMap<String, T>);

impl<T> Keyed<T> {
    fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    fn get(&self, key: &str) -> Option<&T> {
        self.0.get(key)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Keyed<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(KeyedVisitor(PhantomData))
    }
}

struct KeyedVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for KeyedVisitor<T> {
    type Value = Keyed<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map with unique keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, T>()? {
            if entries.contains_key(&key) {
                return Err(de::Error::custom(format!("duplicate key `{key}`")));
            }
            entries.insert(key, value);
        }
        Ok(Keyed(entries))
    }
}
