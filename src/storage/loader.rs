use std::{ffi::OsStr, fmt, fs, io, path::Path};

use tracing::{debug, instrument};

use crate::domain::Document;

/// The file formats a framework document can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl Format {
    /// Picks a format from the file extension of `path`, ignoring case.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension().and_then(OsStr::to_str)?;
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Parses a document held in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not valid in this format or does not
    /// match the document shape.
    pub fn parse(self, content: &str) -> Result<Document, LoadError> {
        Ok(match self {
            Self::Json => Document::from_json_str(content)?,
            Self::Yaml => Document::from_yaml_str(content)?,
            Self::Toml => Document::from_toml_str(content)?,
        })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        })
    }
}

/// Errors that can occur when loading a framework document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document file was not found.
    #[error("document file not found")]
    NotFound,
    /// An I/O error occurred.
    #[error("failed to read document")]
    Io(#[from] io::Error),
    /// The file extension does not name a supported format.
    #[error("unsupported document format '{0}' (expected .json, .yaml, .yml or .toml)")]
    UnsupportedFormat(String),
    /// The JSON document is malformed.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    /// The YAML document is malformed.
    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The TOML document is malformed.
    #[error("invalid TOML document: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Loads a framework document, choosing the format from the file extension.
///
/// The document is fully validated here: a missing field or a repeated key
/// fails the load rather than producing a partial document.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be read, if its
/// extension is not a supported format, or if its content is malformed.
#[instrument(level = "debug")]
pub fn load_document(path: &Path) -> Result<Document, LoadError> {
    let format = Format::from_path(path).ok_or_else(|| {
        LoadError::UnsupportedFormat(
            path.extension()
                .map_or_else(String::new, |ext| ext.to_string_lossy().into_owned()),
        )
    })?;

    let content = fs::read_to_string(path).map_err(|io_error| match io_error.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound,
        _ => LoadError::Io(io_error),
    })?;

    let document = format.parse(&content)?;
    debug!(%format, sections = document.len(), "loaded document");
    Ok(document)
}
