use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Restricts which of a category's lists are shown.
///
/// Deserializes through [`FromStr`], so files accept the same spellings as the
/// command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum FilterType {
    /// Show both elements and control measures.
    #[default]
    All,
    /// Show elements only.
    Elements,
    /// Show control measures only.
    ControlMeasures,
}

impl FilterType {
    /// Every filter type, in the order they are offered to the user.
    pub const ALL: [Self; 3] = [Self::All, Self::Elements, Self::ControlMeasures];

    /// The human-readable label for this filter.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Elements => "Elements",
            Self::ControlMeasures => "Control Measures",
        }
    }

    /// Which lists this filter makes visible.
    #[must_use]
    pub const fn visible_fields(self) -> VisibleFields {
        VisibleFields {
            show_elements: matches!(self, Self::All | Self::Elements),
            show_measures: matches!(self, Self::All | Self::ControlMeasures),
        }
    }
}

/// Which lists of a category are drawn for a given [`FilterType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleFields {
    /// Whether the elements list is shown.
    pub show_elements: bool,
    /// Whether the control measures list is shown.
    pub show_measures: bool,
}

/// Returns which lists are visible under `filter_type`.
#[must_use]
pub const fn visible_fields(filter_type: FilterType) -> VisibleFields {
    filter_type.visible_fields()
}

/// The identifier used for a filter type in files and on the command line.
impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Elements => "elements",
            Self::ControlMeasures => "controlMeasures",
        })
    }
}

/// A filter name that is not one of the known filter types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown filter type '{0}' (expected all, elements or control-measures)")]
pub struct ParseFilterError(String);

impl FromStr for FilterType {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "all" => Ok(Self::All),
            "elements" => Ok(Self::Elements),
            "controlmeasures" | "measures" => Ok(Self::ControlMeasures),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

impl TryFrom<String> for FilterType {
    type Error = ParseFilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(FilterType::All, true, true; "all shows both")]
    #[test_case(FilterType::Elements, true, false; "elements only")]
    #[test_case(FilterType::ControlMeasures, false, true; "measures only")]
    fn visible_fields_per_filter(filter: FilterType, elements: bool, measures: bool) {
        assert_eq!(
            visible_fields(filter),
            VisibleFields {
                show_elements: elements,
                show_measures: measures,
            }
        );
    }

    #[test_case("all", FilterType::All)]
    #[test_case("Elements", FilterType::Elements)]
    #[test_case("controlMeasures", FilterType::ControlMeasures)]
    #[test_case("control-measures", FilterType::ControlMeasures)]
    #[test_case("control_measures", FilterType::ControlMeasures)]
    #[test_case("measures", FilterType::ControlMeasures)]
    fn parses_filter_names(input: &str, expected: FilterType) {
        assert_eq!(input.parse::<FilterType>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_filter() {
        let error = "hazards".parse::<FilterType>().unwrap_err();
        assert_eq!(error, ParseFilterError("hazards".to_string()));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for filter in FilterType::ALL {
            assert_eq!(filter.to_string().parse::<FilterType>().unwrap(), filter);
        }
    }

    #[test]
    fn serde_uses_camel_case() {
        let json = serde_json::to_string(&FilterType::ControlMeasures).unwrap();
        assert_eq!(json, "\"controlMeasures\"");
    }

    #[test_case("\"controlMeasures\""; "camel case")]
    #[test_case("\"control-measures\""; "kebab case")]
    #[test_case("\"Control Measures\""; "label")]
    fn deserializes_command_line_spellings(json: &str) {
        let filter: FilterType = serde_json::from_str(json).unwrap();
        assert_eq!(filter, FilterType::ControlMeasures);
    }

    #[test]
    fn deserialize_rejects_unknown_filter() {
        let error = serde_json::from_str::<FilterType>("\"hazards\"").unwrap_err();
        assert!(error.to_string().contains("unknown filter type 'hazards'"), "{error}");
    }
}
