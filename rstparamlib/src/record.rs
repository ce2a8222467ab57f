//! Parameter records produced by the table scanner.

use serde::{Deserialize, Serialize};

/// Default value written when a parameter row leaves its default cell blank.
pub const NONE_DEFAULT: &str = "None";

/// One parameter collected from a grid table.
///
/// Fields hold the raw cell fragments in the order they were read, one fragment
/// per non-blank cell across all rows that make up the parameter. Nothing is
/// collapsed here; see [`ParamRecord::normalize`] for the output view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamRecord {
    /// Name fragments, possibly split over several rows
    pub name: Vec<String>,
    /// Type fragments (only the first is used on output)
    #[serde(rename = "type")]
    pub ty: Vec<String>,
    /// Default value fragments (only the first is used on output)
    pub default: Vec<String>,
    /// Description fragments joined with single spaces
    pub description: String,
    /// Prefix in effect when the record was finalized, without the trailing dot
    pub prefix: String,
}

/// A [`ParamRecord`] reduced to the single strings that go into an output line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedParam {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub default: String,
    pub description: String,
    /// Prefix with its trailing dot, or empty
    pub prefix: String,
}

impl NormalizedParam {
    /// Fully qualified name: `prefix` followed by `name`.
    pub fn qualified_name(&self) -> String {
        format!("{}{}", self.prefix, self.name)
    }
}

impl ParamRecord {
    /// Whether name, type and default each have at least one fragment.
    ///
    /// Only complete records are emitted by the scanner.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.ty.is_empty() && !self.default.is_empty()
    }

    /// Reduce the fragments to the values written on output.
    ///
    /// - an empty default becomes `None`
    /// - a non-empty prefix gains a trailing `.`
    /// - a name split over several fragments is concatenated with every
    ///   backslash removed; a single fragment keeps its backslashes
    /// - `*` emphasis markers around the name are dropped, so `**nchan**`
    ///   becomes `nchan`
    /// - only the first type and default fragments are kept
    pub fn normalize(&self) -> NormalizedParam {
        let name = match self.name.as_slice() {
            [] => String::new(),
            [single] => single.trim_matches('*').to_string(),
            fragments => fragments
                .concat()
                .replace('\\', "")
                .trim_matches('*')
                .to_string(),
        };

        let prefix = if self.prefix.is_empty() {
            String::new()
        } else {
            format!("{}.", self.prefix)
        };

        NormalizedParam {
            name,
            ty: self.ty.first().cloned().unwrap_or_default(),
            default: self
                .default
                .first()
                .cloned()
                .unwrap_or_else(|| NONE_DEFAULT.to_string()),
            description: self.description.clone(),
            prefix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn complete_requires_name_type_and_default() {
        let mut record = ParamRecord {
            name: fragments(&["a"]),
            ty: fragments(&["int"]),
            ..Default::default()
        };
        assert!(!record.is_complete());

        record.default.push("1".to_string());
        assert!(record.is_complete());
    }

    #[test]
    fn description_is_not_required() {
        let record = ParamRecord {
            name: fragments(&["a"]),
            ty: fragments(&["int"]),
            default: fragments(&["1"]),
            ..Default::default()
        };
        assert!(record.is_complete());
        assert_eq!(record.normalize().description, "");
    }

    #[test]
    fn split_name_is_joined_without_backslashes() {
        let record = ParamRecord {
            name: fragments(&["foo\\", "bar"]),
            ..Default::default()
        };
        assert_eq!(record.normalize().name, "foobar");
    }

    #[test]
    fn single_name_fragment_keeps_backslashes() {
        let record = ParamRecord {
            name: fragments(&["foo\\_bar"]),
            ..Default::default()
        };
        assert_eq!(record.normalize().name, "foo\\_bar");
    }

    #[test]
    fn bold_name_loses_emphasis_markers() {
        let record = ParamRecord {
            name: fragments(&["**myparam**"]),
            ..Default::default()
        };
        assert_eq!(record.normalize().name, "myparam");

        let split = ParamRecord {
            name: fragments(&["**very\\_long\\", "\\_name**"]),
            ..Default::default()
        };
        assert_eq!(split.normalize().name, "very_long_name");
    }

    #[test]
    fn inner_asterisks_are_kept() {
        let record = ParamRecord {
            name: fragments(&["**Cimager.*.nchan**"]),
            ..Default::default()
        };
        assert_eq!(record.normalize().name, "Cimager.*.nchan");
    }

    #[test]
    fn missing_default_becomes_none() {
        let record = ParamRecord {
            name: fragments(&["a"]),
            ty: fragments(&["int"]),
            ..Default::default()
        };
        assert_eq!(record.normalize().default, NONE_DEFAULT);
    }

    #[test]
    fn only_first_type_and_default_are_kept() {
        let record = ParamRecord {
            name: fragments(&["a"]),
            ty: fragments(&["vector<int>", "(optional)"]),
            default: fragments(&["[1,", "2]"]),
            ..Default::default()
        };
        let param = record.normalize();
        assert_eq!(param.ty, "vector<int>");
        assert_eq!(param.default, "[1,");
    }

    #[test]
    fn prefix_gains_trailing_dot() {
        let record = ParamRecord {
            name: fragments(&["nchan"]),
            prefix: "Cimager".to_string(),
            ..Default::default()
        };
        let param = record.normalize();
        assert_eq!(param.prefix, "Cimager.");
        assert_eq!(param.qualified_name(), "Cimager.nchan");
    }

    #[test]
    fn empty_prefix_stays_empty() {
        let record = ParamRecord {
            name: fragments(&["nchan"]),
            ..Default::default()
        };
        assert_eq!(record.normalize().qualified_name(), "nchan");
    }

    #[test]
    fn serializes_type_field_name() {
        let record = ParamRecord {
            name: fragments(&["a"]),
            ty: fragments(&["int"]),
            default: fragments(&["1"]),
            ..Default::default()
        };
        let json = serde_json::to_value(record.normalize()).unwrap();
        assert_eq!(json["type"], "int");
        assert_eq!(json["name"], "a");
    }
}
