use std::collections::BTreeMap;
use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Flat string-keyed field set posted by the filing form.
///
/// Repeated groups use `group[index][field]`, singleton objects use
/// `group[field]`, and scalars are plain keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value for `key`, or the empty string when absent.
    pub fn text(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// Value for `key` when present and non-blank.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }

    /// Value for `key`, falling back to `default` when absent.
    pub fn text_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for FormFields {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self(value)
    }
}

impl From<std::collections::HashMap<String, String>> for FormFields {
    fn from(value: std::collections::HashMap<String, String>) -> Self {
        value.into_iter().collect()
    }
}

// JSON clients post counts as numbers and toggles as booleans; the field set
// itself stays string-typed so urlencoded and JSON bodies decode alike.
impl<'de> Deserialize<'de> for FormFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FormFieldsVisitor)
    }
}

struct FormFieldsVisitor;

impl<'de> Visitor<'de> for FormFieldsVisitor {
    type Value = FormFields;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a flat map of form field names to scalar values")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut fields = BTreeMap::new();
        while let Some((key, value)) = access.next_entry::<String, FieldValue>()? {
            if let Some(text) = value.into_text() {
                fields.insert(key, text);
            }
        }
        Ok(FormFields(fields))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Flag(bool),
    Null(()),
}

impl FieldValue {
    fn into_text(self) -> Option<String> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Integer(value) => Some(value.to_string()),
            FieldValue::Decimal(value) => Some(value.to_string()),
            FieldValue::Flag(true) => Some("Yes".to_string()),
            FieldValue::Flag(false) => Some("No".to_string()),
            FieldValue::Null(()) => None,
        }
    }
}

/// `group[index][field]`
pub fn indexed_key(group: &str, index: usize, field: &str) -> String {
    format!("{group}[{index}][{field}]")
}

/// `group[field]`
pub fn nested_key(group: &str, field: &str) -> String {
    format!("{group}[{field}]")
}

/// Parsed form of a bracketed key, used when validation needs to inspect
/// every key of a group regardless of index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKey<'a> {
    Scalar(&'a str),
    Nested { group: &'a str, field: &'a str },
    Indexed {
        group: &'a str,
        index: usize,
        field: &'a str,
    },
}

impl<'a> FieldKey<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let Some(open) = raw.find('[') else {
            return FieldKey::Scalar(raw);
        };
        let group = &raw[..open];
        let segments: Vec<&str> = raw[open..]
            .split_terminator(']')
            .map(|segment| segment.strip_prefix('[').unwrap_or(segment))
            .collect();

        match segments.as_slice() {
            [field] if raw.ends_with(']') => FieldKey::Nested {
                group,
                field: *field,
            },
            [index, field] if raw.ends_with(']') => match index.parse::<usize>() {
                Ok(index) => FieldKey::Indexed {
                    group,
                    index,
                    field: *field,
                },
                Err(_) => FieldKey::Scalar(raw),
            },
            _ => FieldKey::Scalar(raw),
        }
    }

    pub fn field(&self) -> &'a str {
        match *self {
            FieldKey::Scalar(name) => name,
            FieldKey::Nested { field, .. } | FieldKey::Indexed { field, .. } => field,
        }
    }
}
