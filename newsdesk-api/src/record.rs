use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// A server-assigned record identifier.
///
/// The API may send it as a JSON string or a number; both are kept as text
/// since the client only ever echoes it back in request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawRecordId")]
pub struct RecordId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecordId {
    Text(String),
    Number(i64),
}

impl From<RawRecordId> for RecordId {
    fn from(raw: RawRecordId) -> Self {
        match raw {
            RawRecordId::Text(s) => Self(s),
            RawRecordId::Number(n) => Self(n.to_string()),
        }
    }
}

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The fixed set of article categories accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "Tecnología")]
    Technology,
    #[serde(rename = "Economía")]
    Economy,
    #[serde(rename = "Negocios")]
    Business,
    #[serde(rename = "Marketing")]
    Marketing,
    #[serde(rename = "Deportes")]
    Sports,
    #[serde(rename = "Entretenimiento")]
    Entertainment,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Technology,
        Category::Economy,
        Category::Business,
        Category::Marketing,
        Category::Sports,
        Category::Entertainment,
    ];

    /// Label as sent on the wire and shown in the form.
    pub fn label(self) -> &'static str {
        match self {
            Category::Technology => "Tecnología",
            Category::Economy => "Economía",
            Category::Business => "Negocios",
            Category::Marketing => "Marketing",
            Category::Sports => "Deportes",
            Category::Entertainment => "Entretenimiento",
        }
    }

    /// Parse a wire label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A published article as returned by the API.
///
/// Decoding is lenient so one odd record never hides the rest of a page: the
/// category is kept as the raw label, and null or malformed counters read as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_company: Option<String>,
    #[serde(default)]
    pub destination_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub click_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub share_count: u64,
}

impl Record {
    /// Subtitle if present, otherwise the excerpt.
    pub fn secondary_line(&self) -> Option<&str> {
        non_empty(self.subtitle.as_deref()).or_else(|| non_empty(self.excerpt.as_deref()))
    }

    pub fn cover_image(&self) -> Option<&str> {
        non_empty(self.cover_image.as_deref())
    }

    /// The category if it is one of the fixed set the form can submit.
    pub fn known_category(&self) -> Option<Category> {
        Category::from_label(&self.category)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Counters arrive as integers, floats, numeric strings or null.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<f64>().map_or(0, |f| f.max(0.0) as u64),
        _ => 0,
    };
    Ok(count)
}
