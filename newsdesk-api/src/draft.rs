use serde::Serialize;

use crate::{Category, DraftError, Record, RecordId};

/// Split a comma-separated tags input into trimmed, non-empty tokens.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// The editor's working copy of a record.
///
/// Text fields hold exactly what the user typed. Nothing is checked until the
/// draft is turned into a [`NewsPayload`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Draft {
    pub id: Option<RecordId>,
    pub title: String,
    pub subtitle: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub author_name: String,
    pub author_company: String,
    pub destination_url: String,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_record(record: &Record) -> Self {
        Self {
            id: Some(record.id.clone()),
            title: record.title.clone(),
            subtitle: record.subtitle.clone().unwrap_or_default(),
            excerpt: record.excerpt.clone().unwrap_or_default(),
            content: record.content.clone(),
            cover_image: record.cover_image.clone().unwrap_or_default(),
            category: record.known_category().unwrap_or_default(),
            tags: record.tags.clone(),
            author_name: record.author_name.clone().unwrap_or_default(),
            author_company: record.author_company.clone().unwrap_or_default(),
            destination_url: record.destination_url.clone().unwrap_or_default(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Replace the whole tag sequence from a comma-separated input.
    pub fn set_tags_input(&mut self, input: &str) {
        self.tags = parse_tags(input);
    }

    pub fn tags_input(&self) -> String {
        self.tags.join(", ")
    }
}

/// Request body for create and update: the whole draft minus its id.
///
/// Only constructible from a [`Draft`] whose required fields are present.
/// Empty optional fields are sent as `""`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPayload {
    title: String,
    subtitle: String,
    excerpt: String,
    content: String,
    cover_image: String,
    category: Category,
    tags: Vec<String>,
    author_name: String,
    author_company: String,
    destination_url: String,
}

impl NewsPayload {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Materialise the payload as a record, as a server would after a write.
    pub fn into_record(self, id: RecordId) -> Record {
        Record {
            id,
            title: self.title,
            subtitle: optional(self.subtitle),
            excerpt: optional(self.excerpt),
            content: self.content,
            cover_image: optional(self.cover_image),
            category: self.category.label().to_string(),
            tags: self.tags,
            author_name: optional(self.author_name),
            author_company: optional(self.author_company),
            destination_url: optional(self.destination_url),
            view_count: 0,
            click_count: 0,
            share_count: 0,
        }
    }
}

impl TryFrom<&Draft> for NewsPayload {
    type Error = DraftError;

    fn try_from(draft: &Draft) -> Result<Self, Self::Error> {
        if draft.title.trim().is_empty() {
            return Err(DraftError::MissingField("title"));
        }
        if draft.content.trim().is_empty() {
            return Err(DraftError::MissingField("content"));
        }

        Ok(Self {
            title: draft.title.clone(),
            subtitle: draft.subtitle.clone(),
            excerpt: draft.excerpt.clone(),
            content: draft.content.clone(),
            cover_image: draft.cover_image.clone(),
            category: draft.category,
            tags: draft.tags.clone(),
            author_name: draft.author_name.clone(),
            author_company: draft.author_company.clone(),
            destination_url: draft.destination_url.clone(),
        })
    }
}

fn optional(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> Draft {
        Draft {
            title: "Título".to_string(),
            content: "Contenido largo".to_string(),
            ..Draft::new()
        }
    }

    #[test]
    fn parse_tags_trims_and_drops_empty_segments() {
        assert_eq!(
            parse_tags("IA, Tecnología,  , Innovación"),
            vec!["IA", "Tecnología", "Innovación"]
        );
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn set_tags_input_replaces_previous_sequence() {
        let mut draft = Draft::new();
        draft.set_tags_input("a, b");
        draft.set_tags_input("c,");
        assert_eq!(draft.tags, vec!["c"]);
        assert_eq!(draft.tags_input(), "c");
    }

    #[test]
    fn from_record_defaults_missing_tags_and_destination() {
        let record: Record = serde_json::from_str(
            r#"{"id": 3, "title": "t", "content": "c", "tags": null, "destinationUrl": null}"#,
        )
        .unwrap();

        let draft = Draft::from_record(&record);

        assert_eq!(draft.id, Some(RecordId::new("3")));
        assert!(draft.tags.is_empty());
        assert_eq!(draft.destination_url, "");
        assert!(!draft.is_new());
    }

    #[test]
    fn from_record_falls_back_to_default_for_unknown_category() {
        let record: Record =
            serde_json::from_str(r#"{"id": 5, "title": "t", "category": "Salud"}"#).unwrap();

        assert_eq!(Draft::from_record(&record).category, Category::Technology);
    }

    #[test]
    fn payload_to_record_maps_empty_strings_to_none() {
        let mut draft = filled_draft();
        draft.category = Category::Sports;
        let record = NewsPayload::try_from(&draft)
            .unwrap()
            .into_record(RecordId::new("9"));

        assert_eq!(record.subtitle, None);
        assert_eq!(record.category, "Deportes");
    }

    #[test]
    fn payload_requires_title_and_content() {
        let mut draft = filled_draft();
        draft.title = "   ".to_string();
        assert_eq!(
            NewsPayload::try_from(&draft),
            Err(DraftError::MissingField("title"))
        );

        let mut draft = filled_draft();
        draft.content.clear();
        assert_eq!(
            NewsPayload::try_from(&draft),
            Err(DraftError::MissingField("content"))
        );
    }

    #[test]
    fn payload_serializes_full_draft_with_empty_strings_kept() {
        let mut draft = filled_draft();
        draft.cover_image = "https://picsum.photos/800/400".to_string();
        draft.set_tags_input("IA, Innovación");

        let payload = NewsPayload::try_from(&draft).unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["title"], "Título");
        assert_eq!(json["coverImage"], "https://picsum.photos/800/400");
        assert_eq!(json["category"], "Tecnología");
        assert_eq!(json["tags"], serde_json::json!(["IA", "Innovación"]));
        assert_eq!(json["subtitle"], "");
        assert_eq!(json["destinationUrl"], "");
        assert_eq!(json["authorCompany"], "");
        assert!(json.get("id").is_none());
        assert!(json.get("viewCount").is_none());
    }
}
