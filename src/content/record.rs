use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::text_utils::parse_date_time;

// toml::Value datetimes come through serde as a single-key map
const TOML_DATETIME_KEY: &str = "$__toml_private_datetime";

#[derive(Debug, Clone, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Slug(pub String);

impl Display for Slug {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A date as written in the frontmatter, plus its parsed value when it parses.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDate {
    pub raw: String,
    pub parsed: Option<DateTime<Utc>>,
}

impl RecordDate {
    pub fn from_raw(raw: &str) -> RecordDate {
        RecordDate {
            raw: raw.to_string(),
            parsed: parse_date_time(raw).ok(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentRecord {
    pub slug: Slug,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<RecordDate>,
    pub last_modified: Option<RecordDate>,
    pub tags: Vec<String>,
    pub author: Option<String>,
    pub author_image: Option<String>,
    pub thumbnail: Option<String>,
    pub featured: bool,
    pub read_time: Option<String>,
}

impl Display for ContentRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let date = self.date.as_ref().map(|d| d.raw.as_str()).unwrap_or("-");
        write!(f, "slug={}, date={}, author={}, tags=[{}]\ntitle={}",
               self.slug,
               date,
               self.author.as_deref().unwrap_or("-"),
               self.tags.join(", "),
               self.display_title(),
        )
    }
}

impl ContentRecord {
    /// Record with only a slug; every optional field holds its fallback
    pub fn empty(slug: &str) -> ContentRecord {
        ContentRecord {
            slug: Slug(slug.to_string()),
            title: None,
            description: None,
            date: None,
            last_modified: None,
            tags: vec![],
            author: None,
            author_image: None,
            thumbnail: None,
            featured: false,
            read_time: None,
        }
    }

    /// Converts untyped frontmatter into a record. Never fails: fields that are
    /// missing or of the wrong type fall back to their defaults.
    pub fn normalize(slug: &str, raw: &Value) -> ContentRecord {
        let mut record = ContentRecord::empty(slug);
        let Value::Object(fields) = raw else {
            return record;
        };

        let text = |key: &str| fields.get(key).and_then(coerce_text);
        let date = |key: &str| fields.get(key).and_then(coerce_date);

        record.title = text("title");
        record.description = text("description");
        record.date = date("date");
        record.last_modified = date("lastModified");
        record.tags = fields.get("tags").map(coerce_tags).unwrap_or_default();
        record.author = text("author");
        record.author_image = text("authorImage");
        record.thumbnail = text("thumbnail");
        record.featured = fields.get("featured").map(coerce_bool).unwrap_or(false);
        record.read_time = text("readTime");

        record
    }

    pub fn display_title(&self) -> &str {
        match self.title {
            Some(ref title) => title.as_str(),
            None => self.slug.0.as_str(),
        }
    }

    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.date.as_ref().and_then(|d| d.parsed)
    }

    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified.as_ref().and_then(|d| d.parsed)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn coerce_date(value: &Value) -> Option<RecordDate> {
    match value {
        Value::Object(map) if map.len() == 1 => {
            map.get(TOML_DATETIME_KEY).and_then(coerce_text).map(|raw| RecordDate::from_raw(&raw))
        }
        other => coerce_text(other).map(|raw| RecordDate::from_raw(&raw)),
    }
}

fn coerce_tags(value: &Value) -> Vec<String> {
    let Value::Array(items) = value else {
        return vec![];
    };

    items.iter()
        .filter_map(coerce_text)
        .collect()
}

fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_normalize_full() {
        let raw = json!({
            "title": "Vad är medborgarskapsprovet?",
            "description": "En genomgång",
            "date": "2024-06-01",
            "lastModified": "2024-06-10T12:00:00Z",
            "tags": ["Prov", "Guide"],
            "author": "nour",
            "authorImage": "/authors/nour.png",
            "thumbnail": "/thumbnails/prov.png",
            "featured": true,
            "readTime": "5 min",
        });
        let record = ContentRecord::normalize("vad-ar-provet", &raw);
        assert_eq!(record.slug, Slug("vad-ar-provet".to_string()));
        assert_eq!(record.display_title(), "Vad är medborgarskapsprovet?");
        assert_eq!(record.description.as_deref(), Some("En genomgång"));
        assert_eq!(record.tags, ["Prov", "Guide"]);
        assert_eq!(record.author.as_deref(), Some("nour"));
        assert!(record.featured);
        assert_eq!(record.read_time.as_deref(), Some("5 min"));
        assert!(record.published().is_some());
        assert!(record.modified().is_some());
    }

    #[test]
    fn test_normalize_missing_fields() {
        let record = ContentRecord::normalize("only-slug", &json!({}));
        assert_eq!(record, ContentRecord::empty("only-slug"));
        assert_eq!(record.display_title(), "only-slug");
        assert!(record.published().is_none());
    }

    #[test]
    fn test_normalize_not_an_object() {
        for raw in [json!(null), json!("title"), json!([1, 2]), json!(42)] {
            let record = ContentRecord::normalize("x", &raw);
            assert_eq!(record, ContentRecord::empty("x"));
        }
    }

    #[test]
    fn test_normalize_wrong_types() {
        let raw = json!({
            "title": "",
            "tags": "rust",
            "date": ["2024-01-01"],
            "author": {"name": "nour"},
            "featured": "yes",
        });
        let record = ContentRecord::normalize("x", &raw);
        assert!(record.title.is_none());
        assert!(record.tags.is_empty());
        assert!(record.date.is_none());
        assert!(record.author.is_none());
        assert!(!record.featured);
    }

    #[test]
    fn test_normalize_invalid_date_is_kept_raw() {
        let record = ContentRecord::normalize("x", &json!({"date": "not-a-date"}));
        let date = record.date.as_ref().unwrap();
        assert_eq!(date.raw, "not-a-date");
        assert!(date.parsed.is_none());
        assert!(record.published().is_none());
    }

    #[test]
    fn test_normalize_mixed_tags() {
        let record = ContentRecord::normalize("x", &json!({"tags": ["a", 2024, null, "", {"k": 1}, "b"]}));
        assert_eq!(record.tags, ["a", "2024", "b"]);
    }

    #[test]
    fn test_normalize_toml_datetime() {
        let raw = json!({"date": {"$__toml_private_datetime": "2024-01-01"}});
        let record = ContentRecord::normalize("x", &raw);
        assert_eq!(record.date.as_ref().unwrap().raw, "2024-01-01");
        assert!(record.published().is_some());
    }
}
