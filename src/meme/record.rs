use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Category assigned to records the remote source leaves unlabelled.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// A comment attached to a meme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub author: String,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            created_at: Some(Utc::now()),
        }
    }
}

/// A single meme as delivered by a [`MemeSource`](super::MemeSource).
///
/// Only `id`, `url` and `title` are required on the wire. The imgflip
/// endpoint calls the title `name` and carries no likes, comments, author,
/// timestamp or category, so those fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemeRecord {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub url: String,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default = "default_category")]
    pub category: String,
}

impl MemeRecord {
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_imgflip_shape_with_defaults() {
        let json = r#"{
            "id": "181913649",
            "name": "Drake Hotline Bling",
            "url": "https://i.imgflip.com/30b1gx.jpg",
            "width": 1200,
            "height": 1200,
            "box_count": 2,
            "captions": 1496000
        }"#;

        let meme: MemeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(meme.id, "181913649");
        assert_eq!(meme.title, "Drake Hotline Bling");
        assert_eq!(meme.likes, 0);
        assert!(meme.comments.is_empty());
        assert!(meme.created_at.is_none());
        assert_eq!(meme.category, DEFAULT_CATEGORY);
        assert_eq!(meme.author, "");
    }

    #[test]
    fn decodes_full_record_with_numeric_id() {
        let json = r#"{
            "id": 7,
            "url": "https://example.com/7.png",
            "title": "Seven",
            "author": "Memer7",
            "likes": 42,
            "comments": [{"author": "a", "text": "lol"}],
            "createdAt": "2024-03-01T12:00:00Z",
            "category": "Gaming"
        }"#;

        let meme: MemeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(meme.id, "7");
        assert_eq!(meme.likes, 42);
        assert_eq!(meme.comment_count(), 1);
        assert_eq!(meme.comments[0].text, "lol");
        assert!(meme.created_at.is_some());
        assert_eq!(meme.category, "Gaming");
    }

    #[test]
    fn missing_title_is_rejected() {
        let json = r#"{"id": "1", "url": "https://example.com/1.png"}"#;
        assert!(serde_json::from_str::<MemeRecord>(json).is_err());
    }
}
