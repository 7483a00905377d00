//! Core data types for Kiddolearn

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::KiddoError;

/// Content categories served by the learning backend.
///
/// `Math` is never fetched remotely; its items are generated on device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Letter,
    Animal,
    Number,
    Vegetable,
    Fruit,
    Flower,
    Math,
}

impl Category {
    /// Wire and storage representation (lowercase name)
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Letter => "letter",
            Category::Animal => "animal",
            Category::Number => "number",
            Category::Vegetable => "vegetable",
            Category::Fruit => "fruit",
            Category::Flower => "flower",
            Category::Math => "math",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = KiddoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "letter" => Ok(Category::Letter),
            "animal" => Ok(Category::Animal),
            "number" => Ok(Category::Number),
            "vegetable" => Ok(Category::Vegetable),
            "fruit" => Ok(Category::Fruit),
            "flower" => Ok(Category::Flower),
            "math" => Ok(Category::Math),
            _ => Err(KiddoError::InvalidInput(format!(
                "Unknown category: '{}'. Valid options: letter, animal, number, vegetable, fruit, flower, math",
                s
            ))),
        }
    }
}

/// A single quiz/game entry, in the backend's wire shape.
///
/// Remote items carry server-assigned `_id`s and hosted image/sound URLs;
/// generated math items use minted ids and inline emoji in `image_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "type")]
    pub category: Category,

    pub title: String,

    #[serde(rename = "imageUrl")]
    pub image_url: String,

    #[serde(rename = "soundUrl", skip_serializing_if = "Option::is_none")]
    pub sound_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    #[serde(rename = "correctAnswer", skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

impl ContentItem {
    /// True when `correct_answer`, if present, appears among `options`.
    ///
    /// Choices may legitimately contain duplicates; this only checks
    /// membership.
    pub fn has_consistent_answer(&self) -> bool {
        match (&self.correct_answer, &self.options) {
            (Some(answer), Some(options)) => options.iter().any(|o| o == answer),
            (Some(_), None) => false,
            (None, _) => true,
        }
    }
}

/// Response body of the content endpoint: `{"content": [...]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentPage {
    pub content: Option<Vec<ContentItem>>,
}

impl ContentPage {
    /// Extract the item list, treating a missing or null `content` field
    /// as an empty page.
    pub fn into_items(self) -> Vec<ContentItem> {
        self.content.unwrap_or_default()
    }
}

/// The persisted slice of store state: cumulative quiz counters.
///
/// Serializes with the storage blob's historical field names
/// (`completedCount`, `correctCount`, `wrongCount`, `lastReset`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub completed_count: u32,
    pub correct_count: u32,
    pub wrong_count: u32,
    /// Calendar date the counters were last reset, e.g. "Fri Aug 22 2026".
    /// Written once at first initialization and carried through every save;
    /// no operation consults it.
    pub last_reset: String,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            completed_count: 0,
            correct_count: 0,
            wrong_count: 0,
            last_reset: chrono::Local::now().format("%a %b %d %Y").to_string(),
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> ContentItem {
        ContentItem {
            id: "66f2a1b3c4d5e6f7a8b9c0d1".to_string(),
            category: Category::Animal,
            title: "Lion".to_string(),
            image_url: "https://cdn.example.com/animals/lion.png".to_string(),
            sound_url: Some("/uploads/animal/sounds/lion.mp3".to_string()),
            question: None,
            options: None,
            correct_answer: None,
        }
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("letter".parse::<Category>().unwrap(), Category::Letter);
        assert_eq!("math".parse::<Category>().unwrap(), Category::Math);
        assert_eq!("flower".parse::<Category>().unwrap(), Category::Flower);

        // Case insensitive
        assert_eq!("Animal".parse::<Category>().unwrap(), Category::Animal);
        assert_eq!("FRUIT".parse::<Category>().unwrap(), Category::Fruit);
    }

    #[test]
    fn test_category_from_str_invalid() {
        let result = "dinosaur".parse::<Category>();
        assert!(result.is_err());
        let message = format!("{}", result.unwrap_err());
        assert!(message.contains("Unknown category: 'dinosaur'"));
    }

    #[test]
    fn test_category_display_roundtrip() {
        for category in [
            Category::Letter,
            Category::Animal,
            Category::Number,
            Category::Vegetable,
            Category::Fruit,
            Category::Flower,
            Category::Math,
        ] {
            let parsed: Category = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&Category::Vegetable).unwrap();
        assert_eq!(json, "\"vegetable\"");

        let parsed: Category = serde_json::from_str("\"math\"").unwrap();
        assert_eq!(parsed, Category::Math);
    }

    #[test]
    fn test_content_item_wire_field_names() {
        let json = serde_json::to_string(&sample_item()).unwrap();
        assert!(json.contains("\"_id\""));
        assert!(json.contains("\"type\":\"animal\""));
        assert!(json.contains("\"imageUrl\""));
        assert!(json.contains("\"soundUrl\""));
        // None fields are omitted entirely
        assert!(!json.contains("question"));
        assert!(!json.contains("correctAnswer"));
    }

    #[test]
    fn test_content_item_deserialize_from_backend_shape() {
        let json = r#"{
            "_id": "abc123",
            "type": "fruit",
            "title": "Mango",
            "imageUrl": "https://cdn.example.com/fruits/mango.png"
        }"#;

        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "abc123");
        assert_eq!(item.category, Category::Fruit);
        assert_eq!(item.title, "Mango");
        assert!(item.sound_url.is_none());
        assert!(item.options.is_none());
    }

    #[test]
    fn test_content_item_roundtrip() {
        let item = ContentItem {
            question: Some("What is 2 🍎 + 3 🍌?".to_string()),
            options: Some(vec![
                "🍎🍎🍎🍎🍎".to_string(),
                "🍎🍎🍎🍎🍎🍎".to_string(),
                "🍎🍎🍎🍎".to_string(),
                "🍎🍎🍎🍎🍎🍎🍎".to_string(),
            ]),
            correct_answer: Some("🍎🍎🍎🍎🍎".to_string()),
            ..sample_item()
        };

        let json = serde_json::to_string(&item).unwrap();
        let back: ContentItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_has_consistent_answer() {
        let mut item = sample_item();
        assert!(item.has_consistent_answer(), "no answer is consistent");

        item.options = Some(vec!["a".to_string(), "b".to_string()]);
        item.correct_answer = Some("b".to_string());
        assert!(item.has_consistent_answer());

        item.correct_answer = Some("c".to_string());
        assert!(!item.has_consistent_answer());

        item.options = None;
        assert!(!item.has_consistent_answer(), "answer without choices");
    }

    #[test]
    fn test_content_page_missing_field() {
        let page: ContentPage = serde_json::from_str("{}").unwrap();
        assert!(page.into_items().is_empty());
    }

    #[test]
    fn test_content_page_null_field() {
        let page: ContentPage = serde_json::from_str(r#"{"content": null}"#).unwrap();
        assert!(page.into_items().is_empty());
    }

    #[test]
    fn test_content_page_with_items() {
        let json = r#"{"content": [
            {"_id": "1", "type": "letter", "title": "A", "imageUrl": "a.png"},
            {"_id": "2", "type": "letter", "title": "B", "imageUrl": "b.png"}
        ]}"#;

        let page: ContentPage = serde_json::from_str(json).unwrap();
        let items = page.into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "A");
        assert_eq!(items[1].title, "B");
    }

    #[test]
    fn test_progress_new_starts_at_zero() {
        let progress = Progress::new();
        assert_eq!(progress.completed_count, 0);
        assert_eq!(progress.correct_count, 0);
        assert_eq!(progress.wrong_count, 0);
        assert!(!progress.last_reset.is_empty());
    }

    #[test]
    fn test_progress_last_reset_shape() {
        // "Fri Aug 22 2026": weekday, month, zero-padded day, year
        let progress = Progress::new();
        let parts: Vec<&str> = progress.last_reset.split(' ').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0].len(), 3);
        assert_eq!(parts[1].len(), 3);
        assert_eq!(parts[2].len(), 2);
        assert_eq!(parts[3].len(), 4);
    }

    #[test]
    fn test_progress_serde_blob_field_names() {
        let progress = Progress {
            completed_count: 7,
            correct_count: 5,
            wrong_count: 2,
            last_reset: "Mon Jan 05 2026".to_string(),
        };

        let json = serde_json::to_string(&progress).unwrap();
        assert!(json.contains("\"completedCount\":7"));
        assert!(json.contains("\"correctCount\":5"));
        assert!(json.contains("\"wrongCount\":2"));
        assert!(json.contains("\"lastReset\":\"Mon Jan 05 2026\""));

        let back: Progress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, progress);
    }
}
