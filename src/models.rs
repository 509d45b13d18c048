//! Frontend Models
//!
//! Data structures matching the blog feed JSON.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// One post as served by the feed endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogEntry {
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub published_date: String,
    /// Minutes, sent either as a number or a string like "5" / "5 min"
    #[serde(default, deserialize_with = "string_or_number")]
    pub reading_time: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(serde_json::Number),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StringOrNumber>::deserialize(deserializer)? {
        Some(StringOrNumber::Text(text)) => text,
        Some(StringOrNumber::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

impl BlogEntry {
    /// Leading numeric part of `reading_time`; 0 when there is none.
    /// The number ends at the first non-digit or at a second '.'.
    pub fn reading_minutes(&self) -> f64 {
        let trimmed = self.reading_time.trim();
        let mut seen_dot = false;
        let end = trimmed
            .find(|c: char| match c {
                '0'..='9' => false,
                '.' if !seen_dot => {
                    seen_dot = true;
                    false
                }
                _ => true,
            })
            .unwrap_or(trimmed.len());
        trimmed[..end].parse().unwrap_or(0.0)
    }

    pub fn published(&self) -> Option<NaiveDateTime> {
        let raw = self.published_date.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Some(dt);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    pub fn display_date(&self) -> String {
        match self.published() {
            Some(dt) => dt.format("%b %-d, %Y").to_string(),
            None => self.published_date.clone(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
