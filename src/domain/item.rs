use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// A single video returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub published_at: DateTime<Utc>,
    pub thumbnail_url: String,
}

impl ResultItem {
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    pub fn watch_url(&self) -> String {
        format!("{}{}", WATCH_URL_BASE, self.id)
    }
}

#[cfg(test)]
impl ResultItem {
    /// Item published now with empty metadata.
    pub(crate) fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            channel_title: String::new(),
            published_at: Utc::now(),
            thumbnail_url: String::new(),
        }
    }
}
