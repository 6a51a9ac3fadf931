pub mod http_fetcher;
pub mod paginated;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::app::Result;
use crate::domain::{SearchPage, TermSet};

pub use http_fetcher::YouTubeEndpoint;
pub use paginated::{FetchSettings, PaginatedFetcher};

/// Maximum page size accepted by the search endpoint.
pub const MAX_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recent first
    #[default]
    Date,
    Relevance,
}

impl SortOrder {
    pub fn as_param(self) -> &'static str {
        match self {
            SortOrder::Date => "date",
            SortOrder::Relevance => "relevance",
        }
    }
}

/// A single request against the search endpoint. Results are always
/// restricted to videos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub page_size: u32,
    pub order: SortOrder,
    pub region_code: Option<String>,
    pub relevance_language: Option<String>,
    pub page_token: Option<String>,
    pub published_after: Option<DateTime<Utc>>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page_size: MAX_PAGE_SIZE,
            order: SortOrder::Date,
            region_code: None,
            relevance_language: None,
            page_token: None,
            published_after: None,
        }
    }
}

#[async_trait]
pub trait SearchEndpoint {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage>;
}

/// Appends the include terms to `query` as an OR group, e.g.
/// `wifi (method | "fix it")`.
pub fn build_query(query: &str, include: &TermSet) -> String {
    let query = query.trim();
    if include.is_empty() {
        return query.to_string();
    }

    let group = include
        .iter()
        .map(|term| {
            if term.chars().any(char::is_whitespace) {
                format!("\"{}\"", term.replace('"', ""))
            } else {
                term.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ");

    if query.is_empty() {
        format!("({})", group)
    } else {
        format!("{} ({})", query, group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_without_include_terms() {
        assert_eq!(build_query("  rust  ", &TermSet::new()), "rust");
    }

    #[test]
    fn test_build_query_or_group() {
        let include: TermSet = ["method", "مشكلة", "شرح"].into_iter().collect();
        assert_eq!(
            build_query("wifi", &include),
            "wifi (method | مشكلة | شرح)"
        );
    }

    #[test]
    fn test_build_query_quotes_phrases() {
        let include: TermSet = ["how to", "fix"].into_iter().collect();
        assert_eq!(build_query("router", &include), "router (\"how to\" | fix)");
    }

    #[test]
    fn test_build_query_empty_query() {
        let include: TermSet = ["a"].into_iter().collect();
        assert_eq!(build_query("", &include), "(a)");
    }
}
