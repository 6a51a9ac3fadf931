use std::sync::Arc;

use chrono::{Months, Utc};

use crate::app::Result;
use crate::domain::{SearchPage, TermSet};
use crate::fetcher::{build_query, SearchEndpoint, SearchRequest, SortOrder, MAX_PAGE_SIZE};
use crate::filter::{self, MatchMode};

/// Request shaping and client-side filtering options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub page_size: u32,
    pub region_code: Option<String>,
    pub relevance_language: Option<String>,
    pub match_mode: MatchMode,
    pub max_age_years: Option<u32>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            region_code: None,
            relevance_language: None,
            match_mode: MatchMode::default(),
            max_age_years: None,
        }
    }
}

/// Fetches one page at a time. Include terms are pushed into the query
/// text; exclude terms are applied to each returned title.
#[derive(Clone)]
pub struct PaginatedFetcher {
    endpoint: Arc<dyn SearchEndpoint + Send + Sync>,
    settings: FetchSettings,
}

impl PaginatedFetcher {
    pub fn new(endpoint: Arc<dyn SearchEndpoint + Send + Sync>, settings: FetchSettings) -> Self {
        Self { endpoint, settings }
    }

    pub fn build_request(
        &self,
        query: &str,
        page_token: Option<&str>,
        include: &TermSet,
    ) -> SearchRequest {
        let published_after = self
            .settings
            .max_age_years
            .and_then(|years| Utc::now().checked_sub_months(Months::new(years.saturating_mul(12))));

        SearchRequest {
            query: build_query(query, include),
            page_size: self.settings.page_size.clamp(1, MAX_PAGE_SIZE),
            order: SortOrder::Date,
            region_code: self.settings.region_code.clone(),
            relevance_language: self.settings.relevance_language.clone(),
            page_token: page_token.map(String::from),
            published_after,
        }
    }

    /// Returns the surviving items and the endpoint's continuation token.
    pub async fn fetch_page(
        &self,
        query: &str,
        page_token: Option<&str>,
        include: &TermSet,
        exclude: &TermSet,
    ) -> Result<SearchPage> {
        let request = self.build_request(query, page_token, include);
        let page = self.endpoint.search(&request).await?;

        let received = page.items.len();
        let now = Utc::now();
        let mode = self.settings.match_mode;
        let items: Vec<_> = page
            .items
            .into_iter()
            .filter(|item| {
                !filter::is_excluded(&item.title, exclude, mode)
                    && filter::is_recent(item.published_at, now, self.settings.max_age_years)
            })
            .collect();

        tracing::info!(
            query = %request.query,
            received,
            kept = items.len(),
            has_more = page.next_page_token.is_some(),
            "fetched page"
        );

        Ok(SearchPage::new(items, page.next_page_token))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedEndpoint;
    use super::*;
    use crate::domain::ResultItem;
    use chrono::Duration;

    fn fetcher_with(endpoint: Arc<ScriptedEndpoint>, settings: FetchSettings) -> PaginatedFetcher {
        PaginatedFetcher::new(endpoint, settings)
    }

    #[tokio::test]
    async fn test_fetch_page_filters_excluded_titles() {
        let endpoint = Arc::new(ScriptedEndpoint::new());
        endpoint.push_page(SearchPage::new(
            vec![
                ResultItem::new("1", "Good method"),
                ResultItem::new("2", "Donate via PayPal.me/x"),
                ResultItem::new("3", "Another method"),
            ],
            Some("NEXT".into()),
        ));
        let fetcher = fetcher_with(endpoint.clone(), FetchSettings::default());

        let exclude: TermSet = ["paypal.me"].into_iter().collect();
        let page = fetcher
            .fetch_page("wifi", None, &TermSet::new(), &exclude)
            .await
            .unwrap();

        let ids: Vec<&str> = page.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(page.next_page_token.as_deref(), Some("NEXT"));
    }

    #[tokio::test]
    async fn test_include_terms_go_into_query_not_filter() {
        let endpoint = Arc::new(ScriptedEndpoint::new());
        endpoint.push_page(SearchPage::new(
            vec![ResultItem::new("1", "no include term here")],
            None,
        ));
        let fetcher = fetcher_with(endpoint.clone(), FetchSettings::default());

        let include: TermSet = ["method", "شرح"].into_iter().collect();
        let page = fetcher
            .fetch_page("wifi", None, &include, &TermSet::new())
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        let requests = endpoint.recorded();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, "wifi (method | شرح)");
        assert_eq!(requests[0].order, SortOrder::Date);
    }

    #[tokio::test]
    async fn test_page_token_is_echoed_verbatim() {
        let endpoint = Arc::new(ScriptedEndpoint::new());
        endpoint.push_page(SearchPage::default());
        let fetcher = fetcher_with(endpoint.clone(), FetchSettings::default());

        fetcher
            .fetch_page("q", Some("CDIQAA=="), &TermSet::new(), &TermSet::new())
            .await
            .unwrap();

        assert_eq!(
            endpoint.recorded()[0].page_token.as_deref(),
            Some("CDIQAA==")
        );
    }

    #[tokio::test]
    async fn test_failure_propagates() {
        let endpoint = Arc::new(ScriptedEndpoint::new());
        endpoint.push_failure("503");
        let fetcher = fetcher_with(endpoint, FetchSettings::default());

        let err = fetcher
            .fetch_page("q", None, &TermSet::new(), &TermSet::new())
            .await
            .unwrap_err();
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_old_items_dropped_when_age_limited() {
        let endpoint = Arc::new(ScriptedEndpoint::new());
        let mut old = ResultItem::new("old", "old video");
        old.published_at = Utc::now() - Duration::days(365 * 4);
        let fresh = ResultItem::new("fresh", "fresh video");
        endpoint.push_page(SearchPage::new(vec![old, fresh], None));

        let settings = FetchSettings {
            max_age_years: Some(3),
            ..Default::default()
        };
        let fetcher = fetcher_with(endpoint.clone(), settings);
        let page = fetcher
            .fetch_page("q", None, &TermSet::new(), &TermSet::new())
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "fresh");
        assert!(endpoint.recorded()[0].published_after.is_some());
    }

    #[test]
    fn test_build_request_clamps_page_size() {
        let endpoint = Arc::new(ScriptedEndpoint::new());
        let settings = FetchSettings {
            page_size: 500,
            region_code: Some("MA".into()),
            ..Default::default()
        };
        let fetcher = fetcher_with(endpoint, settings);
        let request = fetcher.build_request("q", None, &TermSet::new());
        assert_eq!(request.page_size, MAX_PAGE_SIZE);
        assert_eq!(request.region_code.as_deref(), Some("MA"));
        assert!(request.published_after.is_none());
    }
}
