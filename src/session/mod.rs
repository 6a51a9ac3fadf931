//! Search session: accumulated results and the load-more cursor.
//!
//! ```text
//! Idle ──begin_search──▶ Loading ──complete──▶ Ready | Failed
//!                          ▲                     │
//!                          └────begin_load_more──┘ (Ready with a token)
//! ```
//!
//! Requests are not cancellable. [`SearchSession::complete`] applies a
//! result whenever it arrives, so a slow response from an earlier search can
//! overwrite the results of a newer one.

use crate::app::{Result, VidsieveError, FETCH_FAILED_MESSAGE};
use crate::domain::{ResultItem, SearchPage, TermSet};
use crate::fetcher::PaginatedFetcher;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Fresh,
    LoadMore,
}

/// A request the caller should hand to the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub kind: RequestKind,
    pub query: String,
    pub page_token: Option<String>,
}

#[derive(Debug, Default)]
pub struct SearchSession {
    status: SessionStatus,
    query: Option<String>,
    items: Vec<ResultItem>,
    next_page_token: Option<String>,
    error: Option<&'static str>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == SessionStatus::Loading
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn can_load_more(&self) -> bool {
        self.status == SessionStatus::Ready && self.next_page_token.is_some()
    }

    /// Starts a new search, discarding any previous results.
    pub fn begin_search(&mut self, query: &str) -> PendingRequest {
        let query = query.trim().to_string();
        self.status = SessionStatus::Loading;
        self.query = Some(query.clone());
        self.items.clear();
        self.next_page_token = None;
        self.error = None;

        PendingRequest {
            kind: RequestKind::Fresh,
            query,
            page_token: None,
        }
    }

    /// Requests the next page. No-op while loading, after a failure, or
    /// when the endpoint reported no further pages.
    pub fn begin_load_more(&mut self) -> Option<PendingRequest> {
        if !self.can_load_more() {
            return None;
        }
        let query = self.query.clone()?;
        let page_token = self.next_page_token.clone();
        self.status = SessionStatus::Loading;
        self.error = None;

        Some(PendingRequest {
            kind: RequestKind::LoadMore,
            query,
            page_token,
        })
    }

    pub fn complete(&mut self, kind: RequestKind, result: Result<SearchPage>) {
        match result {
            Ok(page) => self.apply_page(kind, page),
            Err(e) => self.fail(kind, &e),
        }
    }

    fn apply_page(&mut self, kind: RequestKind, page: SearchPage) {
        match kind {
            RequestKind::Fresh => self.items = page.items,
            RequestKind::LoadMore => self.items.extend(page.items),
        }
        self.next_page_token = page.next_page_token;
        self.status = SessionStatus::Ready;
        self.error = None;
    }

    fn fail(&mut self, kind: RequestKind, error: &VidsieveError) {
        tracing::error!(error = %error, ?kind, "search request failed");
        if kind == RequestKind::Fresh {
            self.items.clear();
            self.next_page_token = None;
        }
        self.status = SessionStatus::Failed;
        self.error = Some(FETCH_FAILED_MESSAGE);
    }

    /// Runs a fresh search to completion.
    pub async fn search(
        &mut self,
        fetcher: &PaginatedFetcher,
        query: &str,
        include: &TermSet,
        exclude: &TermSet,
    ) -> Result<()> {
        let request = self.begin_search(query);
        self.run(fetcher, request, include, exclude).await
    }

    /// Fetches the next page if one is available. Returns `Ok(false)` when
    /// there was nothing to load.
    pub async fn load_more(
        &mut self,
        fetcher: &PaginatedFetcher,
        include: &TermSet,
        exclude: &TermSet,
    ) -> Result<bool> {
        let Some(request) = self.begin_load_more() else {
            return Ok(false);
        };
        self.run(fetcher, request, include, exclude).await?;
        Ok(true)
    }

    async fn run(
        &mut self,
        fetcher: &PaginatedFetcher,
        request: PendingRequest,
        include: &TermSet,
        exclude: &TermSet,
    ) -> Result<()> {
        let result = fetcher
            .fetch_page(
                &request.query,
                request.page_token.as_deref(),
                include,
                exclude,
            )
            .await;
        match result {
            Ok(page) => {
                self.apply_page(request.kind, page);
                Ok(())
            }
            Err(e) => {
                self.fail(request.kind, &e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::fetcher::paginated::testing::ScriptedEndpoint;
    use crate::fetcher::FetchSettings;

    fn item(id: &str, title: &str) -> ResultItem {
        ResultItem::new(id, title)
    }

    fn ids(session: &SearchSession) -> Vec<&str> {
        session.items().iter().map(|i| i.id.as_str()).collect()
    }

    fn fetcher(endpoint: Arc<ScriptedEndpoint>) -> PaginatedFetcher {
        PaginatedFetcher::new(endpoint, FetchSettings::default())
    }

    #[test]
    fn test_starts_idle() {
        let session = SearchSession::new();
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(session.items().is_empty());
        assert!(!session.can_load_more());
    }

    #[test]
    fn test_search_then_load_more_appends_in_order() {
        let endpoint = Arc::new(ScriptedEndpoint::new());
        endpoint.push_page(SearchPage::new(
            vec![item("1", "one"), item("2", "paypal.me spam"), item("3", "three")],
            Some("P2".into()),
        ));
        endpoint.push_page(SearchPage::new(
            vec![item("4", "four"), item("5", "five")],
            None,
        ));
        let fetcher = fetcher(endpoint.clone());
        let exclude: TermSet = ["paypal.me"].into_iter().collect();
        let include = TermSet::new();

        let mut session = SearchSession::new();
        tokio_test::block_on(session.search(&fetcher, "x", &include, &exclude)).unwrap();
        assert_eq!(session.status(), SessionStatus::Ready);
        assert_eq!(ids(&session), vec!["1", "3"]);
        assert_eq!(session.next_page_token(), Some("P2"));

        let loaded =
            tokio_test::block_on(session.load_more(&fetcher, &include, &exclude)).unwrap();
        assert!(loaded);
        assert_eq!(ids(&session), vec!["1", "3", "4", "5"]);
        assert!(!session.can_load_more());

        let requests = endpoint.recorded();
        assert_eq!(requests[1].page_token.as_deref(), Some("P2"));
        assert_eq!(requests[1].query, "x");
    }

    #[test]
    fn test_load_more_without_token_is_noop() {
        let endpoint = Arc::new(ScriptedEndpoint::new());
        endpoint.push_page(SearchPage::new(vec![item("1", "one")], None));
        let fetcher = fetcher(endpoint.clone());
        let empty = TermSet::new();

        let mut session = SearchSession::new();
        tokio_test::block_on(session.search(&fetcher, "x", &empty, &empty)).unwrap();
        let loaded = tokio_test::block_on(session.load_more(&fetcher, &empty, &empty)).unwrap();

        assert!(!loaded);
        assert_eq!(endpoint.recorded().len(), 1);
        assert_eq!(session.status(), SessionStatus::Ready);
    }

    #[test]
    fn test_load_more_while_loading_is_noop() {
        let mut session = SearchSession::new();
        session.begin_search("x");
        session.complete(
            RequestKind::Fresh,
            Ok(SearchPage::new(vec![item("1", "one")], Some("T".into()))),
        );

        let first = session.begin_load_more();
        assert!(first.is_some());
        assert!(session.is_loading());
        assert!(session.begin_load_more().is_none());
    }

    #[test]
    fn test_load_more_before_any_search_is_noop() {
        let mut session = SearchSession::new();
        assert!(session.begin_load_more().is_none());
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    #[test]
    fn test_fresh_search_failure_clears_results() {
        let mut session = SearchSession::new();
        session.begin_search("first");
        session.complete(
            RequestKind::Fresh,
            Ok(SearchPage::new(vec![item("1", "one")], Some("T".into()))),
        );

        session.begin_search("second");
        session.complete(
            RequestKind::Fresh,
            Err(VidsieveError::FetchFailed("500".into())),
        );

        assert_eq!(session.status(), SessionStatus::Failed);
        assert!(session.items().is_empty());
        assert_eq!(session.error(), Some(FETCH_FAILED_MESSAGE));
        assert!(!session.can_load_more());
    }

    #[test]
    fn test_load_more_failure_keeps_results() {
        let endpoint = Arc::new(ScriptedEndpoint::new());
        endpoint.push_page(SearchPage::new(
            vec![item("1", "one"), item("2", "two")],
            Some("T".into()),
        ));
        endpoint.push_failure("network down");
        let fetcher = fetcher(endpoint);
        let empty = TermSet::new();

        let mut session = SearchSession::new();
        tokio_test::block_on(session.search(&fetcher, "x", &empty, &empty)).unwrap();
        let err = tokio_test::block_on(session.load_more(&fetcher, &empty, &empty)).unwrap_err();

        assert!(err.is_fetch_failure());
        assert_eq!(session.status(), SessionStatus::Failed);
        assert_eq!(ids(&session), vec!["1", "2"]);
        assert_eq!(session.error(), Some(FETCH_FAILED_MESSAGE));
    }

    #[test]
    fn test_new_search_after_failure() {
        let mut session = SearchSession::new();
        session.begin_search("x");
        session.complete(RequestKind::Fresh, Err(VidsieveError::FetchFailed("x".into())));

        let request = session.begin_search("y");
        assert_eq!(request.kind, RequestKind::Fresh);
        assert_eq!(session.status(), SessionStatus::Loading);
        assert!(session.error().is_none());
    }

    #[test]
    fn test_stale_response_overwrites_newer_search() {
        let mut session = SearchSession::new();
        let first = session.begin_search("old query");
        let second = session.begin_search("new query");

        // The newer request finishes first, then the older one lands.
        session.complete(
            second.kind,
            Ok(SearchPage::new(vec![item("new", "new")], None)),
        );
        session.complete(
            first.kind,
            Ok(SearchPage::new(vec![item("old", "old")], Some("OLD".into()))),
        );

        assert_eq!(session.query(), Some("new query"));
        assert_eq!(ids(&session), vec!["old"]);
        assert_eq!(session.next_page_token(), Some("OLD"));
    }
}
