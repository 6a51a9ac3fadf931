use serde::{Deserialize, Serialize};

use crate::domain::ResultItem;

/// One page of search results plus the endpoint's continuation token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub items: Vec<ResultItem>,
    pub next_page_token: Option<String>,
}

impl SearchPage {
    pub fn new(items: Vec<ResultItem>, next_page_token: Option<String>) -> Self {
        Self {
            items,
            next_page_token,
        }
    }

    /// An absent token means the endpoint has no further pages.
    pub fn has_more(&self) -> bool {
        self.next_page_token.is_some()
    }
}
