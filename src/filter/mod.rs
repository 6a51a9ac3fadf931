//! Title filtering against include/exclude term lists.
//!
//! Matching is plain substring containment. There is no tokenization, no
//! regex and no locale-aware folding beyond Unicode lower-casing in
//! [`MatchMode::CaseInsensitive`].

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::TermSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    CaseSensitive,
    #[default]
    CaseInsensitive,
}

fn any_term_matches(title: &str, terms: &TermSet, mode: MatchMode) -> bool {
    if title.is_empty() {
        return false;
    }
    match mode {
        MatchMode::CaseSensitive => terms.iter().any(|term| title.contains(term)),
        MatchMode::CaseInsensitive => {
            let lowered = title.to_lowercase();
            terms
                .iter()
                .any(|term| lowered.contains(&term.to_lowercase()))
        }
    }
}

/// True when `exclude` is non-empty and one of its terms occurs in `title`.
pub fn is_excluded(title: &str, exclude: &TermSet, mode: MatchMode) -> bool {
    !exclude.is_empty() && any_term_matches(title, exclude, mode)
}

/// True when `include` is empty or one of its terms occurs in `title`.
pub fn is_included(title: &str, include: &TermSet, mode: MatchMode) -> bool {
    include.is_empty() || any_term_matches(title, include, mode)
}

/// True when `published_at` falls within the last `max_age_years` calendar
/// years before `now`. `None` disables the age limit.
pub fn is_recent(
    published_at: DateTime<Utc>,
    now: DateTime<Utc>,
    max_age_years: Option<u32>,
) -> bool {
    let Some(years) = max_age_years else {
        return true;
    };
    match now.checked_sub_months(Months::new(years.saturating_mul(12))) {
        Some(cutoff) => published_at >= cutoff,
        None => true,
    }
}
