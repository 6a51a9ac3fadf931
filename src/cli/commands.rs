use crate::app::{AppContext, AppState, Result, TermList, FETCH_FAILED_MESSAGE};
use crate::cli::{FavoritesAction, HistoryAction, TermsAction};
use crate::domain::ResultItem;
use crate::session::SearchSession;

pub async fn search(
    ctx: &AppContext,
    state: &mut AppState,
    query: &str,
    pages: usize,
    json: bool,
) -> Result<()> {
    state.record_search(query)?;

    let include = state.included_terms().clone();
    let exclude = state.excluded_terms().clone();
    let mut session = SearchSession::new();

    let mut outcome = session.search(&ctx.fetcher, query, &include, &exclude).await;
    let mut fetched = 1;
    while outcome.is_ok() && fetched < pages {
        match session.load_more(&ctx.fetcher, &include, &exclude).await {
            Ok(true) => fetched += 1,
            Ok(false) => break,
            Err(e) => outcome = Err(e),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(session.items())?);
    } else {
        print_items(session.items());
        if session.next_page_token().is_some() {
            println!("(more results available, use --pages {})", fetched + 1);
        }
    }

    if let Err(e) = outcome {
        eprintln!("{}", FETCH_FAILED_MESSAGE);
        return Err(e);
    }
    Ok(())
}

fn print_items(items: &[ResultItem]) {
    if items.is_empty() {
        println!("No results");
        return;
    }

    for item in items {
        println!(
            "{} {}\n  {} · {}",
            item.published_at.format("%Y-%m-%d"),
            item.display_title(),
            item.channel_title,
            item.watch_url()
        );
    }
}

pub fn terms(state: &mut AppState, list: TermList, action: TermsAction) -> Result<()> {
    match action {
        TermsAction::Add { term } => {
            if state.add_term(list, &term)? {
                println!("Added {} term: {}", list.label(), term.trim());
            } else {
                println!("Term is empty or already present: {}", term.trim());
            }
        }
        TermsAction::Remove { term } => {
            if state.remove_term(list, &term)? {
                println!("Removed {} term: {}", list.label(), term);
            } else {
                println!("No such {} term: {}", list.label(), term);
            }
        }
        TermsAction::List => {
            let terms = state.terms(list);
            if terms.is_empty() {
                println!("No {} terms", list.label());
            }
            for term in terms.iter() {
                println!("{}", term);
            }
        }
    }
    Ok(())
}

pub fn favorites(state: &mut AppState, action: FavoritesAction) -> Result<()> {
    match action {
        FavoritesAction::List => {
            if state.favorites().is_empty() {
                println!("No favorites");
            }
            for entry in state.favorites().iter() {
                println!(
                    "{} {}\n  searched \"{}\" · {}",
                    entry.item.id,
                    entry.item.display_title(),
                    entry.search_term,
                    entry.item.watch_url()
                );
            }
        }
        FavoritesAction::Remove { id } => {
            state.remove_favorite(&id)?;
            println!("Removed favorite: {}", id);
        }
    }
    Ok(())
}

pub fn history(state: &mut AppState, action: HistoryAction) -> Result<()> {
    match action {
        HistoryAction::List => {
            if state.history().is_empty() {
                println!("No recent searches");
            }
            for entry in state.history().iter() {
                println!(
                    "{}  {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.term
                );
            }
        }
        HistoryAction::Clear => {
            state.clear_history()?;
            println!("History cleared");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;
    use crate::domain::SearchPage;
    use crate::fetcher::paginated::testing::ScriptedEndpoint;

    fn context(endpoint: Arc<ScriptedEndpoint>) -> AppContext {
        let mut config = Config::default();
        config.search.max_age_years = None;
        AppContext::in_memory(config, endpoint)
    }

    #[tokio::test]
    async fn test_search_records_history_and_follows_pages() {
        let endpoint = Arc::new(ScriptedEndpoint::new());
        endpoint.push_page(SearchPage::new(
            vec![ResultItem::new("1", "one")],
            Some("T2".into()),
        ));
        endpoint.push_page(SearchPage::new(vec![ResultItem::new("2", "two")], None));
        let ctx = context(endpoint.clone());
        let mut state = ctx.load_state().unwrap();

        search(&ctx, &mut state, "wifi", 5, true).await.unwrap();

        assert_eq!(endpoint.recorded().len(), 2);
        assert_eq!(state.history().get(0).unwrap().term, "wifi");
        // Default include terms are merged into the query text.
        assert_eq!(endpoint.recorded()[0].query, "wifi (method | مشكلة | شرح)");
    }

    #[tokio::test]
    async fn test_search_failure_is_reported() {
        let endpoint = Arc::new(ScriptedEndpoint::new());
        endpoint.push_failure("403 quota");
        let ctx = context(endpoint);
        let mut state = ctx.load_state().unwrap();

        let err = search(&ctx, &mut state, "wifi", 1, false).await.unwrap_err();
        assert!(err.is_fetch_failure());
    }

    #[test]
    fn test_terms_add_and_remove() {
        let ctx = context(Arc::new(ScriptedEndpoint::new()));
        let mut state = ctx.load_state().unwrap();

        let add = TermsAction::Add {
            term: " giveaway ".into(),
        };
        terms(&mut state, TermList::Exclude, add).unwrap();
        assert!(state.excluded_terms().contains("giveaway"));

        let remove = TermsAction::Remove {
            term: "giveaway".into(),
        };
        terms(&mut state, TermList::Exclude, remove).unwrap();
        assert!(!state.excluded_terms().contains("giveaway"));
    }

    #[test]
    fn test_favorites_remove_missing_errors() {
        let ctx = context(Arc::new(ScriptedEndpoint::new()));
        let mut state = ctx.load_state().unwrap();
        assert!(favorites(&mut state, FavoritesAction::Remove { id: "x".into() }).is_err());
    }
}
