pub mod favorite;
pub mod history;
pub mod item;
pub mod page;
pub mod terms;

pub use favorite::{FavoriteEntry, Favorites, FilterSnapshot};
pub use history::{History, HistoryEntry, HISTORY_LIMIT};
pub use item::ResultItem;
pub use page::SearchPage;
pub use terms::TermSet;
