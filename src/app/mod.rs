pub mod context;
pub mod error;
pub mod state;

pub use context::AppContext;
pub use error::{Result, VidsieveError, FETCH_FAILED_MESSAGE};
pub use state::{AppState, TermList};
