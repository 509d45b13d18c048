//! Blog Feed
//!
//! Fetching, caching and list-state logic behind the blog list component.

mod cache;
mod error;
mod fetch;
mod state;
mod transport;

pub use error::FeedError;
pub use fetch::cancel_pair;
pub use state::{ListState, LoadStatus, SortKey, FILTER_ALL};
pub use transport::BrowserFeedClient;
