//! Client-side filtering and sorting of listing pages.

pub mod filter;
pub mod types;
pub mod view_model;

pub use filter::{apply_query, distinct_locations, filter_by_location, sort_items, Rankable, Searchable};
pub use types::{SearchQuery, SortOption};
pub use view_model::{LoadTicket, SearchTicket, SearchViewModel, ViewState};
