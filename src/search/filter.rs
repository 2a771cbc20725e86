use crate::models::{Host, Hotel, Listing};
use crate::search::types::{SearchQuery, SortOption};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Anything that can be found by where it is
pub trait Searchable {
    fn location(&self) -> &str;
}

/// Anything the sort selector can order
pub trait Rankable: Searchable {
    fn name(&self) -> &str;
    fn price(&self) -> Option<f64>;
    fn rating(&self) -> Option<f64>;
}

impl Searchable for Hotel {
    fn location(&self) -> &str {
        &self.location
    }
}

impl Rankable for Hotel {
    fn name(&self) -> &str {
        &self.title
    }

    fn price(&self) -> Option<f64> {
        Hotel::price(self)
    }

    fn rating(&self) -> Option<f64> {
        self.rating
    }
}

impl Searchable for Listing {
    fn location(&self) -> &str {
        &self.location
    }
}

impl Rankable for Listing {
    fn name(&self) -> &str {
        &self.title
    }

    fn price(&self) -> Option<f64> {
        Listing::price(self)
    }

    fn rating(&self) -> Option<f64> {
        None
    }
}

impl Searchable for Host {
    fn location(&self) -> &str {
        &self.location
    }
}

impl Rankable for Host {
    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> Option<f64> {
        None
    }

    fn rating(&self) -> Option<f64> {
        Some(self.rating)
    }
}

/// Distinct, trimmed, sorted locations for the location picker
pub fn distinct_locations<T: Searchable>(items: &[T]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.location().trim())
        .filter(|location| !location.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Keep the items matching the query's location.
///
/// A picked location must match exactly (ignoring surrounding whitespace)
/// and takes precedence over the free text. The free text is matched as
/// typed, whitespace included; an empty query keeps everything.
pub fn filter_by_location<T: Searchable + Clone>(items: &[T], query: &SearchQuery) -> Vec<T> {
    if let Some(selected) = query
        .selected_location
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return items
            .iter()
            .filter(|item| item.location().trim() == selected)
            .cloned()
            .collect();
    }

    let needle = query.location_text.to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.location().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Stable sort; items missing the sort key go last in either direction
pub fn sort_items<T: Rankable>(items: &mut [T], sort: SortOption) {
    match sort {
        SortOption::PriceAsc => items.sort_by(|a, b| by_optional(a.price(), b.price(), false)),
        SortOption::PriceDesc => items.sort_by(|a, b| by_optional(a.price(), b.price(), true)),
        SortOption::RatingAsc => items.sort_by(|a, b| by_optional(a.rating(), b.rating(), false)),
        SortOption::RatingDesc => items.sort_by(|a, b| by_optional(a.rating(), b.rating(), true)),
        SortOption::NameAsc => items.sort_by(|a, b| by_name(a.name(), b.name())),
        SortOption::NameDesc => items.sort_by(|a, b| by_name(b.name(), a.name())),
    }
}

/// Filter, then sort
pub fn apply_query<T: Rankable + Clone>(items: &[T], query: &SearchQuery) -> Vec<T> {
    let mut matched = filter_by_location(items, query);
    sort_items(&mut matched, query.sort);
    matched
}

fn by_optional(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ord = a.total_cmp(&b);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
