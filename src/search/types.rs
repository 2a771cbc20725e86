use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort orders offered by the hotel list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    PriceAsc,
    PriceDesc,
    #[default]
    RatingDesc,
    RatingAsc,
    NameAsc,
    NameDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 6] = [
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::RatingDesc,
        SortOption::RatingAsc,
        SortOption::NameAsc,
        SortOption::NameDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
            SortOption::RatingDesc => "rating_desc",
            SortOption::RatingAsc => "rating_asc",
            SortOption::NameAsc => "name_asc",
            SortOption::NameDesc => "name_desc",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str() == s.trim())
            .ok_or_else(|| format!("unknown sort option: {s}"))
    }
}

/// What the user asked for on a listing page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchQuery {
    /// Free-text location, matched case-insensitively as a substring
    pub location_text: String,
    /// Location picked from the list of known locations; wins over the text
    pub selected_location: Option<String>,
    pub sort: SortOption,
}

impl SearchQuery {
    pub fn text(location: impl Into<String>) -> Self {
        Self {
            location_text: location.into(),
            ..Default::default()
        }
    }

    pub fn selected(location: impl Into<String>) -> Self {
        Self {
            selected_location: Some(location.into()),
            ..Default::default()
        }
    }

    pub fn sorted_by(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }
}
