//! View parameters for the product list.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Number of products shown per page. Not user-configurable.
pub const PAGE_SIZE: usize = 5;

/// Errors that can occur when parsing a [`SortOption`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SortOptionError {
    /// The token does not name a known sort order.
    #[error("unknown sort option: {0}")]
    Unknown(String),
}

/// Sort order applied to the qualifying products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Keep the order returned by the catalog service.
    #[default]
    None,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Title A to Z.
    TitleAsc,
    /// Title Z to A.
    TitleDesc,
}

impl SortOption {
    /// Every option, in the order the sort selector lists them.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::TitleAsc,
        Self::TitleDesc,
    ];

    /// Wire token for this option.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::TitleAsc => "title_asc",
            Self::TitleDesc => "title_desc",
        }
    }

    /// Human-readable label for the sort selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Sort By",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::TitleAsc => "Title: A to Z",
            Self::TitleDesc => "Title: Z to A",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOption {
    type Err = SortOptionError;

    /// Parses a wire token. The empty string selects [`SortOption::None`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Self::None),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "title_asc" => Ok(Self::TitleAsc),
            "title_desc" => Ok(Self::TitleDesc),
            other => Err(SortOptionError::Unknown(other.to_string())),
        }
    }
}

/// Parameters that shape the derived product list.
///
/// One instance lives for the whole session, owned by the list controller.
/// Empty `search_term` and `selected_category` mean "no filtering".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewParameters {
    /// Case-insensitive substring matched against product titles.
    pub search_term: String,
    /// Category to keep, compared case-insensitively.
    pub selected_category: String,
    /// Sort order for the qualifying products.
    pub sort_option: SortOption,
    /// One-based page number.
    pub current_page: usize,
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            selected_category: String::new(),
            sort_option: SortOption::None,
            current_page: 1,
        }
    }
}

impl ViewParameters {
    /// Page size used by the pipeline.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        PAGE_SIZE
    }
}
