use serde::{Deserialize, Serialize};

/// Category selection in the shop sidebar: the "all" sentinel or one category name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(s: &str) -> Self {
        if s.is_empty() || s == "all" {
            Self::All
        } else {
            Self::Named(s.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Default,
    #[serde(rename = "price-low")]
    PriceAscending,
    #[serde(rename = "price-high")]
    PriceDescending,
    #[serde(rename = "rating")]
    RatingDescending,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Default,
        SortKey::PriceAscending,
        SortKey::PriceDescending,
        SortKey::RatingDescending,
    ];

    /// Next key in select-box order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Default => Self::PriceAscending,
            Self::PriceAscending => Self::PriceDescending,
            Self::PriceDescending => Self::RatingDescending,
            Self::RatingDescending => Self::Default,
        }
    }

    /// Human label as shown in the sort selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::PriceAscending => "Price: Low to High",
            Self::PriceDescending => "Price: High to Low",
            Self::RatingDescending => "Rating",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::PriceAscending => write!(f, "price-low"),
            Self::PriceDescending => write!(f, "price-high"),
            Self::RatingDescending => write!(f, "rating"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "price-low" | "price-asc" => Ok(Self::PriceAscending),
            "price-high" | "price-desc" => Ok(Self::PriceDescending),
            "rating" => Ok(Self::RatingDescending),
            _ => Err(format!(
                "unknown sort key: {s} (valid: default, price-low, price-high, rating)"
            )),
        }
    }
}

/// Transient shop controls. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub sort: SortKey,
    pub search: String,
}

impl FilterState {
    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// The "Clear Filters" action: back to all categories and no search term.
    /// The sort key is left alone.
    pub fn clear(&mut self) {
        self.category = CategoryFilter::All;
        self.search.clear();
    }
}
