//! @ai:module:intent Fixed set of algorithm categories and category filters
//! @ai:module:layer domain
//! @ai:module:public_api AlgorithmCategory, CategoryFilter, KNOWN_CATEGORIES
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Classification of a catalogued algorithm
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmCategory {
    Sorting,
    Searching,
    Pathfinding,
}

/// Every category the service knows about, in reporting order.
pub const KNOWN_CATEGORIES: [AlgorithmCategory; 3] = [
    AlgorithmCategory::Sorting,
    AlgorithmCategory::Searching,
    AlgorithmCategory::Pathfinding,
];

impl AlgorithmCategory {
    /// @ai:intent Convert category to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmCategory::Sorting => "sorting",
            AlgorithmCategory::Searching => "searching",
            AlgorithmCategory::Pathfinding => "pathfinding",
        }
    }

    /// @ai:intent Parse a category from its wire name
    /// @ai:effects pure
    pub fn parse(value: &str) -> Option<Self> {
        KNOWN_CATEGORIES.into_iter().find(|c| c.as_str() == value)
    }
}

impl std::fmt::Display for AlgorithmCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Category scope of a query
///
/// An unrecognized value is kept as-is: it matches nothing and is never
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(AlgorithmCategory),
    Unknown(String),
}

impl CategoryFilter {
    /// @ai:intent Build a filter from an optional query parameter
    /// @ai:effects pure
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None => CategoryFilter::All,
            Some(raw) => match AlgorithmCategory::parse(raw) {
                Some(category) => CategoryFilter::Only(category),
                None => CategoryFilter::Unknown(raw.to_string()),
            },
        }
    }

    /// @ai:intent Check if a category falls within this filter
    /// @ai:effects pure
    pub fn matches(&self, category: AlgorithmCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(only) => *only == category,
            CategoryFilter::Unknown(_) => false,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "*"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
            CategoryFilter::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}
