//! Sort specification for query results.

use serde::Deserialize;
use serde::Serialize;

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the keyword VSD expects in an order-by expression.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A single-column sort as reported by a table header click.
///
/// An empty `order` means the column was toggled back to "unsorted"; an
/// empty `column` means nothing was selected. Both leave a configuration
/// unchanged when applied with
/// [`add_sorting`](crate::api::query::mutate::add_sorting).
///
/// # Example
///
/// ```
/// use vsd_lib::api::query::Sort;
///
/// let sort = Sort::desc("lastUpdatedDate");
/// assert_eq!(sort.expression().as_deref(), Some("lastUpdatedDate desc"));
///
/// let cleared = Sort { column: "name".into(), order: String::new() };
/// assert_eq!(cleared.expression(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sort {
    /// Column to sort on.
    pub column: String,
    /// `asc`, `desc`, or empty.
    pub order: String,
}

impl Sort {
    /// Creates a sort on `column` in the given direction.
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        Self {
            column: column.into(),
            order: direction.as_str().to_string(),
        }
    }

    /// Creates an ascending sort.
    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Asc)
    }

    /// Creates a descending sort.
    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Desc)
    }

    /// Returns `"<column> <order>"`, or `None` if either part is empty.
    pub fn expression(&self) -> Option<String> {
        if self.column.is_empty() || self.order.is_empty() {
            return None;
        }
        Some(format!("{} {}", self.column, self.order))
    }
}
