//! Search tokens and their compilation into a VSD filter expression.

use serde::Deserialize;
use serde::Serialize;

/// One token of a search expression, as produced by a search box.
///
/// A search is an ordered sequence of tokens. Compilation is a plain
/// left-to-right concatenation: brackets are not balanced, operators are not
/// checked, and values are not escaped.
///
/// Tokens deserialise from the three JSON shapes the UI emits:
///
/// ```
/// use vsd_lib::api::query::SearchToken;
///
/// let tokens: Vec<SearchToken> = serde_json::from_str(r#"[
///     {"bracket": "("},
///     {"element": {"category": "name", "operator": "==", "value": "web"}},
///     {"operator": "OR"},
///     {"element": {"category": "name", "operator": "==", "value": "db"}},
///     {"bracket": ")"}
/// ]"#).unwrap();
///
/// assert_eq!(
///     vsd_lib::api::query::compile(&tokens),
///     r#"(name == "web" OR name == "db")"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchToken {
    /// Boolean joiner, emitted surrounded by spaces.
    Operator {
        /// e.g. `AND`, `OR`.
        operator: String,
    },
    /// `(` or `)`, emitted verbatim.
    Bracket {
        /// The bracket character.
        bracket: String,
    },
    /// A single comparison.
    Element {
        /// The comparison.
        element: SearchElement,
    },
}

/// A single `<category> <operator> "<value>"` comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchElement {
    /// Attribute compared.
    pub category: String,
    /// Relational operator (e.g. `==`, `!=`, `CONTAINS`).
    pub operator: String,
    /// Compared value, quoted but not escaped.
    pub value: String,
}

impl SearchToken {
    /// Creates an operator token.
    pub fn operator(operator: impl Into<String>) -> Self {
        Self::Operator {
            operator: operator.into(),
        }
    }

    /// Creates an opening bracket token.
    pub fn open() -> Self {
        Self::Bracket {
            bracket: "(".to_string(),
        }
    }

    /// Creates a closing bracket token.
    pub fn close() -> Self {
        Self::Bracket {
            bracket: ")".to_string(),
        }
    }

    /// Creates a comparison token.
    pub fn element(
        category: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Element {
            element: SearchElement {
                category: category.into(),
                operator: operator.into(),
                value: value.into(),
            },
        }
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Self::Operator { operator } => {
                out.push(' ');
                out.push_str(operator);
                out.push(' ');
            }
            Self::Bracket { bracket } => out.push_str(bracket),
            Self::Element { element } => {
                out.push_str(&format!(
                    "{} {} \"{}\"",
                    element.category, element.operator, element.value
                ));
            }
        }
    }
}

/// Compiles search tokens into a filter expression.
///
/// An empty token list yields an empty string.
pub fn compile(tokens: &[SearchToken]) -> String {
    let mut expression = String::new();
    for token in tokens {
        token.write_to(&mut expression);
    }
    expression
}
