//! Query configuration model

use serde::Deserialize;
use serde::Serialize;

/// The declarative description of what to fetch.
///
/// A configuration is created by the caller (usually deserialised from the
/// JSON a view ships with), threaded through the mutators in
/// [`crate::api::query::mutate`], and consumed by
/// [`VsdService::fetch`](crate::VsdService::fetch). When more pages remain,
/// the fetch hands back a *new* configuration for the next page; the
/// original is left untouched.
///
/// # Example
///
/// ```
/// use vsd_lib::model::QueryConfiguration;
///
/// let config: QueryConfiguration = serde_json::from_str(r#"{
///     "id": "domains-table",
///     "vizID": "dashboard",
///     "query": {
///         "parentResource": "enterprises",
///         "parentID": "42",
///         "resource": "domains",
///         "pageSize": 100
///     }
/// }"#).unwrap();
///
/// assert_eq!(config.query.parent_id.as_deref(), Some("42"));
/// assert_eq!(config.query.page_size, Some(100));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryConfiguration {
    /// Caller-assigned identifier, used to namespace the request identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Identifier of the owning view.
    #[serde(rename = "vizID", default, skip_serializing_if = "Option::is_none")]
    pub viz_id: Option<String>,
    /// Name of a registered result transform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabify: Option<String>,
    /// The remote query itself.
    pub query: Query,
}

impl QueryConfiguration {
    /// Creates a configuration around a query.
    pub fn new(query: Query) -> Self {
        Self {
            id: None,
            viz_id: None,
            tabify: None,
            query,
        }
    }

    /// Sets the caller-assigned identifier.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the owning view identifier.
    pub fn viz_id(mut self, viz_id: impl Into<String>) -> Self {
        self.viz_id = Some(viz_id.into());
        self
    }

    /// Sets the result transform name.
    pub fn tabify(mut self, name: impl Into<String>) -> Self {
        self.tabify = Some(name.into());
        self
    }

    /// Sets the page size override.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.query.page_size = Some(page_size);
        self
    }

    /// Sets the zero-based index of the next page to fetch.
    pub fn with_next_page(mut self, next_page: u32) -> Self {
        self.query.next_page = Some(next_page);
        self
    }
}

/// The remote part of a [`QueryConfiguration`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// Resource naming the parent scope (e.g. "enterprises").
    pub parent_resource: String,
    /// Identifier of the parent instance.
    #[serde(rename = "parentID", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Resource collection to list under the parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Compiled filter expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// `"<column> <asc|desc>"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Page size override; falls back to the transport default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Zero-based page index for the next fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<u32>,
}

impl Query {
    /// Creates a query listing `parent_resource`.
    pub fn new(parent_resource: impl Into<String>) -> Self {
        Self {
            parent_resource: parent_resource.into(),
            ..Default::default()
        }
    }

    /// Sets the parent instance identifier.
    pub fn parent_id(mut self, id: impl Into<String>) -> Self {
        self.parent_id = Some(id.into());
        self
    }

    /// Sets the child resource collection.
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Sets the filter expression.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Sets the raw sort expression.
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Returns the filter if it is set and non-empty.
    pub fn active_filter(&self) -> Option<&str> {
        self.filter.as_deref().filter(|f| !f.is_empty())
    }
}
