//! Entity references (resource name + optional ID)

use super::Query;

/// A reference to a remote resource, used to build request URLs.
///
/// VSD URLs nest resources under their parent scope, e.g.
/// `enterprises/<id>/domains`. A query resolves into two references: the
/// *parent* scope (`enterprises/<id>`) and the *target* collection
/// (`domains`).
///
/// # Examples
///
/// ```
/// use vsd_lib::model::{EntityRef, Query};
///
/// let query = Query::new("enterprises").parent_id("42").resource("domains");
///
/// let parent = EntityRef::parent_of(&query);
/// assert_eq!(parent.resource_name.as_deref(), Some("enterprises"));
/// assert_eq!(parent.id.as_deref(), Some("42"));
///
/// let target = EntityRef::target_of(&query);
/// assert_eq!(target.resource_name.as_deref(), Some("domains"));
/// assert_eq!(target.id, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EntityRef {
    /// The REST resource name (e.g. "enterprises").
    pub resource_name: Option<String>,
    /// The identifier of a single instance of the resource.
    pub id: Option<String>,
}

impl EntityRef {
    /// Creates a reference to a resource collection.
    pub fn new(resource_name: impl Into<String>) -> Self {
        Self {
            resource_name: Some(resource_name.into()),
            id: None,
        }
    }

    /// Sets the instance identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Resolves the parent scope of a query.
    ///
    /// The resource name is always the query's parent resource; the ID is
    /// included only when the query carries a parent ID.
    pub fn parent_of(query: &Query) -> Self {
        Self {
            resource_name: Some(query.parent_resource.clone()),
            id: query.parent_id.clone(),
        }
    }

    /// Resolves the target collection of a query.
    ///
    /// The target is never pre-identified; queries always fetch lists.
    pub fn target_of(query: &Query) -> Self {
        Self {
            resource_name: query.resource.clone(),
            id: None,
        }
    }

    /// Returns the non-empty path segments of this reference, in URL order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.resource_name
            .as_deref()
            .into_iter()
            .chain(self.id.as_deref())
            .filter(|segment| !segment.is_empty())
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path: Vec<_> = self.segments().collect();
        write!(f, "{}", path.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_without_id() {
        let query = Query::new("enterprises");
        let parent = EntityRef::parent_of(&query);
        assert_eq!(parent, EntityRef::new("enterprises"));
    }

    #[test]
    fn test_target_without_resource() {
        let query = Query::new("enterprises").parent_id("1");
        let target = EntityRef::target_of(&query);
        assert_eq!(target.resource_name, None);
        assert_eq!(target.id, None);
    }

    #[test]
    fn test_target_ignores_parent_id() {
        let query = Query::new("enterprises").parent_id("1").resource("domains");
        assert_eq!(EntityRef::target_of(&query), EntityRef::new("domains"));
    }

    #[test]
    fn test_display() {
        let entity = EntityRef::new("enterprises").with_id("7");
        assert_eq!(entity.to_string(), "enterprises/7");
    }
}
