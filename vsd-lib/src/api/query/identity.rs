//! Request identity keys.

use crate::model::QueryConfiguration;
use crate::template::Context;
use crate::template::TemplateResolver;

/// Derives the key identifying the request a configuration will issue.
///
/// The key is `<parent>[/<parentID>][/<resource>]`, prefixed with
/// `<vizID>-<id>-` when the configuration carries both identifiers as
/// non-empty strings, and suffixed with `-<filter>` when the resolved query
/// has a filter. Callers use it to deduplicate or track in-flight requests.
///
/// Returns `None` when the resolver cannot resolve the configuration yet.
///
/// # Example
///
/// ```
/// use vsd_lib::api::query::request_id;
/// use vsd_lib::model::{Query, QueryConfiguration};
/// use vsd_lib::template::{Context, IdentityResolver};
///
/// let config = QueryConfiguration::new(Query::new("a").parent_id("1").resource("b"))
///     .viz_id("V")
///     .id("X");
///
/// assert_eq!(
///     request_id(&config, &Context::new(), &IdentityResolver).as_deref(),
///     Some("V-X-a/1/b")
/// );
/// ```
pub fn request_id(
    config: &QueryConfiguration,
    context: &Context,
    resolver: &dyn TemplateResolver,
) -> Option<String> {
    let resolved = resolver.resolve(config, context)?;
    let query = &resolved.query;

    let mut endpoint = query.parent_resource.clone();
    if let Some(parent_id) = &query.parent_id {
        endpoint.push('/');
        endpoint.push_str(parent_id);
    }
    if let Some(resource) = &query.resource {
        endpoint.push('/');
        endpoint.push_str(resource);
    }

    // Namespacing reads the unresolved identifiers; empty ones count as absent.
    let viz_id = config.viz_id.as_deref().filter(|s| !s.is_empty());
    let id = config.id.as_deref().filter(|s| !s.is_empty());
    if let (Some(viz_id), Some(id)) = (viz_id, id) {
        endpoint = format!("{}-{}-{}", viz_id, id, endpoint);
    }

    match query.active_filter() {
        Some(filter) => Some(format!("{}-{}", endpoint, filter)),
        None => Some(endpoint),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Query;
    use crate::template::IdentityResolver;
    use crate::template::PlaceholderResolver;

    fn id_of(config: &QueryConfiguration) -> Option<String> {
        request_id(config, &Context::new(), &IdentityResolver)
    }

    #[test]
    fn test_plain_endpoint() {
        let config = QueryConfiguration::new(Query::new("enterprises"));
        assert_eq!(id_of(&config).as_deref(), Some("enterprises"));
    }

    #[test]
    fn test_prefixed_endpoint() {
        let config = QueryConfiguration::new(Query::new("a").parent_id("1").resource("b"))
            .viz_id("V")
            .id("X");
        assert_eq!(id_of(&config).as_deref(), Some("V-X-a/1/b"));
    }

    #[test]
    fn test_prefix_requires_both_ids() {
        let only_id = QueryConfiguration::new(Query::new("a")).id("X");
        let only_viz = QueryConfiguration::new(Query::new("a")).viz_id("V");

        assert_eq!(id_of(&only_id).as_deref(), Some("a"));
        assert_eq!(id_of(&only_viz).as_deref(), Some("a"));
    }

    #[test]
    fn test_empty_ids_add_no_prefix() {
        let empty_id = QueryConfiguration::new(Query::new("a")).viz_id("V").id("");
        let empty_viz = QueryConfiguration::new(Query::new("a")).viz_id("").id("X");

        assert_eq!(id_of(&empty_id).as_deref(), Some("a"));
        assert_eq!(id_of(&empty_viz).as_deref(), Some("a"));
    }

    #[test]
    fn test_filter_suffix() {
        let config = QueryConfiguration::new(Query::new("a").resource("b").filter("name == \"x\""));
        assert_eq!(id_of(&config).as_deref(), Some("a/b-name == \"x\""));
    }

    #[test]
    fn test_empty_filter_is_ignored() {
        let config = QueryConfiguration::new(Query::new("a").filter(""));
        assert_eq!(id_of(&config).as_deref(), Some("a"));
    }

    #[test]
    fn test_unresolvable_configuration() {
        let config = QueryConfiguration::new(Query::new("a").parent_id("{{missing}}"));
        assert_eq!(request_id(&config, &Context::new(), &PlaceholderResolver), None);
    }

    #[test]
    fn test_deterministic() {
        let config = QueryConfiguration::new(Query::new("a").parent_id("1")).viz_id("V").id("X");
        assert_eq!(id_of(&config), id_of(&config));
    }
}
