//! Configuration templates
//!
//! Query configurations shipped with a view are templates: their query
//! fields may contain `{{name}}` placeholders filled in from the runtime
//! context (the selected enterprise, the current user, ...). A
//! [`TemplateResolver`] turns a template and a context into a concrete
//! configuration, or reports that it cannot yet.

use serde_json::Value;

use crate::model::QueryConfiguration;

/// Runtime values available to placeholders.
pub type Context = serde_json::Map<String, Value>;

/// Resolves placeholders in a configuration against a context.
pub trait TemplateResolver: Send + Sync {
    /// Returns the resolved configuration, or `None` if some placeholder
    /// has no value in `context`.
    fn resolve(&self, config: &QueryConfiguration, context: &Context) -> Option<QueryConfiguration>;
}

/// Returns every configuration unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl TemplateResolver for IdentityResolver {
    fn resolve(
        &self,
        config: &QueryConfiguration,
        _context: &Context,
    ) -> Option<QueryConfiguration> {
        Some(config.clone())
    }
}

/// Substitutes `{{path}}` placeholders from the context.
///
/// Paths may be dotted (`{{enterprise.ID}}`) to reach into nested objects.
/// Strings are inserted as-is, numbers and booleans in their JSON form. A
/// path that is missing or `null` makes the whole configuration
/// unresolvable.
///
/// # Example
///
/// ```
/// use vsd_lib::model::{Query, QueryConfiguration};
/// use vsd_lib::template::{Context, PlaceholderResolver, TemplateResolver};
///
/// let config = QueryConfiguration::new(
///     Query::new("enterprises").parent_id("{{enterprise.ID}}").resource("domains"),
/// );
///
/// let context: Context = serde_json::from_str(r#"{"enterprise": {"ID": "42"}}"#).unwrap();
/// let resolved = PlaceholderResolver.resolve(&config, &context).unwrap();
/// assert_eq!(resolved.query.parent_id.as_deref(), Some("42"));
///
/// assert!(PlaceholderResolver.resolve(&config, &Context::new()).is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderResolver;

impl TemplateResolver for PlaceholderResolver {
    fn resolve(
        &self,
        config: &QueryConfiguration,
        context: &Context,
    ) -> Option<QueryConfiguration> {
        let mut resolved = config.clone();

        resolved.id = substitute_opt(config.id.as_deref(), context)?;
        resolved.viz_id = substitute_opt(config.viz_id.as_deref(), context)?;

        let query = &mut resolved.query;
        query.parent_resource = substitute(&config.query.parent_resource, context)?;
        query.parent_id = substitute_opt(config.query.parent_id.as_deref(), context)?;
        query.resource = substitute_opt(config.query.resource.as_deref(), context)?;
        query.filter = substitute_opt(config.query.filter.as_deref(), context)?;
        query.sort = substitute_opt(config.query.sort.as_deref(), context)?;

        Some(resolved)
    }
}

/// Outer `None` means unresolvable; inner `None` means the field was absent.
fn substitute_opt(template: Option<&str>, context: &Context) -> Option<Option<String>> {
    match template {
        Some(template) => substitute(template, context).map(Some),
        None => Some(None),
    }
}

fn substitute(template: &str, context: &Context) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start + 2..].find("}}") else {
            break;
        };
        out.push_str(&rest[..start]);

        let path = rest[start + 2..start + 2 + len].trim();
        out.push_str(&lookup(context, path)?);

        rest = &rest[start + 2 + len + 2..];
    }

    out.push_str(rest);
    Some(out)
}

fn lookup(context: &Context, path: &str) -> Option<String> {
    let mut segments = path.split('.');
    let mut value = context.get(segments.next()?)?;
    for segment in segments {
        value = value.get(segment)?;
    }

    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::Query;

    fn context() -> Context {
        match json!({
            "enterprise": { "ID": "e-1", "name": "Acme" },
            "limit": 5,
            "empty": null
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_substitutes_nested_paths() {
        assert_eq!(
            substitute("name == \"{{ enterprise.name }}\"", &context()).as_deref(),
            Some("name == \"Acme\"")
        );
    }

    #[test]
    fn test_substitutes_numbers() {
        assert_eq!(substitute("{{limit}}-x", &context()).as_deref(), Some("5-x"));
    }

    #[test]
    fn test_missing_or_null_is_unresolvable() {
        assert_eq!(substitute("{{nope}}", &context()), None);
        assert_eq!(substitute("{{empty}}", &context()), None);
        assert_eq!(substitute("{{enterprise.nope}}", &context()), None);
    }

    #[test]
    fn test_unterminated_placeholder_is_literal() {
        assert_eq!(substitute("a {{b", &context()).as_deref(), Some("a {{b"));
    }

    #[test]
    fn test_resolves_whole_configuration() {
        let config = QueryConfiguration::new(
            Query::new("enterprises")
                .parent_id("{{enterprise.ID}}")
                .resource("domains")
                .filter("name == \"{{enterprise.name}}\""),
        )
        .id("{{enterprise.ID}}-table");

        let resolved = PlaceholderResolver.resolve(&config, &context()).unwrap();

        assert_eq!(resolved.id.as_deref(), Some("e-1-table"));
        assert_eq!(resolved.query.parent_id.as_deref(), Some("e-1"));
        assert_eq!(resolved.query.filter.as_deref(), Some("name == \"Acme\""));
    }

    #[test]
    fn test_identity_resolver() {
        let config = QueryConfiguration::new(Query::new("{{unresolved}}"));
        assert_eq!(IdentityResolver.resolve(&config, &Context::new()), Some(config));
    }
}
