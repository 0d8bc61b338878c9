//! Named result transforms
//!
//! A configuration may name a transform in its `tabify` field. The
//! transform reshapes a page's raw rows before they reach the caller, e.g.
//! flattening nested statistics into table columns. Transforms are looked
//! up by name in a [`TransformRegistry`] that is populated at start-up and
//! read-only afterwards.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::OnceLock;

use serde_json::Value;

use crate::error::TransformError;
use crate::model::QueryConfiguration;

/// A result transform: raw rows in, reshaped rows out.
pub type TransformFn = Arc<dyn Fn(Vec<Value>) -> Vec<Value> + Send + Sync>;

static GLOBAL: OnceLock<Arc<TransformRegistry>> = OnceLock::new();

/// Mapping from transform name to transform function.
///
/// # Example
///
/// ```
/// use serde_json::{json, Value};
/// use vsd_lib::model::{Query, QueryConfiguration};
/// use vsd_lib::transform::TransformRegistry;
///
/// let registry = TransformRegistry::new().register("names", |rows: Vec<Value>| {
///     rows.into_iter().map(|row| row["name"].clone()).collect()
/// });
///
/// let config = QueryConfiguration::new(Query::new("enterprises")).tabify("names");
/// let rows = registry.apply(vec![json!({"name": "Acme", "ID": "1"})], &config).unwrap();
/// assert_eq!(rows, vec![json!("Acme")]);
/// ```
#[derive(Clone, Default)]
pub struct TransformRegistry {
    transforms: HashMap<String, TransformFn>,
}

impl TransformRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a transform under `name`, replacing any previous one.
    pub fn register<F>(mut self, name: impl Into<String>, transform: F) -> Self
    where
        F: Fn(Vec<Value>) -> Vec<Value> + Send + Sync + 'static,
    {
        self.transforms.insert(name.into(), Arc::new(transform));
        self
    }

    /// Looks up a transform by name.
    pub fn get(&self, name: &str) -> Option<&TransformFn> {
        self.transforms.get(name)
    }

    /// Returns `true` if a transform is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.transforms.contains_key(name)
    }

    /// Returns the registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.transforms.keys().map(String::as_str)
    }

    /// Applies the transform named by `config.tabify`, if any.
    ///
    /// Rows pass through unchanged when no transform is configured (absent or
    /// empty name). A name with no registered transform is an error, never a
    /// passthrough.
    pub fn apply(
        &self,
        rows: Vec<Value>,
        config: &QueryConfiguration,
    ) -> Result<Vec<Value>, TransformError> {
        let Some(name) = config.tabify.as_deref().filter(|name| !name.is_empty()) else {
            return Ok(rows);
        };

        let transform = self
            .get(name)
            .ok_or_else(|| TransformError::NotFound(name.to_string()))?;
        Ok(transform(rows))
    }

    /// Installs this registry as the process-wide default.
    ///
    /// Can only succeed once, and only before the first call to
    /// [`global`](Self::global); later calls hand the registry back.
    pub fn install(self) -> Result<(), Self> {
        let registry = Arc::new(self);
        GLOBAL.set(registry).map_err(|rejected| {
            Arc::try_unwrap(rejected).unwrap_or_else(|shared| (*shared).clone())
        })
    }

    /// Returns the process-wide registry, empty if none was installed.
    pub fn global() -> Arc<TransformRegistry> {
        GLOBAL.get_or_init(|| Arc::new(TransformRegistry::new())).clone()
    }
}

impl std::fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("TransformRegistry").field("transforms", &names).finish()
    }
}
