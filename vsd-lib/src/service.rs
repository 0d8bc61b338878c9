//! Main VsdService

use std::sync::Arc;

use crate::api::query;
use crate::api::query::SearchToken;
use crate::api::query::Sort;
use crate::model::QueryConfiguration;
use crate::template::Context;
use crate::template::PlaceholderResolver;
use crate::template::TemplateResolver;
use crate::transform::TransformRegistry;
use crate::transport::Transport;

/// The entry point of the query layer.
///
/// Ties a [`Transport`] to the transform registry and template resolver a
/// view uses. This service is cheap to clone (uses `Arc` internally) and
/// can be shared across threads safely.
///
/// # Example
///
/// ```ignore
/// use vsd_lib::VsdService;
/// use vsd_lib::transport::{Credentials, HttpTransport};
///
/// let transport = HttpTransport::builder()
///     .url("https://vsd.example.com:8443")
///     .credentials(Credentials::new("csproot", "csproot", "csp"))
///     .build()?;
///
/// let service = VsdService::builder().transport(transport).build();
/// let page = service.fetch(&config).await?;
/// ```
#[derive(Clone)]
pub struct VsdService {
    inner: Arc<VsdServiceInner>,
}

struct VsdServiceInner {
    transport: Arc<dyn Transport>,
    transforms: Arc<TransformRegistry>,
    resolver: Arc<dyn TemplateResolver>,
}

impl VsdService {
    /// Creates a new builder for constructing a service.
    pub fn builder() -> VsdServiceBuilder<Missing> {
        VsdServiceBuilder::new()
    }

    /// Returns the transport requests go through.
    pub fn transport(&self) -> &dyn Transport {
        self.inner.transport.as_ref()
    }

    /// Returns the transform registry results are dispatched through.
    pub fn transforms(&self) -> &TransformRegistry {
        &self.inner.transforms
    }

    /// Returns `true` if the transport's last request reached the server.
    pub fn is_connected(&self) -> bool {
        self.inner.transport.is_connected()
    }

    /// Derives the request identity of `config` in `context`.
    ///
    /// Returns `None` while the configuration's placeholders cannot be
    /// resolved. See [`query::request_id`].
    pub fn request_id(&self, config: &QueryConfiguration, context: &Context) -> Option<String> {
        query::request_id(config, context, self.inner.resolver.as_ref())
    }

    /// Resolves `config` against `context` with the service's resolver.
    pub fn resolve(
        &self,
        config: &QueryConfiguration,
        context: &Context,
    ) -> Option<QueryConfiguration> {
        self.inner.resolver.resolve(config, context)
    }

    /// Applies a column sort. See [`query::mutate::add_sorting`].
    pub fn add_sorting(
        &self,
        config: Option<QueryConfiguration>,
        sort: Option<&Sort>,
    ) -> Option<QueryConfiguration> {
        query::mutate::add_sorting(config, sort)
    }

    /// Adds search criteria. See [`query::mutate::add_searching`].
    pub fn add_searching(
        &self,
        config: Option<QueryConfiguration>,
        tokens: &[SearchToken],
    ) -> Option<QueryConfiguration> {
        query::mutate::add_searching(config, tokens)
    }

    /// Sets the page size. See [`query::mutate::set_page_size`].
    pub fn update_page_size(
        &self,
        config: Option<QueryConfiguration>,
        page_size: u32,
    ) -> Option<QueryConfiguration> {
        query::mutate::set_page_size(config, page_size)
    }

    /// Points the configuration at `next_page`. See [`query::mutate::set_next_page`].
    pub fn next_page_query(
        &self,
        config: Option<QueryConfiguration>,
        next_page: u32,
    ) -> Option<QueryConfiguration> {
        query::mutate::set_next_page(config, next_page)
    }
}

impl std::fmt::Debug for VsdService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VsdService")
            .field("transforms", &self.inner.transforms)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`VsdService`].
///
/// # Required Fields
///
/// - `transport` - A [`Transport`] implementation
///
/// # Defaults
///
/// - `transforms` - [`TransformRegistry::global()`]
/// - `resolver` - [`PlaceholderResolver`]
pub struct VsdServiceBuilder<T> {
    transport: T,
    transforms: Option<Arc<TransformRegistry>>,
    resolver: Arc<dyn TemplateResolver>,
}

impl VsdServiceBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            transport: Missing,
            transforms: None,
            resolver: Arc::new(PlaceholderResolver),
        }
    }

    /// Sets the transport requests go through.
    pub fn transport<T: Transport + 'static>(
        self,
        transport: T,
    ) -> VsdServiceBuilder<Set<Arc<dyn Transport>>> {
        VsdServiceBuilder {
            transport: Set(Arc::new(transport) as Arc<dyn Transport>),
            transforms: self.transforms,
            resolver: self.resolver,
        }
    }
}

impl Default for VsdServiceBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> VsdServiceBuilder<T> {
    /// Sets the transform registry.
    pub fn transforms(mut self, registry: TransformRegistry) -> Self {
        self.transforms = Some(Arc::new(registry));
        self
    }

    /// Sets the template resolver used for request identities.
    pub fn resolver<R: TemplateResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }
}

impl VsdServiceBuilder<Set<Arc<dyn Transport>>> {
    /// Builds the [`VsdService`].
    pub fn build(self) -> VsdService {
        VsdService {
            inner: Arc::new(VsdServiceInner {
                transport: self.transport.0,
                transforms: self.transforms.unwrap_or_else(TransformRegistry::global),
                resolver: self.resolver,
            }),
        }
    }
}
