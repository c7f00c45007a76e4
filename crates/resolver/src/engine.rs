//! Resolution and instantiation behind one handle.

use std::sync::Arc;

use crate::{
    backend::InstanceBackend,
    cache::{CacheStats, InstanceCache},
    catalog::{FontCatalog, FontFace},
    config::EngineConfig,
    coords::FontInstanceKey,
    error::Result,
    resolver::InstanceResolver,
    request::StyleRequest,
};

/// Resolves style requests and hands out shared instances.
///
/// `FontEngine` is `Sync` whenever its backend is, so one engine can serve
/// many threads.
pub struct FontEngine<B: InstanceBackend> {
    resolver: InstanceResolver,
    cache: InstanceCache<B>,
}

impl<B: InstanceBackend> FontEngine<B> {
    pub fn new(catalog: Arc<FontCatalog>, backend: B, config: &EngineConfig) -> Self {
        Self {
            resolver: InstanceResolver::new(catalog, config),
            cache: InstanceCache::new(backend, config.cache_capacity),
        }
    }

    /// Resolve `request` against `family` without instantiating.
    pub fn resolve(&self, family: &str, request: &StyleRequest) -> Result<FontInstanceKey> {
        self.resolver.resolve(family, request)
    }

    /// Resolve `request` by its own family and return the shared instance.
    ///
    /// # Errors
    ///
    /// - `Error::NoMatchingFace` if the family has no faces
    /// - `Error::InstantiationFailed` if the backend fails
    pub fn instance(&self, request: &StyleRequest) -> Result<Arc<B::Instance>> {
        let key = self.resolver.resolve_request(request)?;
        self.cache.get_or_create(&key)
    }

    /// Resolve a fallback face for `text` and return the shared instance.
    ///
    /// # Errors
    ///
    /// - `Error::NoFallbackFace` if no face covers the text
    /// - `Error::InstantiationFailed` if the backend fails
    pub fn fallback_instance(
        &self,
        like: Option<&FontFace>,
        request: &StyleRequest,
        text: &str,
    ) -> Result<Arc<B::Instance>> {
        let key = self.resolver.resolve_fallback(like, request, text)?;
        self.cache.get_or_create(&key)
    }

    /// Instance for an already resolved key.
    pub fn instance_for(&self, key: &FontInstanceKey) -> Result<Arc<B::Instance>> {
        self.cache.get_or_create(key)
    }

    pub fn catalog(&self) -> &Arc<FontCatalog> {
        self.resolver.catalog()
    }

    pub fn resolver(&self) -> &InstanceResolver {
        &self.resolver
    }

    pub fn cache(&self) -> &InstanceCache<B> {
        &self.cache
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
