//! Provider registry keyed by capability name.

use super::RegistryError;
use crate::agent::{
    domain::{CapabilityDescriptor, CapabilityName},
    ports::CapabilityProvider,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Immutable mapping from capability name to provider.
///
/// Built once at startup through [`ProviderRegistryBuilder`], which rejects
/// duplicate names and requires the designated default provider to be
/// present. Share it behind an [`Arc`]; it is never written after
/// construction.
pub struct ProviderRegistry {
    providers: HashMap<CapabilityName, Arc<dyn CapabilityProvider>>,
    descriptors: Vec<CapabilityDescriptor>,
    default_name: CapabilityName,
    default_provider: Arc<dyn CapabilityProvider>,
}

impl ProviderRegistry {
    /// Starts a registry whose fallback provider is `default_name`.
    #[must_use]
    pub const fn builder(default_name: CapabilityName) -> ProviderRegistryBuilder {
        ProviderRegistryBuilder {
            default_name,
            providers: Vec::new(),
        }
    }

    /// Returns every descriptor in registration order.
    #[must_use]
    pub fn descriptors(&self) -> &[CapabilityDescriptor] {
        &self.descriptors
    }

    /// Returns the default provider's name.
    #[must_use]
    pub const fn default_name(&self) -> &CapabilityName {
        &self.default_name
    }

    /// Returns the default provider.
    #[must_use]
    pub const fn default_provider(&self) -> &Arc<dyn CapabilityProvider> {
        &self.default_provider
    }

    /// Looks up a provider by exact name.
    #[must_use]
    pub fn lookup(&self, name: &CapabilityName) -> Option<&Arc<dyn CapabilityProvider>> {
        self.providers.get(name)
    }

    /// Looks up a provider, falling back to the default provider when the
    /// name is unknown.
    ///
    /// Returns the name of the provider actually resolved alongside it.
    #[must_use]
    pub fn resolve(
        &self,
        name: &CapabilityName,
    ) -> (&CapabilityName, &Arc<dyn CapabilityProvider>) {
        self.providers.get_key_value(name).map_or(
            (&self.default_name, &self.default_provider),
            |(resolved_name, provider)| (resolved_name, provider),
        )
    }

    /// Returns the number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Always `false`: construction rejects empty registries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("descriptors", &self.descriptors)
            .field("default_name", &self.default_name)
            .finish_non_exhaustive()
    }
}

/// Collects providers and validates them into a [`ProviderRegistry`].
pub struct ProviderRegistryBuilder {
    default_name: CapabilityName,
    providers: Vec<Arc<dyn CapabilityProvider>>,
}

impl ProviderRegistryBuilder {
    /// Adds a provider.
    #[must_use]
    pub fn register(mut self, provider: Arc<dyn CapabilityProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Adds several providers, keeping their order.
    #[must_use]
    pub fn register_all(
        mut self,
        providers: impl IntoIterator<Item = Arc<dyn CapabilityProvider>>,
    ) -> Self {
        self.providers.extend(providers);
        self
    }

    /// Validates the collected providers.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Empty`] when nothing was registered,
    /// [`RegistryError::DuplicateProvider`] when two providers share a name,
    /// or [`RegistryError::MissingDefaultProvider`] when the default provider
    /// is absent.
    pub fn build(self) -> Result<ProviderRegistry, RegistryError> {
        let Self {
            default_name,
            providers: registered,
        } = self;

        if registered.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut providers = HashMap::with_capacity(registered.len());
        let mut descriptors = Vec::with_capacity(registered.len());
        for provider in registered {
            let descriptor = provider.descriptor().clone();
            if providers.contains_key(descriptor.name()) {
                return Err(RegistryError::DuplicateProvider(descriptor.name().clone()));
            }
            providers.insert(descriptor.name().clone(), provider);
            descriptors.push(descriptor);
        }

        let default_provider = providers
            .get(&default_name)
            .cloned()
            .ok_or_else(|| RegistryError::MissingDefaultProvider(default_name.clone()))?;

        Ok(ProviderRegistry {
            providers,
            descriptors,
            default_name,
            default_provider,
        })
    }
}
