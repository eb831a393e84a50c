// Validated endpoint registry

use crate::builtin::{builtin_descriptors, RECOMMENDED_CLOUD, RECOMMENDED_LOCAL};
use crate::descriptor::{Category, EndpointDescriptor};
use crate::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Curated recommended server keys per category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedSet {
    /// Recommended cloud server keys
    pub cloud: Vec<String>,

    /// Recommended local server keys
    pub local: Vec<String>,
}

impl Default for RecommendedSet {
    fn default() -> Self {
        Self {
            cloud: RECOMMENDED_CLOUD.iter().map(|k| k.to_string()).collect(),
            local: RECOMMENDED_LOCAL.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl RecommendedSet {
    /// Keys curated for a category
    pub fn for_category(&self, category: Category) -> &[String] {
        match category {
            Category::Cloud => &self.cloud,
            Category::Local => &self.local,
        }
    }

    /// True if `key` is curated for `category`
    pub fn contains(&self, category: Category, key: &str) -> bool {
        self.for_category(category).iter().any(|k| k == key)
    }
}

/// Catalog adjustments, usually read from the `[catalog]` table of a config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogOverrides {
    /// Extra descriptors; an existing key is replaced in place
    pub endpoints: Vec<EndpointDescriptor>,

    /// Keys to remove from the catalog
    pub disabled: Vec<String>,

    /// Replacement for the curated cloud recommendations
    pub recommended_cloud: Option<Vec<String>>,

    /// Replacement for the curated local recommendations
    pub recommended_local: Option<Vec<String>>,
}

impl CatalogOverrides {
    /// True if applying these overrides changes nothing
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
            && self.disabled.is_empty()
            && self.recommended_cloud.is_none()
            && self.recommended_local.is_none()
    }
}

/// Registry of endpoint descriptors keyed by server key
///
/// Every descriptor held here has passed validation: keys are non-empty and
/// unique, and default ports parse to 1..=65535. Iteration follows insertion order.
#[derive(Debug, Clone)]
pub struct EndpointCatalog {
    /// Descriptors in catalog order
    entries: Vec<EndpointDescriptor>,

    /// Server key to position in `entries`
    index: HashMap<String, usize>,

    /// Curated recommendations
    recommended: RecommendedSet,
}

impl EndpointCatalog {
    /// Catalog of the built-in endpoints with the default curated recommendations
    pub fn builtin() -> Self {
        // The built-in table is covered by tests; validation cannot fail here.
        match Self::from_descriptors(builtin_descriptors()) {
            Ok(catalog) => catalog,
            Err(err) => unreachable!("built-in catalog is invalid: {err}"),
        }
    }

    /// Build a validated catalog from descriptors
    ///
    /// # Arguments
    /// * `descriptors` - Descriptors in the desired iteration order
    ///
    /// # Returns
    /// The catalog, or the first validation failure
    pub fn from_descriptors(descriptors: Vec<EndpointDescriptor>) -> Result<Self> {
        let mut catalog = Self {
            entries: Vec::with_capacity(descriptors.len()),
            index: HashMap::with_capacity(descriptors.len()),
            recommended: RecommendedSet::default(),
        };

        for descriptor in descriptors {
            validate_descriptor(&descriptor)?;
            if catalog.index.contains_key(&descriptor.server_key) {
                return Err(CatalogError::DuplicateKey(descriptor.server_key));
            }
            catalog.push(descriptor);
        }

        catalog.prune_recommended();
        Ok(catalog)
    }

    /// Replace the curated recommendations
    ///
    /// Every key must exist in the catalog and belong to the matching category.
    pub fn with_recommended(mut self, recommended: RecommendedSet) -> Result<Self> {
        for category in [Category::Cloud, Category::Local] {
            for key in recommended.for_category(category) {
                let descriptor = self.get(key)?;
                if descriptor.category != category {
                    return Err(CatalogError::CategoryMismatch {
                        key: key.clone(),
                        expected: category,
                        actual: descriptor.category,
                    });
                }
            }
        }
        self.recommended = recommended;
        Ok(self)
    }

    /// Apply overrides: disable keys, add or replace descriptors, then swap
    /// curated recommendations
    pub fn with_overrides(mut self, overrides: &CatalogOverrides) -> Result<Self> {
        for key in &overrides.disabled {
            if !self.contains(key) {
                return Err(CatalogError::UnknownServer(key.clone()));
            }
            debug!("Disabling endpoint: {}", key);
            self.entries.retain(|d| d.server_key != *key);
            self.reindex();
        }

        for descriptor in &overrides.endpoints {
            validate_descriptor(descriptor)?;
            if let Some(&slot) = self.index.get(&descriptor.server_key) {
                debug!("Replacing endpoint: {}", descriptor.server_key);
                self.entries[slot] = descriptor.clone();
            } else {
                debug!("Adding endpoint: {}", descriptor.server_key);
                self.push(descriptor.clone());
            }
        }
        // A replacement may move a curated key to the other category.
        self.prune_recommended();

        let mut recommended = self.recommended.clone();
        if let Some(cloud) = &overrides.recommended_cloud {
            recommended.cloud = cloud.clone();
        }
        if let Some(local) = &overrides.recommended_local {
            recommended.local = local.clone();
        }

        // Explicitly listed keys must exist in the right category.
        self.recommended = RecommendedSet {
            cloud: Vec::new(),
            local: Vec::new(),
        };
        self.with_recommended(recommended)
    }

    /// Look up a descriptor by server key
    pub fn get(&self, key: &str) -> Result<&EndpointDescriptor> {
        self.index
            .get(key)
            .map(|&slot| &self.entries[slot])
            .ok_or_else(|| CatalogError::UnknownServer(key.to_string()))
    }

    /// True if the catalog holds `key`
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Descriptors in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &EndpointDescriptor> + '_ {
        self.entries.iter()
    }

    /// Descriptors of one category, in catalog order
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &EndpointDescriptor> + '_ {
        self.entries.iter().filter(move |d| d.category == category)
    }

    /// Number of descriptors
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the catalog holds no descriptors
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Curated recommendations
    pub fn recommended(&self) -> &RecommendedSet {
        &self.recommended
    }

    /// Descriptor flag OR membership in its category's curated set
    pub fn is_recommended(&self, descriptor: &EndpointDescriptor) -> bool {
        descriptor.is_recommended
            || self
                .recommended
                .contains(descriptor.category, &descriptor.server_key)
    }

    fn push(&mut self, descriptor: EndpointDescriptor) {
        self.index
            .insert(descriptor.server_key.clone(), self.entries.len());
        self.entries.push(descriptor);
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(slot, d)| (d.server_key.clone(), slot))
            .collect();
        self.prune_recommended();
    }

    /// Drop curated keys the catalog no longer holds under their category
    fn prune_recommended(&mut self) {
        let index = &self.index;
        let entries = &self.entries;
        let keep = |category: Category, key: &String| {
            let present = index
                .get(key)
                .map(|&slot| entries[slot].category == category)
                .unwrap_or(false);
            if !present {
                warn!(
                    "Dropping curated {} recommendation '{}': no {} endpoint with that key",
                    category, key, category
                );
            }
            present
        };
        self.recommended.cloud.retain(|k| keep(Category::Cloud, k));
        self.recommended.local.retain(|k| keep(Category::Local, k));
    }
}

impl Default for EndpointCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_descriptor(descriptor: &EndpointDescriptor) -> Result<()> {
    if descriptor.server_key.trim().is_empty() {
        return Err(CatalogError::EmptyKey);
    }
    if descriptor.port_number().is_none() {
        return Err(CatalogError::InvalidPort {
            key: descriptor.server_key.clone(),
            port: descriptor.default_port.clone(),
        });
    }
    Ok(())
}
