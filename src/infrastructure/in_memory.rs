use crate::domain::ports::PropertyCatalog;
use crate::domain::property::Property;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory property catalog.
///
/// Uses `Arc<RwLock<HashMap<String, Property>>>` so clones share the same listings.
#[derive(Default, Clone)]
pub struct InMemoryPropertyCatalog {
    properties: Arc<RwLock<HashMap<String, Property>>>,
}

impl InMemoryPropertyCatalog {
    /// Creates a new, empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_properties(properties: impl IntoIterator<Item = Property>) -> Self {
        let map = properties
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect::<HashMap<_, _>>();
        Self {
            properties: Arc::new(RwLock::new(map)),
        }
    }

    /// Adds or replaces a listing.
    pub async fn insert(&self, property: Property) {
        let mut properties = self.properties.write().await;
        properties.insert(property.id.clone(), property);
    }
}

#[async_trait]
impl PropertyCatalog for InMemoryPropertyCatalog {
    async fn get(&self, property_id: &str) -> Result<Option<Property>> {
        let properties = self.properties.read().await;
        Ok(properties.get(property_id).cloned())
    }

    async fn all(&self) -> Result<Vec<Property>> {
        let properties = self.properties.read().await;
        let mut all: Vec<Property> = properties.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }
}
