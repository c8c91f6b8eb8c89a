//! `PropertyRepository` held in process memory.
//!
//! Used when no database URL is configured and by HTTP and behaviour tests.
//! Listings are evaluated with `PropertyPredicate::matches`, the same code
//! path as the client-side evaluator.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{PropertyRepository, PropertyRepositoryError};
use crate::domain::{Property, PropertyId, PropertyPredicate};

/// In-memory implementation of the property repository port.
#[derive(Debug, Default)]
pub struct InMemoryPropertyRepository {
    records: RwLock<HashMap<PropertyId, Property>>,
}

fn poisoned<T>(_: PoisonError<T>) -> PropertyRepositoryError {
    PropertyRepositoryError::query("in-memory property store lock poisoned")
}

impl InMemoryPropertyRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `properties`.
    pub fn with_properties(properties: impl IntoIterator<Item = Property>) -> Self {
        let records = properties
            .into_iter()
            .map(|property| (property.id(), property))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn list(
        &self,
        predicate: &PropertyPredicate,
    ) -> Result<Vec<Property>, PropertyRepositoryError> {
        let records = self.records.read().map_err(poisoned)?;
        let mut matching: Vec<Property> = records
            .values()
            .filter(|property| predicate.matches(property))
            .cloned()
            .collect();
        matching.sort_by(Property::cmp_newest_first);
        Ok(matching)
    }

    async fn find_by_id(
        &self,
        id: &PropertyId,
    ) -> Result<Option<Property>, PropertyRepositoryError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(id).cloned())
    }

    async fn insert(&self, property: &Property) -> Result<(), PropertyRepositoryError> {
        let mut records = self.records.write().map_err(poisoned)?;
        if records.contains_key(&property.id()) {
            return Err(PropertyRepositoryError::query("duplicate property id"));
        }
        records.insert(property.id(), property.clone());
        Ok(())
    }

    async fn update(&self, property: &Property) -> Result<bool, PropertyRepositoryError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let Some(stored) = records.get_mut(&property.id()) else {
            return Ok(false);
        };

        // Owner and creation time stay as first stored.
        let mut record = property.clone().into_record();
        record.owner_id = stored.owner_id().clone();
        record.created_at = stored.created_at();
        record.updated_at = record.updated_at.max(record.created_at);
        *stored = Property::new(record)
            .map_err(|err| PropertyRepositoryError::query(err.to_string()))?;
        Ok(true)
    }

    async fn delete(&self, id: &PropertyId) -> Result<bool, PropertyRepositoryError> {
        let mut records = self.records.write().map_err(poisoned)?;
        Ok(records.remove(id).is_some())
    }
}
