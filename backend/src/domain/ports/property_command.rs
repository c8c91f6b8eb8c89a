//! Driving port for property mutations.
//!
//! Inbound adapters submit loosely validated input here; the implementing
//! service decides which fields are missing or malformed and reports them
//! together.

use async_trait::async_trait;

use crate::domain::{Error, Property, PropertyId};

/// Input for creating a listing.
///
/// Every field is optional so the service can report the complete set of
/// missing required fields in one error. Room counts arrive as numbers and
/// must be positive integers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyDraft {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub price: Option<f64>,
    pub location: Option<String>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub property_type: Option<String>,
    pub image_url: Option<String>,
    pub amenities: Vec<String>,
    pub user_id: Option<String>,
}

/// Partial update for a listing. Absent fields are left unchanged.
///
/// Carries no id, owner or creation timestamp; those
/// never change after creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyPatch {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub price: Option<f64>,
    pub location: Option<String>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub property_type: Option<String>,
    /// `Some("")` clears the image.
    pub image_url: Option<String>,
    pub amenities: Option<Vec<String>>,
}

impl PropertyPatch {
    /// Whether the patch carries no field changes.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Confirmation of a permanent delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletedProperty {
    pub deleted_id: PropertyId,
}

/// Driving port for creating, updating and deleting listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyCommand: Send + Sync {
    /// Validate and persist a new listing, stamping both timestamps.
    ///
    /// Fails with `InvalidRequest` naming every missing required field.
    async fn create_property(&self, draft: PropertyDraft) -> Result<Property, Error>;

    /// Merge `patch` into the listing identified by the raw `id`.
    ///
    /// A malformed or unknown id yields `NotFound`. `updatedAt` is always
    /// refreshed.
    async fn update_property(&self, id: &str, patch: PropertyPatch) -> Result<Property, Error>;

    /// Permanently remove the listing identified by the raw `id`.
    async fn delete_property(&self, id: &str) -> Result<DeletedProperty, Error>;
}
