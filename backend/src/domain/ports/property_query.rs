//! Driving port for property reads.

use async_trait::async_trait;

use crate::domain::{Error, Property, PropertyFilter};

/// Driving port for browsing listings.
///
/// Every listing is ordered newest first. An empty result is not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyQuery: Send + Sync {
    /// List listings matching `filter`.
    async fn list_properties(&self, filter: PropertyFilter) -> Result<Vec<Property>, Error>;

    /// Fetch one listing by its raw id.
    ///
    /// Malformed and unknown ids both yield `NotFound`; the error details
    /// carry a `reason` of `malformed_id` or `missing`.
    async fn get_property(&self, id: &str) -> Result<Property, Error>;

    /// List the listings created by `owner_id`. Unknown owners yield an
    /// empty list.
    async fn list_owner_properties(&self, owner_id: &str) -> Result<Vec<Property>, Error>;
}
