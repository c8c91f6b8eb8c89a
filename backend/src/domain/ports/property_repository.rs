//! Driven port for property persistence.

use async_trait::async_trait;

use crate::domain::{Property, PropertyId, PropertyPredicate};

use super::define_port_error;

define_port_error! {
    /// Errors raised by property repository adapters.
    pub enum PropertyRepositoryError {
        /// The store could not be reached or timed out.
        Connection { message: String } =>
            "property repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } =>
            "property repository query failed: {message}",
    }
}

/// Port for storing and querying property listings.
///
/// Adapters evaluate [`PropertyPredicate`] with the same meaning as
/// [`PropertyPredicate::matches`] and order every listing newest first
/// (`created_at` descending, then id descending).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// List listings matching `predicate`, newest first.
    async fn list(
        &self,
        predicate: &PropertyPredicate,
    ) -> Result<Vec<Property>, PropertyRepositoryError>;

    /// Find one listing by id.
    async fn find_by_id(
        &self,
        id: &PropertyId,
    ) -> Result<Option<Property>, PropertyRepositoryError>;

    /// Persist a new listing.
    async fn insert(&self, property: &Property) -> Result<(), PropertyRepositoryError>;

    /// Overwrite the mutable fields of an existing listing.
    ///
    /// Returns `false` when no listing with that id exists. The owner and
    /// creation timestamp are never rewritten.
    async fn update(&self, property: &Property) -> Result<bool, PropertyRepositoryError>;

    /// Remove a listing permanently. Returns `false` when nothing was removed.
    async fn delete(&self, id: &PropertyId) -> Result<bool, PropertyRepositoryError>;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(PropertyRepositoryError::connection("pool timed out"), "connection failed: pool timed out")]
    #[case(PropertyRepositoryError::query("syntax error"), "query failed: syntax error")]
    fn errors_format_message(#[case] err: PropertyRepositoryError, #[case] expected: &str) {
        assert!(err.to_string().ends_with(expected), "{err}");
    }

    #[rstest]
    #[tokio::test]
    async fn mock_returns_configured_listing() {
        let mut repo = MockPropertyRepository::new();
        repo.expect_list().times(1).return_once(|_| Ok(Vec::new()));

        let listed = repo
            .list(&PropertyPredicate::everything())
            .await
            .expect("mock list succeeds");
        assert!(listed.is_empty());
    }
}
