//! PostgreSQL-backed `PropertyRepository` implementation using Diesel ORM.
//!
//! Rows are rebuilt through `Property::new`, so a row that violates the
//! listing invariants surfaces as a query error instead of leaking into the
//! domain.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PropertyRepository, PropertyRepositoryError};
use crate::domain::{OwnerId, Property, PropertyId, PropertyPredicate, PropertyRecord};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPropertyRow, PropertyChangeset, PropertyRow};
use super::pool::{DbPool, PoolError};
use super::predicate_sql::condition_for;
use super::schema::properties;

/// Diesel-backed implementation of the property repository port.
#[derive(Clone)]
pub struct DieselPropertyRepository {
    pool: DbPool,
}

impl DieselPropertyRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PropertyRepositoryError {
    map_basic_pool_error(error, PropertyRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PropertyRepositoryError {
    map_basic_diesel_error(
        error,
        PropertyRepositoryError::query,
        PropertyRepositoryError::connection,
    )
}

fn to_column_count(count: u32, field: &str) -> Result<i32, PropertyRepositoryError> {
    i32::try_from(count)
        .map_err(|_| PropertyRepositoryError::query(format!("{field} out of range: {count}")))
}

fn from_column_count(count: i32, field: &str) -> Result<u32, PropertyRepositoryError> {
    u32::try_from(count)
        .map_err(|_| PropertyRepositoryError::query(format!("stored {field} is negative: {count}")))
}

/// Convert a database row into a validated domain listing.
fn row_to_property(row: PropertyRow) -> Result<Property, PropertyRepositoryError> {
    let PropertyRow {
        id,
        title,
        short_description,
        full_description,
        price,
        location,
        bedrooms,
        bathrooms,
        property_type,
        image_url,
        amenities,
        user_id,
        created_at,
        updated_at,
    } = row;

    let owner_id = OwnerId::new(user_id)
        .map_err(|err| PropertyRepositoryError::query(format!("stored property {id}: {err}")))?;

    Property::new(PropertyRecord {
        id: PropertyId::from_uuid(id),
        title,
        short_description,
        full_description,
        price,
        location,
        bedrooms: from_column_count(bedrooms, "bedrooms")?,
        bathrooms: from_column_count(bathrooms, "bathrooms")?,
        property_type,
        image_url,
        amenities,
        owner_id,
        created_at,
        updated_at,
    })
    .map_err(|err| PropertyRepositoryError::query(format!("stored property {id}: {err}")))
}

#[async_trait]
impl PropertyRepository for DieselPropertyRepository {
    async fn list(
        &self,
        predicate: &PropertyPredicate,
    ) -> Result<Vec<Property>, PropertyRepositoryError> {
        let mut query = properties::table
            .select(PropertyRow::as_select())
            .order((properties::created_at.desc(), properties::id.desc()))
            .into_boxed();
        if let Some(condition) = condition_for(predicate) {
            query = query.filter(condition);
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PropertyRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_property).collect()
    }

    async fn find_by_id(
        &self,
        id: &PropertyId,
    ) -> Result<Option<Property>, PropertyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = properties::table
            .filter(properties::id.eq(id.as_uuid()))
            .select(PropertyRow::as_select())
            .first::<PropertyRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_property).transpose()
    }

    async fn insert(&self, property: &Property) -> Result<(), PropertyRepositoryError> {
        let new_row = NewPropertyRow {
            id: *property.id().as_uuid(),
            title: property.title(),
            short_description: property.short_description(),
            full_description: property.full_description(),
            price: property.price().amount(),
            location: property.location(),
            bedrooms: to_column_count(property.bedrooms(), "bedrooms")?,
            bathrooms: to_column_count(property.bathrooms(), "bathrooms")?,
            property_type: property.property_type(),
            image_url: property.image_url(),
            amenities: property.amenities(),
            user_id: property.owner_id().as_ref(),
            created_at: property.created_at(),
            updated_at: property.updated_at(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(properties::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, property: &Property) -> Result<bool, PropertyRepositoryError> {
        let changeset = PropertyChangeset {
            title: property.title(),
            short_description: property.short_description(),
            full_description: property.full_description(),
            price: property.price().amount(),
            location: property.location(),
            bedrooms: to_column_count(property.bedrooms(), "bedrooms")?,
            bathrooms: to_column_count(property.bathrooms(), "bathrooms")?,
            property_type: property.property_type(),
            image_url: property.image_url(),
            amenities: property.amenities(),
            updated_at: property.updated_at(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::update(properties::table.filter(properties::id.eq(property.id().as_uuid())))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn delete(&self, id: &PropertyId) -> Result<bool, PropertyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(properties::table.filter(properties::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}
