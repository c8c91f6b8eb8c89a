//! Diesel row models for the `properties` table.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::properties;

/// Row read from `properties`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = properties)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PropertyRow {
    pub id: Uuid,
    pub title: String,
    pub short_description: String,
    pub full_description: String,
    pub price: f64,
    pub location: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub property_type: String,
    pub image_url: Option<String>,
    pub amenities: Vec<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable row for new listings.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = properties)]
pub(crate) struct NewPropertyRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub short_description: &'a str,
    pub full_description: &'a str,
    pub price: f64,
    pub location: &'a str,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub property_type: &'a str,
    pub image_url: Option<&'a str>,
    pub amenities: &'a [String],
    pub user_id: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for updates. Owner and creation time are not writable.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = properties)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PropertyChangeset<'a> {
    pub title: &'a str,
    pub short_description: &'a str,
    pub full_description: &'a str,
    pub price: f64,
    pub location: &'a str,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub property_type: &'a str,
    pub image_url: Option<&'a str>,
    pub amenities: &'a [String],
    pub updated_at: DateTime<Utc>,
}
