//! Request and response bodies for the property endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::{DeletedProperty, PropertyDraft, PropertyPatch};
use crate::domain::{FilterParams, Property};

use super::validation::{AmenitiesInput, NumberInput, number};

/// Listing filters. Blank values are ignored; numbers that do not parse
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PropertyListQuery {
    /// Case-insensitive match on title, location or short description.
    pub search: Option<String>,
    /// Case-insensitive substring of the location.
    pub location: Option<String>,
    /// Exact property type, e.g. `Apartment`.
    pub property_type: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<String>,
    /// Inclusive upper price bound.
    pub max_price: Option<String>,
    /// Minimum number of bedrooms.
    pub bedrooms: Option<String>,
}

impl From<PropertyListQuery> for FilterParams {
    fn from(query: PropertyListQuery) -> Self {
        Self {
            search: query.search,
            location: query.location,
            property_type: query.property_type,
            min_price: query.min_price,
            max_price: query.max_price,
            min_bedrooms: query.bedrooms,
        }
    }
}

/// Body of `POST /api/properties`.
///
/// Unknown keys such as `id` or `createdAt` are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequestBody {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    #[schema(value_type = Option<f64>, example = 45000)]
    pub price: Option<NumberInput>,
    pub location: Option<String>,
    #[schema(value_type = Option<u32>, example = 2)]
    pub bedrooms: Option<NumberInput>,
    #[schema(value_type = Option<u32>, example = 1)]
    pub bathrooms: Option<NumberInput>,
    #[schema(example = "Apartment")]
    pub property_type: Option<String>,
    pub image_url: Option<String>,
    #[schema(value_type = Option<Vec<String>>)]
    pub amenities: Option<AmenitiesInput>,
    #[schema(example = "user_2abc")]
    pub user_id: Option<String>,
}

impl From<CreatePropertyRequestBody> for PropertyDraft {
    fn from(body: CreatePropertyRequestBody) -> Self {
        Self {
            title: body.title,
            short_description: body.short_description,
            full_description: body.full_description,
            price: number(body.price),
            location: body.location,
            bedrooms: number(body.bedrooms),
            bathrooms: number(body.bathrooms),
            property_type: body.property_type,
            image_url: body.image_url,
            amenities: body
                .amenities
                .map(AmenitiesInput::into_list)
                .unwrap_or_default(),
            user_id: body.user_id,
        }
    }
}

/// Body of `PUT /api/properties/{id}`. Absent fields are left unchanged;
/// `id`, `userId` and `createdAt` cannot be changed and are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyRequestBody {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<NumberInput>,
    pub location: Option<String>,
    #[schema(value_type = Option<u32>)]
    pub bedrooms: Option<NumberInput>,
    #[schema(value_type = Option<u32>)]
    pub bathrooms: Option<NumberInput>,
    pub property_type: Option<String>,
    /// An empty string removes the image.
    pub image_url: Option<String>,
    #[schema(value_type = Option<Vec<String>>)]
    pub amenities: Option<AmenitiesInput>,
}

impl From<UpdatePropertyRequestBody> for PropertyPatch {
    fn from(body: UpdatePropertyRequestBody) -> Self {
        Self {
            title: body.title,
            short_description: body.short_description,
            full_description: body.full_description,
            price: number(body.price),
            location: body.location,
            bedrooms: number(body.bedrooms),
            bathrooms: number(body.bathrooms),
            property_type: body.property_type,
            image_url: body.image_url,
            amenities: body.amenities.map(AmenitiesInput::into_list),
        }
    }
}

/// A listing as returned by every read and write endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponseBody {
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    pub title: String,
    pub short_description: String,
    pub full_description: String,
    pub price: f64,
    pub location: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub property_type: String,
    pub image_url: Option<String>,
    pub amenities: Vec<String>,
    pub user_id: String,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

impl From<&Property> for PropertyResponseBody {
    fn from(property: &Property) -> Self {
        Self {
            id: *property.id().as_uuid(),
            title: property.title().to_owned(),
            short_description: property.short_description().to_owned(),
            full_description: property.full_description().to_owned(),
            price: property.price().amount(),
            location: property.location().to_owned(),
            bedrooms: property.bedrooms(),
            bathrooms: property.bathrooms(),
            property_type: property.property_type().to_owned(),
            image_url: property.image_url().map(str::to_owned),
            amenities: property.amenities().to_vec(),
            user_id: property.owner_id().to_string(),
            created_at: property.created_at(),
            updated_at: property.updated_at(),
        }
    }
}

/// Confirmation returned by `DELETE /api/properties/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletePropertyResponseBody {
    #[schema(example = "Property deleted successfully")]
    pub message: String,
    #[schema(value_type = String, format = "uuid")]
    pub deleted_id: Uuid,
}

impl From<DeletedProperty> for DeletePropertyResponseBody {
    fn from(deleted: DeletedProperty) -> Self {
        Self {
            message: "Property deleted successfully".to_owned(),
            deleted_id: *deleted.deleted_id.as_uuid(),
        }
    }
}
