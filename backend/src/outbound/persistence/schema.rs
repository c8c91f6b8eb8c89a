//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `migrations/` exactly.

diesel::table! {
    /// Rental listings.
    properties (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        title -> Text,
        short_description -> Text,
        full_description -> Text,
        /// Monthly rent, finite and non-negative.
        price -> Float8,
        location -> Text,
        bedrooms -> Int4,
        bathrooms -> Int4,
        property_type -> Text,
        image_url -> Nullable<Text>,
        amenities -> Array<Text>,
        /// Owner identifier issued by the auth provider.
        user_id -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
