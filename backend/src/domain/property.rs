//! Property listing aggregate and its value types.
//!
//! A [`Property`] is always valid once constructed: required text is
//! non-blank, the price is finite and non-negative, room counts are positive
//! and `created_at <= updated_at`. Adapters rebuild properties through
//! [`Property::new`] so stored rows are re-validated on the way in.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Validation errors raised by property constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyValidationError {
    /// The identifier is not a UUID.
    #[error("property id must be a valid UUID")]
    InvalidId,
    /// The owner identifier is blank.
    #[error("owner id must not be empty")]
    EmptyOwner,
    /// A required text field is blank.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    /// The price is negative, NaN or infinite.
    #[error("price must be a finite, non-negative amount")]
    InvalidPrice,
    /// A room count is zero.
    #[error("{field} must be at least 1")]
    InvalidRoomCount { field: &'static str },
    /// `updated_at` precedes `created_at`.
    #[error("updatedAt must not precede createdAt")]
    TimestampOrder,
}

/// Stable property identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(Uuid);

impl PropertyId {
    /// Generate a fresh identifier for a new listing.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PropertyId {
    type Err = PropertyValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| PropertyValidationError::InvalidId)
    }
}

/// Identifier of the authenticated user who created a listing.
///
/// Issued by the external auth provider, so only non-blankness is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    /// Validate and construct an owner identifier.
    ///
    /// # Examples
    /// ```
    /// use deshidwell::domain::OwnerId;
    ///
    /// assert!(OwnerId::new("user_2abc").is_ok());
    /// assert!(OwnerId::new("   ").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, PropertyValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(PropertyValidationError::EmptyOwner);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for OwnerId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Monthly rent amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// Validate and construct a price.
    pub fn new(amount: f64) -> Result<Self, PropertyValidationError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(PropertyValidationError::InvalidPrice);
        }
        Ok(Self(amount))
    }

    /// Raw amount.
    pub fn amount(self) -> f64 {
        self.0
    }
}

/// Listing categories offered by the add-property form.
///
/// Stored listings keep their type as free text; this enum names the known
/// values and supplies the default for listings submitted without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PropertyType {
    #[default]
    Apartment,
    House,
    Studio,
    Room,
    Villa,
    Penthouse,
    Duplex,
    Townhouse,
}

impl PropertyType {
    /// Every known listing category in display order.
    pub const ALL: [PropertyType; 8] = [
        Self::Apartment,
        Self::House,
        Self::Studio,
        Self::Room,
        Self::Villa,
        Self::Penthouse,
        Self::Duplex,
        Self::Townhouse,
    ];

    /// Canonical label used in storage and queries.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::House => "House",
            Self::Studio => "Studio",
            Self::Room => "Room",
            Self::Villa => "Villa",
            Self::Penthouse => "Penthouse",
            Self::Duplex => "Duplex",
            Self::Townhouse => "Townhouse",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown property type label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown property type: {0}")]
pub struct UnknownPropertyType(pub String);

impl FromStr for PropertyType {
    type Err = UnknownPropertyType;

    /// Case-insensitive match against the known labels.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| UnknownPropertyType(raw.to_owned()))
    }
}

/// Stored label for a submitted type: the canonical spelling of a known
/// category, otherwise the trimmed text as given.
pub fn property_type_label(raw: &str) -> String {
    raw.parse::<PropertyType>()
        .map_or_else(|UnknownPropertyType(label)| label, |kind| kind.as_str().to_owned())
}

/// Unvalidated field set used to build a [`Property`].
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRecord {
    pub id: PropertyId,
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
    pub owner_id: OwnerId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A rental listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    id: PropertyId,
    title: String,
    short_description: String,
    full_description: String,
    price: Price,
    location: String,
    bedrooms: u32,
    bathrooms: u32,
    property_type: String,
    image_url: Option<String>,
    amenities: Vec<String>,
    owner_id: OwnerId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn require_text(value: String, field: &'static str) -> Result<String, PropertyValidationError> {
    if value.trim().is_empty() {
        return Err(PropertyValidationError::EmptyField { field });
    }
    Ok(value)
}

fn require_rooms(count: u32, field: &'static str) -> Result<u32, PropertyValidationError> {
    if count == 0 {
        return Err(PropertyValidationError::InvalidRoomCount { field });
    }
    Ok(count)
}

impl Property {
    /// Validate a record and construct the listing.
    pub fn new(record: PropertyRecord) -> Result<Self, PropertyValidationError> {
        let PropertyRecord {
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
            owner_id,
            created_at,
            updated_at,
        } = record;

        if updated_at < created_at {
            return Err(PropertyValidationError::TimestampOrder);
        }

        Ok(Self {
            id,
            title: require_text(title, "title")?,
            short_description: require_text(short_description, "shortDescription")?,
            full_description: require_text(full_description, "fullDescription")?,
            price: Price::new(price)?,
            location: require_text(location, "location")?,
            bedrooms: require_rooms(bedrooms, "bedrooms")?,
            bathrooms: require_rooms(bathrooms, "bathrooms")?,
            property_type: require_text(property_type, "propertyType")?,
            image_url,
            amenities,
            owner_id,
            created_at,
            updated_at,
        })
    }

    /// Decompose into a mutable record, e.g. to apply a partial update.
    pub fn into_record(self) -> PropertyRecord {
        PropertyRecord {
            id: self.id,
            title: self.title,
            short_description: self.short_description,
            full_description: self.full_description,
            price: self.price.amount(),
            location: self.location,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            property_type: self.property_type,
            image_url: self.image_url,
            amenities: self.amenities,
            owner_id: self.owner_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Ordering used by every listing: newest `created_at` first, ties broken
    /// by descending id so results are stable across calls.
    pub fn cmp_newest_first(&self, other: &Self) -> Ordering {
        other
            .created_at
            .cmp(&self.created_at)
            .then_with(|| other.id.cmp(&self.id))
    }

    pub fn id(&self) -> PropertyId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn full_description(&self) -> &str {
        &self.full_description
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn bedrooms(&self) -> u32 {
        self.bedrooms
    }

    pub fn bathrooms(&self) -> u32 {
        self.bathrooms
    }

    pub fn property_type(&self) -> &str {
        &self.property_type
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn amenities(&self) -> &[String] {
        &self.amenities
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
