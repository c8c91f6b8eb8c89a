//! Listing filter criteria and the predicate derived from them.
//!
//! [`PropertyFilter`] is the typed set of optional criteria a visitor can
//! supply. [`PropertyFilter::to_predicate`] turns it into a
//! [`PropertyPredicate`] tree which every evaluator consumes: the in-memory
//! store and [`filter_properties`] call [`PropertyPredicate::matches`], and
//! the PostgreSQL adapter translates the same tree into SQL.

use super::{OwnerId, Property};

/// Raw, untyped filter parameters as received from a transport.
///
/// Blank values are treated as absent. Numeric values that fail to parse,
/// are negative or are not finite are also treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    pub search: Option<String>,
    pub location: Option<String>,
    pub property_type: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_bedrooms: Option<String>,
}

/// Typed listing criteria. Every field is optional and absence means the
/// field does not narrow the result.
///
/// # Examples
/// ```
/// use deshidwell::domain::PropertyFilter;
///
/// let filter = PropertyFilter::new()
///     .with_location("gulshan")
///     .with_min_price(40_000.0)
///     .with_max_price(50_000.0);
/// assert_eq!(filter.location(), Some("gulshan"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    search: Option<String>,
    location: Option<String>,
    property_type: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    min_bedrooms: Option<u32>,
}

fn non_blank(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_owned())
    }
}

fn bound(amount: f64) -> Option<f64> {
    (amount.is_finite() && amount >= 0.0).then_some(amount)
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().and_then(bound)
}

fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

impl PropertyFilter {
    /// Criteria matching every listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Coerce raw transport parameters into typed criteria.
    ///
    /// # Examples
    /// ```
    /// use deshidwell::domain::{FilterParams, PropertyFilter};
    ///
    /// let filter = PropertyFilter::from_params(FilterParams {
    ///     search: Some(String::new()),
    ///     min_price: Some("abc".into()),
    ///     max_price: Some("50000".into()),
    ///     ..FilterParams::default()
    /// });
    /// assert_eq!(filter.search(), None);
    /// assert_eq!(filter.min_price(), None);
    /// assert_eq!(filter.max_price(), Some(50_000.0));
    /// ```
    pub fn from_params(params: FilterParams) -> Self {
        Self {
            search: params.search.and_then(non_blank),
            location: params.location.and_then(non_blank),
            property_type: params.property_type.and_then(non_blank),
            min_price: params.min_price.as_deref().and_then(parse_amount),
            max_price: params.max_price.as_deref().and_then(parse_amount),
            min_bedrooms: params.min_bedrooms.as_deref().and_then(parse_count),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = non_blank(search);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = non_blank(location);
        self
    }

    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = non_blank(property_type);
        self
    }

    pub fn with_min_price(mut self, amount: f64) -> Self {
        self.min_price = bound(amount);
        self
    }

    pub fn with_max_price(mut self, amount: f64) -> Self {
        self.max_price = bound(amount);
        self
    }

    pub fn with_min_bedrooms(mut self, count: u32) -> Self {
        self.min_bedrooms = Some(count);
        self
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn property_type(&self) -> Option<&str> {
        self.property_type.as_deref()
    }

    pub fn min_price(&self) -> Option<f64> {
        self.min_price
    }

    pub fn max_price(&self) -> Option<f64> {
        self.max_price
    }

    pub fn min_bedrooms(&self) -> Option<u32> {
        self.min_bedrooms
    }

    /// Derive the composite predicate.
    ///
    /// Supplied criteria are AND-ed together in a fixed order; `search`
    /// expands to an OR over title, location and short description; both
    /// price bounds collapse into one range node.
    pub fn to_predicate(&self) -> PropertyPredicate {
        let mut clauses = Vec::new();

        if let Some(needle) = &self.search {
            clauses.push(PropertyPredicate::Any(
                [TextField::Title, TextField::Location, TextField::ShortDescription]
                    .into_iter()
                    .map(|field| PropertyPredicate::Contains {
                        field,
                        needle: needle.clone(),
                    })
                    .collect(),
            ));
        }
        if let Some(needle) = &self.location {
            clauses.push(PropertyPredicate::Contains {
                field: TextField::Location,
                needle: needle.clone(),
            });
        }
        if let Some(kind) = &self.property_type {
            clauses.push(PropertyPredicate::PropertyTypeIs(kind.clone()));
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            clauses.push(PropertyPredicate::PriceBetween {
                min: self.min_price,
                max: self.max_price,
            });
        }
        if let Some(count) = self.min_bedrooms {
            clauses.push(PropertyPredicate::BedroomsAtLeast(count));
        }

        PropertyPredicate::All(clauses)
    }
}

/// Text attributes that support case-insensitive substring matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Title,
    Location,
    ShortDescription,
}

impl TextField {
    fn read(self, property: &Property) -> &str {
        match self {
            Self::Title => property.title(),
            Self::Location => property.location(),
            Self::ShortDescription => property.short_description(),
        }
    }
}

/// Lower-case one character at a time, keeping the first code point of each
/// mapping.
///
/// This follows PostgreSQL's per-character `ILIKE` folding, so `İ` folds to
/// `i` rather than `i` plus a combining dot. Databases using a locale-specific
/// collation (Turkish dotless `ı`, for one) can still fold differently.
fn fold_case(text: &str) -> String {
    text.chars().flat_map(|ch| ch.to_lowercase().take(1)).collect()
}

/// Boolean condition over a [`Property`].
///
/// `All(vec![])` matches everything; `Any(vec![])` matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyPredicate {
    All(Vec<PropertyPredicate>),
    Any(Vec<PropertyPredicate>),
    /// Case-insensitive substring match.
    Contains {
        field: TextField,
        needle: String,
    },
    /// Exact, case-sensitive type label match.
    PropertyTypeIs(String),
    /// Inclusive price range; a missing bound is open.
    PriceBetween {
        min: Option<f64>,
        max: Option<f64>,
    },
    BedroomsAtLeast(u32),
    OwnedBy(OwnerId),
}

impl PropertyPredicate {
    /// Predicate matching every listing.
    pub fn everything() -> Self {
        Self::All(Vec::new())
    }

    /// Evaluate the predicate against one listing.
    pub fn matches(&self, property: &Property) -> bool {
        match self {
            Self::All(parts) => parts.iter().all(|part| part.matches(property)),
            Self::Any(parts) => parts.iter().any(|part| part.matches(property)),
            Self::Contains { field, needle } => {
                fold_case(field.read(property)).contains(&fold_case(needle))
            }
            Self::PropertyTypeIs(kind) => property.property_type() == kind,
            Self::PriceBetween { min, max } => {
                let price = property.price().amount();
                min.is_none_or(|min| price >= min) && max.is_none_or(|max| price <= max)
            }
            Self::BedroomsAtLeast(count) => property.bedrooms() >= *count,
            Self::OwnedBy(owner) => property.owner_id() == owner,
        }
    }
}

/// Narrow an already-fetched listing without contacting the store.
///
/// The relative order of `properties` is preserved.
pub fn filter_properties(properties: &[Property], filter: &PropertyFilter) -> Vec<Property> {
    let predicate = filter.to_predicate();
    properties
        .iter()
        .filter(|property| predicate.matches(property))
        .cloned()
        .collect()
}
