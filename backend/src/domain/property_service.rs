//! Property listing service.
//!
//! Implements the [`PropertyCommand`] and [`PropertyQuery`] driving ports
//! over any [`PropertyRepository`]. Input validation, timestamp stamping and
//! the mapping from repository failures to domain errors live here so every
//! adapter behaves the same.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    DeletedProperty, PropertyCommand, PropertyDraft, PropertyPatch, PropertyQuery,
    PropertyRepository, PropertyRepositoryError,
};
use crate::domain::{
    Error, OwnerId, Property, PropertyFilter, PropertyId, PropertyPredicate, PropertyRecord,
    PropertyType, property_type_label,
};

const DEFAULT_ROOMS: u32 = 1;
/// Largest room count the `integer` columns can hold.
const MAX_ROOMS: u32 = i32::MAX.unsigned_abs();

fn map_repository_error(error: PropertyRepositoryError) -> Error {
    match error {
        PropertyRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("property store unavailable: {message}"))
        }
        PropertyRepositoryError::Query { message } => {
            Error::internal(format!("property store error: {message}"))
        }
    }
}

fn not_found(raw_id: &str, reason: &str) -> Error {
    Error::not_found("Property not found").with_details(json!({
        "id": raw_id,
        "reason": reason,
    }))
}

fn parse_id(raw_id: &str) -> Result<PropertyId, Error> {
    raw_id
        .trim()
        .parse()
        .map_err(|_| not_found(raw_id, "malformed_id"))
}

/// Collects offending field names so one error can name all of them.
#[derive(Debug, Default)]
struct FieldReport {
    missing: Vec<&'static str>,
    invalid: Vec<&'static str>,
}

impl FieldReport {
    fn required_text(&mut self, value: Option<String>, field: &'static str) -> String {
        match value.filter(|text| !text.trim().is_empty()) {
            Some(text) => text,
            None => {
                self.missing.push(field);
                String::new()
            }
        }
    }

    fn replacement_text(&mut self, value: Option<String>, field: &'static str) -> Option<String> {
        let text = value?;
        if text.trim().is_empty() {
            self.invalid.push(field);
            return None;
        }
        Some(text)
    }

    fn price(&mut self, amount: f64) -> f64 {
        if !amount.is_finite() || amount < 0.0 {
            self.invalid.push("price");
        }
        amount
    }

    fn rooms(&mut self, count: f64, field: &'static str) -> u32 {
        let whole = count.is_finite() && count.fract() == 0.0;
        if whole && (1.0..=f64::from(MAX_ROOMS)).contains(&count) {
            #[expect(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "range and integrality checked above"
            )]
            let rooms = count as u32;
            return rooms;
        }
        self.invalid.push(field);
        DEFAULT_ROOMS
    }

    fn into_result(self) -> Result<(), Error> {
        let Self { missing, invalid } = self;
        if !missing.is_empty() {
            let message = format!("Missing required fields: {}", missing.join(", "));
            let mut details = json!({ "code": "missing_fields", "fields": missing });
            if !invalid.is_empty() {
                details["invalidFields"] = json!(invalid);
            }
            return Err(Error::invalid_request(message).with_details(details));
        }
        if !invalid.is_empty() {
            let message = format!("Invalid field values: {}", invalid.join(", "));
            return Err(Error::invalid_request(message)
                .with_details(json!({ "code": "invalid_fields", "fields": invalid })));
        }
        Ok(())
    }
}

fn clean_image_url(url: Option<String>) -> Option<String> {
    url.map(|url| url.trim().to_owned())
        .filter(|url| !url.is_empty())
}

fn clean_amenities(amenities: Vec<String>) -> Vec<String> {
    amenities
        .into_iter()
        .map(|amenity| amenity.trim().to_owned())
        .filter(|amenity| !amenity.is_empty())
        .collect()
}

fn build_property(record: PropertyRecord) -> Result<Property, Error> {
    Property::new(record).map_err(|err| Error::invalid_request(err.to_string()))
}

/// Property service implementing the command and query driving ports.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use deshidwell::domain::PropertyService;
/// use deshidwell::outbound::memory::InMemoryPropertyRepository;
/// use mockable::DefaultClock;
///
/// let service = PropertyService::new(
///     Arc::new(InMemoryPropertyRepository::new()),
///     Arc::new(DefaultClock),
/// );
/// # drop(service);
/// ```
#[derive(Clone)]
pub struct PropertyService<R> {
    property_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> PropertyService<R> {
    /// Create a service over the repository, stamping times from `clock`.
    pub fn new(property_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            property_repo,
            clock,
        }
    }

    /// Current time at the store's microsecond precision.
    fn now(&self) -> DateTime<Utc> {
        self.clock.utc().trunc_subsecs(6)
    }
}

impl<R> PropertyService<R>
where
    R: PropertyRepository,
{
    async fn load(&self, raw_id: &str) -> Result<Property, Error> {
        let id = parse_id(raw_id)?;
        self.property_repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(raw_id, "missing"))
    }

    async fn list_matching(&self, predicate: &PropertyPredicate) -> Result<Vec<Property>, Error> {
        self.property_repo
            .list(predicate)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> PropertyCommand for PropertyService<R>
where
    R: PropertyRepository,
{
    async fn create_property(&self, draft: PropertyDraft) -> Result<Property, Error> {
        let PropertyDraft {
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
        } = draft;

        let mut report = FieldReport::default();
        let title = report.required_text(title, "title");
        let short_description = report.required_text(short_description, "shortDescription");
        let full_description = report.required_text(full_description, "fullDescription");
        let price = match price {
            Some(amount) => report.price(amount),
            None => {
                report.missing.push("price");
                0.0
            }
        };
        let location = report.required_text(location, "location");
        let user_id = report.required_text(user_id, "userId");
        let bedrooms = bedrooms.map_or(DEFAULT_ROOMS, |count| report.rooms(count, "bedrooms"));
        let bathrooms = bathrooms.map_or(DEFAULT_ROOMS, |count| report.rooms(count, "bathrooms"));
        report.into_result()?;

        let owner_id = OwnerId::new(user_id).map_err(|err| Error::invalid_request(err.to_string()))?;
        let now = self.now();
        let property = build_property(PropertyRecord {
            id: PropertyId::random(),
            title,
            short_description,
            full_description,
            price,
            location,
            bedrooms,
            bathrooms,
            property_type: property_type
                .filter(|kind| !kind.trim().is_empty())
                .map_or_else(
                    || PropertyType::default().to_string(),
                    |kind| property_type_label(&kind),
                ),
            image_url: clean_image_url(image_url),
            amenities: clean_amenities(amenities),
            owner_id,
            created_at: now,
            updated_at: now,
        })?;

        self.property_repo
            .insert(&property)
            .await
            .map_err(map_repository_error)?;

        info!(
            property_id = %property.id(),
            owner_id = %property.owner_id(),
            "property created"
        );
        Ok(property)
    }

    async fn update_property(&self, id: &str, patch: PropertyPatch) -> Result<Property, Error> {
        let existing = self.load(id).await?;
        if patch.is_empty() {
            debug!(property_id = %existing.id(), "empty patch refreshes updatedAt only");
        }
        let mut record = existing.into_record();

        let PropertyPatch {
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
        } = patch;

        let mut report = FieldReport::default();
        if let Some(title) = report.replacement_text(title, "title") {
            record.title = title;
        }
        if let Some(text) = report.replacement_text(short_description, "shortDescription") {
            record.short_description = text;
        }
        if let Some(text) = report.replacement_text(full_description, "fullDescription") {
            record.full_description = text;
        }
        if let Some(amount) = price {
            record.price = report.price(amount);
        }
        if let Some(location) = report.replacement_text(location, "location") {
            record.location = location;
        }
        if let Some(count) = bedrooms {
            record.bedrooms = report.rooms(count, "bedrooms");
        }
        if let Some(count) = bathrooms {
            record.bathrooms = report.rooms(count, "bathrooms");
        }
        if let Some(kind) = report.replacement_text(property_type, "propertyType") {
            record.property_type = property_type_label(&kind);
        }
        if image_url.is_some() {
            record.image_url = clean_image_url(image_url);
        }
        if let Some(amenities) = amenities {
            record.amenities = clean_amenities(amenities);
        }
        report.into_result()?;

        record.updated_at = self.now().max(record.created_at);
        let property = build_property(record)?;

        let updated = self
            .property_repo
            .update(&property)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(not_found(id, "missing"));
        }

        info!(property_id = %property.id(), "property updated");
        Ok(property)
    }

    async fn delete_property(&self, id: &str) -> Result<DeletedProperty, Error> {
        let property_id = parse_id(id)?;
        let deleted = self
            .property_repo
            .delete(&property_id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(not_found(id, "missing"));
        }

        info!(property_id = %property_id, "property deleted");
        Ok(DeletedProperty {
            deleted_id: property_id,
        })
    }
}

#[async_trait]
impl<R> PropertyQuery for PropertyService<R>
where
    R: PropertyRepository,
{
    async fn list_properties(&self, filter: PropertyFilter) -> Result<Vec<Property>, Error> {
        let predicate = filter.to_predicate();
        debug!(?predicate, "listing properties");
        self.list_matching(&predicate).await
    }

    async fn get_property(&self, id: &str) -> Result<Property, Error> {
        self.load(id).await
    }

    async fn list_owner_properties(&self, owner_id: &str) -> Result<Vec<Property>, Error> {
        let Ok(owner) = OwnerId::new(owner_id) else {
            return Ok(Vec::new());
        };
        self.list_matching(&PropertyPredicate::OwnedBy(owner)).await
    }
}

#[cfg(test)]
#[path = "property_service_tests.rs"]
mod tests;
