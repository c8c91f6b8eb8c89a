//! Shared listing fixtures for evaluator and adapter tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use super::{OwnerId, Property, PropertyId, PropertyRecord};

pub(crate) const OWNER_A: &str = "user_alpha";
pub(crate) const OWNER_B: &str = "user_beta";

pub(crate) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Build a valid record with deterministic id and creation offset.
pub(crate) fn record(seq: u128, minutes: i64) -> PropertyRecord {
    let created_at = base_time() + Duration::minutes(minutes);
    PropertyRecord {
        id: PropertyId::from_uuid(Uuid::from_u128(seq)),
        title: format!("Listing {seq}"),
        short_description: "Comfortable family home".to_owned(),
        full_description: "A comfortable place close to shops and schools.".to_owned(),
        price: 20_000.0,
        location: "Mirpur 10, Dhaka".to_owned(),
        bedrooms: 1,
        bathrooms: 1,
        property_type: "Apartment".to_owned(),
        image_url: None,
        amenities: Vec::new(),
        owner_id: OwnerId::new(OWNER_A).expect("valid owner"),
        created_at,
        updated_at: created_at,
    }
}

/// Listings in insertion order (oldest first), varied across every field
/// the filter inspects.
pub(crate) fn sample_listings() -> Vec<Property> {
    let mut gulshan = record(1, 0);
    gulshan.title = "Lakeside Apartment".to_owned();
    gulshan.location = "Gulshan 2, Dhaka".to_owned();
    gulshan.price = 45_000.0;
    gulshan.bedrooms = 3;
    gulshan.bathrooms = 2;
    gulshan.amenities = vec!["Lift".to_owned(), "Generator".to_owned()];

    let mut banani = record(2, 10);
    banani.title = "Banani Studio".to_owned();
    banani.short_description = "Compact studio near the lake".to_owned();
    banani.location = "Banani, Dhaka".to_owned();
    banani.price = 18_000.0;
    banani.property_type = "Studio".to_owned();

    let mut dhanmondi = record(3, 20);
    dhanmondi.title = "Family House".to_owned();
    dhanmondi.location = "Dhanmondi 27, Dhaka".to_owned();
    dhanmondi.price = 85_000.0;
    dhanmondi.bedrooms = 4;
    dhanmondi.bathrooms = 3;
    dhanmondi.property_type = "House".to_owned();
    dhanmondi.owner_id = OwnerId::new(OWNER_B).expect("valid owner");

    let mut chittagong = record(4, 30);
    chittagong.title = "Sea View Penthouse".to_owned();
    chittagong.location = "Khulshi, Chattogram".to_owned();
    chittagong.price = 50_000.0;
    chittagong.bedrooms = 2;
    chittagong.property_type = "Penthouse".to_owned();
    chittagong.owner_id = OwnerId::new(OWNER_B).expect("valid owner");

    [gulshan, banani, dhanmondi, chittagong]
        .into_iter()
        .map(|record| Property::new(record).expect("valid fixture"))
        .collect()
}
