//! Lenient input decoding shared by the property handlers.
//!
//! The add-property form submits numbers either as JSON numbers or as text,
//! and amenities either as an array or as one comma-separated string.
//! Blank text counts as absent. Other text that does not parse is passed on
//! as NaN so the service reports the field as invalid.

use actix_web::web;
use serde::Deserialize;
use serde_json::json;

use crate::domain::Error;

/// A numeric field supplied as a JSON number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl NumberInput {
    /// Numeric value; `None` for blank text, NaN for text that does not parse.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return None;
                }
                Some(text.parse().unwrap_or(f64::NAN))
            }
        }
    }
}

pub(crate) fn number(input: Option<NumberInput>) -> Option<f64> {
    input.as_ref().and_then(NumberInput::value)
}

/// Amenities supplied as a list or a comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AmenitiesInput {
    List(Vec<String>),
    Csv(String),
}

impl AmenitiesInput {
    /// Split into trimmed, non-empty entries in submission order.
    pub fn into_list(self) -> Vec<String> {
        let raw = match self {
            Self::List(items) => items,
            Self::Csv(text) => text.split(',').map(str::to_owned).collect(),
        };
        raw.into_iter()
            .map(|item| item.trim().to_owned())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

/// JSON extractor configuration reporting malformed bodies as
/// `invalid_request` errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("Invalid JSON payload: {err}"))
            .with_details(json!({ "code": "invalid_json" }))
            .into()
    })
}
