//! HTTP inbound adapter exposing the REST API.

pub mod error;
pub mod health;
pub mod properties;
pub mod properties_dto;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod validation;

pub use error::ApiResult;
