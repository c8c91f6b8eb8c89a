//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every property and health endpoint together with the
//! request, response and error schemas. Swagger UI serves it at `/docs` in
//! debug builds and `cargo run --bin openapi-dump` prints it.

use utoipa::OpenApi;

use crate::inbound::http::health::ApiHealthResponse;
use crate::inbound::http::properties_dto::{
    CreatePropertyRequestBody, DeletePropertyResponseBody, PropertyResponseBody,
    UpdatePropertyRequestBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "DeshiDwell API",
        description = "Rental property listings with search, filtering and owner views.",
        license(name = "ISC", url = "https://opensource.org/license/isc-license-txt")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::properties::list_properties,
        crate::inbound::http::properties::create_property,
        crate::inbound::http::properties::get_property,
        crate::inbound::http::properties::update_property,
        crate::inbound::http::properties::delete_property,
        crate::inbound::http::properties::list_owner_properties,
        crate::inbound::http::health::api_health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        PropertyResponseBody,
        CreatePropertyRequestBody,
        UpdatePropertyRequestBody,
        DeletePropertyResponseBody,
        ApiHealthResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "properties", description = "Rental listings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
