//! Property listing HTTP handlers.
//!
//! ```text
//! GET    /api/properties
//! POST   /api/properties
//! GET    /api/properties/{id}
//! PUT    /api/properties/{id}
//! DELETE /api/properties/{id}
//! GET    /api/properties/user/{userId}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{FilterParams, Property, PropertyFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::health::api_health;
use crate::inbound::http::properties_dto::{
    CreatePropertyRequestBody, DeletePropertyResponseBody, PropertyListQuery,
    PropertyResponseBody, UpdatePropertyRequestBody,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::json_config;

fn to_bodies(properties: &[Property]) -> Vec<PropertyResponseBody> {
    properties.iter().map(PropertyResponseBody::from).collect()
}

/// Register the `/api` routes on a scope or app.
///
/// The owner listing is registered before the `{id}` routes so
/// `/properties/user/...` is never read as an id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(api_health)
        .service(list_owner_properties)
        .service(list_properties)
        .service(create_property)
        .service(get_property)
        .service(update_property)
        .service(delete_property);
}

/// List listings matching the optional filters, newest first.
#[utoipa::path(
    get,
    path = "/api/properties",
    params(PropertyListQuery),
    responses(
        (status = 200, description = "Matching listings, newest first", body = [PropertyResponseBody]),
        (status = 503, description = "Property store unavailable", body = ErrorSchema)
    ),
    tags = ["properties"],
    operation_id = "listProperties"
)]
#[get("/properties")]
pub async fn list_properties(
    state: web::Data<HttpState>,
    query: web::Query<PropertyListQuery>,
) -> ApiResult<web::Json<Vec<PropertyResponseBody>>> {
    let filter = PropertyFilter::from_params(FilterParams::from(query.into_inner()));
    let properties = state.properties_query.list_properties(filter).await?;
    Ok(web::Json(to_bodies(&properties)))
}

/// Fetch one listing.
#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    params(("id" = String, Path, description = "Listing id (UUID)")),
    responses(
        (status = 200, description = "The listing", body = PropertyResponseBody),
        (status = 404, description = "Malformed or unknown id", body = ErrorSchema),
        (status = 503, description = "Property store unavailable", body = ErrorSchema)
    ),
    tags = ["properties"],
    operation_id = "getProperty"
)]
#[get("/properties/{id}")]
pub async fn get_property(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PropertyResponseBody>> {
    let property = state.properties_query.get_property(&path).await?;
    Ok(web::Json(PropertyResponseBody::from(&property)))
}

/// Create a listing.
#[utoipa::path(
    post,
    path = "/api/properties",
    request_body = CreatePropertyRequestBody,
    responses(
        (status = 201, description = "Listing created", body = PropertyResponseBody),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema),
        (status = 503, description = "Property store unavailable", body = ErrorSchema)
    ),
    tags = ["properties"],
    operation_id = "createProperty"
)]
#[post("/properties")]
pub async fn create_property(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePropertyRequestBody>,
) -> ApiResult<HttpResponse> {
    let property = state
        .properties
        .create_property(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(PropertyResponseBody::from(&property)))
}

/// Partially update a listing.
#[utoipa::path(
    put,
    path = "/api/properties/{id}",
    params(("id" = String, Path, description = "Listing id (UUID)")),
    request_body = UpdatePropertyRequestBody,
    responses(
        (status = 200, description = "Updated listing", body = PropertyResponseBody),
        (status = 400, description = "Invalid field values", body = ErrorSchema),
        (status = 404, description = "Malformed or unknown id", body = ErrorSchema),
        (status = 503, description = "Property store unavailable", body = ErrorSchema)
    ),
    tags = ["properties"],
    operation_id = "updateProperty"
)]
#[put("/properties/{id}")]
pub async fn update_property(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdatePropertyRequestBody>,
) -> ApiResult<web::Json<PropertyResponseBody>> {
    let property = state
        .properties
        .update_property(&path, payload.into_inner().into())
        .await?;
    Ok(web::Json(PropertyResponseBody::from(&property)))
}

/// Permanently delete a listing.
#[utoipa::path(
    delete,
    path = "/api/properties/{id}",
    params(("id" = String, Path, description = "Listing id (UUID)")),
    responses(
        (status = 200, description = "Listing deleted", body = DeletePropertyResponseBody),
        (status = 404, description = "Malformed or unknown id", body = ErrorSchema),
        (status = 503, description = "Property store unavailable", body = ErrorSchema)
    ),
    tags = ["properties"],
    operation_id = "deleteProperty"
)]
#[delete("/properties/{id}")]
pub async fn delete_property(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletePropertyResponseBody>> {
    let deleted = state.properties.delete_property(&path).await?;
    Ok(web::Json(DeletePropertyResponseBody::from(deleted)))
}

/// List the listings created by one owner, newest first.
#[utoipa::path(
    get,
    path = "/api/properties/user/{userId}",
    params(("userId" = String, Path, description = "Owner id issued by the auth provider")),
    responses(
        (status = 200, description = "Owner's listings, newest first", body = [PropertyResponseBody]),
        (status = 503, description = "Property store unavailable", body = ErrorSchema)
    ),
    tags = ["properties"],
    operation_id = "listOwnerProperties"
)]
#[get("/properties/user/{user_id}")]
pub async fn list_owner_properties(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<PropertyResponseBody>>> {
    let properties = state.properties_query.list_owner_properties(&path).await?;
    Ok(web::Json(to_bodies(&properties)))
}

#[cfg(test)]
#[path = "properties_tests.rs"]
mod tests;
