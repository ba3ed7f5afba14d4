//! OpenAPI document for the notes service.
//!
//! The document advertises an API-key scheme (`my_auth`, header `email`)
//! on every route. Requests are not checked against it.

use axum::Json;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::handlers;
use crate::error::Result;
use crate::note::{Info, Note, NoteList, NoteRequest};

/// Name of the documented security scheme.
pub const SECURITY_SCHEME: &str = "my_auth";

/// OpenAPI description of the HTTP interface.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Notes Service",
        version = "1.0.0",
        description = "Notes management service"
    ),
    servers((url = "http://localhost:3000")),
    paths(
        handlers::info,
        handlers::list_notes,
        handlers::create_note,
        handlers::get_note,
        handlers::update_note,
        handlers::delete_note,
    ),
    components(schemas(Info, Note, NoteList, NoteRequest)),
    modifiers(&SecurityAddon),
    tags(
        (name = "info", description = "Service information"),
        (name = "notes", description = "Position-addressed notes"),
    )
)]
pub struct ApiDoc;

#[derive(Debug)]
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            SECURITY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("email"))),
        );
    }
}

/// Render the document as JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(pretty: bool) -> Result<String> {
    let doc = ApiDoc::openapi();
    let json = if pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };
    Ok(json)
}

/// Serve the document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
