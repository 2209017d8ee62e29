#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::error::MethodNotAllowedError;
use poem::http::Method;
use poem::{get, Endpoint, EndpointExt, IntoResponse, Request, Response, Route};
use poem_openapi::OpenApiService;

use crate::api::hello::HelloApi;
use crate::api::health::HealthApi;
use crate::api::info::InfoApi;
use crate::api::models::{APP_DESCRIPTION, APP_TITLE, APP_VERSION};
use crate::api::root::RootApi;
use crate::utils::errors::{bad_param, bad_path, method_not_allowed, not_found};

pub mod health;
pub mod hello;
pub mod info;
pub mod models;
pub mod root;

// Documentation routes.
pub const DOCS_PATH    : &str = "/docs";
pub const REDOC_PATH   : &str = "/redoc";
pub const OPENAPI_PATH : &str = "/openapi.json";

pub type HelloEndpoints = (RootApi, HelloApi, HealthApi, InfoApi);

// ---------------------------------------------------------------------------
// api_service:
// ---------------------------------------------------------------------------
/** Collect the endpoints into one OpenAPI service.  The server url, when
 * given, is advertised in the generated document.
 */
pub fn api_service(server_url: Option<&str>) -> OpenApiService<HelloEndpoints, ()> {
    let endpoints = (RootApi, HelloApi, HealthApi, InfoApi);
    let service = OpenApiService::new(endpoints, APP_TITLE, APP_VERSION)
        .description(APP_DESCRIPTION);
    match server_url {
        Some(url) => service.server(url),
        None => service,
    }
}

// ---------------------------------------------------------------------------
// make_routes:
// ---------------------------------------------------------------------------
/** Build the complete route tree: the API at the root plus the generated
 * documentation.  Routing failures are rendered as json detail bodies.
 */
pub fn make_routes(server_url: Option<&str>) -> impl Endpoint {
    let api_service = api_service(server_url);

    // Allow the generated openapi specs to be retrieved from the server.
    let spec = api_service.spec_endpoint();
    let swagger = api_service.swagger_ui();
    let redoc = api_service.redoc();

    // The documentation answers GET (and HEAD) only.
    Route::new()
        .at(OPENAPI_PATH, get(spec))
        .nest(DOCS_PATH, get(swagger))
        .nest(REDOC_PATH, get(redoc))
        .nest("/", api_service.around(head_not_allowed))
        .catch_error(not_found)
        .catch_error(method_not_allowed)
        .catch_error(bad_path)
        .catch_error(bad_param)
}

// ---------------------------------------------------------------------------
// head_not_allowed:
// ---------------------------------------------------------------------------
/** The API routes are GET only, so HEAD is rejected with 405 instead of
 * poem's implicit GET fallback.  The request is still routed as a GET so
 * that unmapped paths report 404.
 */
async fn head_not_allowed<E: Endpoint>(ep: Arc<E>, mut req: Request) -> poem::Result<Response> {
    if req.method() != Method::HEAD {
        return ep.call(req).await.map(IntoResponse::into_response);
    }
    req.set_method(Method::GET);
    ep.call(req).await?;
    Err(MethodNotAllowedError.into())
}
