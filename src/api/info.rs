#![forbid(unsafe_code)]

use poem_openapi::{ OpenApi, payload::Json };
use log::debug;

use crate::api::models::InfoPayload;

pub struct InfoApi;

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl InfoApi {
    /// Application name, version, description and route patterns.
    #[oai(path = "/info", method = "get")]
    async fn get_info(&self) -> Json<InfoPayload> {
        debug!("GET /info");
        Json(InfoPayload::default())
    }
}
