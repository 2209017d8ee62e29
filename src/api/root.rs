#![forbid(unsafe_code)]

use poem_openapi::{ OpenApi, payload::Json };
use log::debug;

use crate::api::models::MessageResponse;

const ROOT_MSG : &str = "Hello World from FastAPI v2!";

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
pub struct RootApi;

#[OpenApi]
impl RootApi {
    /// Root endpoint returning a welcome message.
    #[oai(path = "/", method = "get")]
    async fn read_root(&self) -> Json<MessageResponse> {
        debug!("GET /");
        Json(MessageResponse::new(ROOT_MSG.to_string()))
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn root_message() {
        let Json(resp) = RootApi.read_root().await;
        assert_eq!(resp.message, "Hello World from FastAPI v2!");
        assert_eq!(resp.version, "2.0.0");
    }
}
