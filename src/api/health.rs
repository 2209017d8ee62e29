#![forbid(unsafe_code)]

use poem_openapi::{ OpenApi, payload::Json };

use crate::api::models::HealthResponse;

pub struct HealthApi;

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl HealthApi {
    /// Liveness probe.  Never touches external resources.
    #[oai(path = "/health", method = "get")]
    async fn health_check(&self) -> Json<HealthResponse> {
        Json(HealthResponse::healthy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn always_healthy() {
        let Json(resp) = HealthApi.health_check().await;
        assert_eq!(resp.status, "healthy");
    }
}
