#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{ OpenApi, payload::Json, param::Path, ApiResponse };
use log::info;

use crate::api::models::MessageResponse;
use crate::utils::errors::{ErrorDetail, NAME_EMPTY_MSG, NOT_FOUND_MSG};
use crate::utils::hello_utils::{self, RequestDebug};

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct HelloApi;

struct ReqHello
{
    name: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqHello {
    type Req = ReqHello;
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(64);
        s.push_str("  Request path:");
        s.push_str("\n    name: ");
        s.push_str(&self.name);
        s
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum HelloResponse {
    #[oai(status = 200)]
    Http200(Json<MessageResponse>),
    /// The name is blank.
    #[oai(status = 400)]
    Http400(Json<ErrorDetail>),
    #[oai(status = 404)]
    Http404(Json<ErrorDetail>),
}

fn make_http_200(resp: MessageResponse) -> HelloResponse {
    HelloResponse::Http200(Json(resp))
}
fn make_http_400(msg: &str) -> HelloResponse {
    HelloResponse::Http400(Json(ErrorDetail::new(msg)))
}
fn make_http_404(msg: &str) -> HelloResponse {
    HelloResponse::Http404(Json(ErrorDetail::new(msg)))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl HelloApi {
    /// Personalized hello endpoint.
    #[oai(path = "/hello/:name", method = "get")]
    async fn say_hello(&self, http_req: &Request, name: Path<String>) -> HelloResponse {
        let req = ReqHello {name: name.0};
        hello_utils::debug_request(http_req, &req);
        req.process()
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl ReqHello {
    /// An empty segment means no name was routed at all.
    fn process(&self) -> HelloResponse {
        if self.name.is_empty() {
            return make_http_404(NOT_FOUND_MSG);
        }
        if hello_utils::is_blank(&self.name) {
            info!("Rejected blank name of length {}.", self.name.len());
            return make_http_400(NAME_EMPTY_MSG);
        }
        make_http_200(MessageResponse::new(greeting(&self.name)))
    }
}

fn greeting(name: &str) -> String {
    format!("Hello {}! Welcome to FastAPI v2", name)
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    fn process(name: &str) -> HelloResponse {
        ReqHello {name: name.to_string()}.process()
    }

    #[test]
    fn greets_by_name() {
        match process("Fausto") {
            HelloResponse::Http200(Json(resp)) => {
                assert_eq!(resp.message, "Hello Fausto! Welcome to FastAPI v2");
                assert_eq!(resp.version, "2.0.0");
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn keeps_inner_whitespace() {
        match process(" Ada Lovelace ") {
            HelloResponse::Http200(Json(resp)) => assert!(resp.message.contains(" Ada Lovelace ")),
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn rejects_blank_names() {
        for name in [" ", "   ", "\t", "\u{3000}"] {
            match process(name) {
                HelloResponse::Http400(Json(e)) => assert_eq!(e.detail, "Name cannot be empty"),
                other => panic!("unexpected response for {:?}: {:?}", name, other),
            }
        }
    }

    #[test]
    fn empty_name_is_not_found() {
        assert!(matches!(process(""), HelloResponse::Http404(_)));
    }
}
