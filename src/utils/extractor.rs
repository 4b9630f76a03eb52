//! 路径参数提取器
//!
//! 把 `/{id}` 之类的路径段解析为正整数，失败时直接返回 400 的 `ApiResponse`，
//! 避免 actix 默认的纯文本错误。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(match parse_positive_id(req, $param) {
                    Some(id) => Ok($name(id)),
                    None => Err(invalid_path_parameter($param)),
                })
            }
        }
    };
}

fn parse_positive_id(req: &HttpRequest, param: &str) -> Option<i64> {
    req.match_info()
        .get(param)
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
}

fn invalid_path_parameter(param: &'static str) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid path parameter: {param}"),
    ));
    InternalError::from_response(param, response).into()
}

define_safe_i64_extractor!(SafeIDI64, "id");
define_safe_i64_extractor!(SafeModuleIdI64, "module_id");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_valid_id_is_extracted() {
        let req = TestRequest::default()
            .param("id", "42")
            .param("module_id", "7")
            .to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        let module_id = SafeModuleIdI64::extract(&req).await.unwrap();
        assert_eq!(id, SafeIDI64(42));
        assert_eq!(module_id.0, 7);
    }

    #[actix_web::test]
    async fn test_invalid_ids_are_rejected() {
        for raw in ["abc", "0", "-3", ""] {
            let req = TestRequest::default().param("id", raw).to_http_request();
            let err = SafeIDI64::extract(&req).await.unwrap_err();
            assert_eq!(
                err.as_response_error().status_code(),
                actix_web::http::StatusCode::BAD_REQUEST,
                "{raw}"
            );
        }
    }
}
