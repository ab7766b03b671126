//! 路径参数安全提取器
//!
//! 路径中的 ID 必须是正整数，解析失败时直接返回统一的 400 响应，
//! 避免在各个 handler 里重复校验。

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 定义 i64 路径参数提取器的宏
macro_rules! define_safe_id_extractor {
    ($name:ident, $param:literal, $message:literal) => {
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|v| v.parse::<i64>().ok())
                    .filter(|id| *id > 0);

                ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => {
                        let response = HttpResponse::BadRequest()
                            .json(ApiResponse::error_empty(ErrorCode::BadRequest, $message));
                        Err(actix_web::error::InternalError::from_response($message, response)
                            .into())
                    }
                })
            }
        }
    };
}

define_safe_id_extractor!(SafeClassIdI64, "class_id", "Invalid class id");
define_safe_id_extractor!(SafeSubjectIdI64, "subject_id", "Invalid subject id");
