use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubjectService;
use crate::errors::SchoolAdminError;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_name;

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_data: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 参数校验
    if let Err(msg) = validate_name(&subject_data.name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    match storage.create_subject(subject_data).await {
        Ok(subject) => {
            info!(
                "Subject {} created successfully",
                subject.subject.subject_name
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(subject, "Subject created successfully")))
        }
        Err(SchoolAdminError::NotFound(msg)) => {
            // 指派的教师不存在
            Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::TeacherNotFound, msg)))
        }
        Err(e) => Ok(handle_subject_create_error(&e.to_string())),
    }
}

/// 错误响应辅助函数
fn handle_subject_create_error(e: &str) -> HttpResponse {
    let msg = format!("Subject creation failed: {e}");
    error!("{}", msg);
    if msg.contains("UNIQUE constraint failed") || msg.contains("duplicate key") {
        HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::SubjectAlreadyExists,
            "Subject name already exists",
        ))
    } else {
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::SubjectCreationFailed,
            msg,
        ))
    }
}
