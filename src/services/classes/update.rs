use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ClassService;
use crate::models::classes::requests::UpdateClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::{validate_capacity, validate_grade, validate_name};

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 仅校验提供的字段
    let validation = update_data
        .name
        .as_deref()
        .map_or(Ok(()), validate_name)
        .and_then(|_| update_data.capacity.map_or(Ok(()), validate_capacity))
        .and_then(|_| update_data.grade.map_or(Ok(()), validate_grade));
    if let Err(msg) = validation {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    // 更换班主任时，新班主任必须存在
    if let Some(supervisor_id) = update_data.supervisor_id {
        match storage.get_teacher_by_id(supervisor_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::TeacherNotFound,
                    "Supervisor not found",
                )));
            }
            Err(e) => {
                error!("Failed to get teacher by id: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Internal server error while fetching supervisor",
                    )),
                );
            }
        }
    }

    match storage.update_class(class_id, update_data).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(class, "Class updated successfully"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        ))),
        Err(e) => {
            let msg = format!("Class update failed: {e}");
            error!("{}", msg);
            if msg.contains("UNIQUE constraint failed") || msg.contains("duplicate key") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::ClassAlreadyExists,
                    "Class name already exists",
                )))
            } else {
                Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::ClassUpdateFailed,
                        msg,
                    )),
                )
            }
        }
    }
}
