use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::middlewares::ExtractRole;
use crate::models::{
    ApiResponse, ErrorCode, UserRole,
    subjects::requests::{SubjectListQuery, SubjectQueryParams},
};

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
    query: SubjectQueryParams,
) -> ActixResult<HttpResponse> {
    let role = ExtractRole::extract_user_role(request);
    let storage = service.get_storage(request);

    let list_query = SubjectListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
        teacher_id: query.teacher_id,
    };

    match storage.list_subjects_with_pagination(list_query).await {
        Ok(mut response) => {
            // 按角色决定列表页是否展示增删改入口
            response.actions = UserRole::row_actions(role.as_ref());
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Subject list retrieved successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve subject list: {e}"),
            )),
        ),
    }
}
