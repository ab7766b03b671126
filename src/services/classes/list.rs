use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::middlewares::ExtractRole;
use crate::models::{
    ApiResponse, ErrorCode, UserRole,
    classes::requests::{ClassListQuery, ClassQueryParams},
};

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassQueryParams,
) -> ActixResult<HttpResponse> {
    let role = ExtractRole::extract_user_role(request);
    let storage = service.get_storage(request);

    let list_query = ClassListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
        supervisor_id: query.supervisor_id,
        grade: query.grade,
    };

    match storage.list_classes_with_pagination(list_query).await {
        Ok(mut response) => {
            // 按角色决定列表页是否展示增删改入口
            response.actions = UserRole::row_actions(role.as_ref());
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Class list retrieved successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve class list: {e}"),
            )),
        ),
    }
}
