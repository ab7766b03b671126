//! 数据模型定义
//!
//! requests: 来自 HTTP 请求的参数结构
//! responses: 返回给前端的响应结构
//! entities: 业务实体（与 entity 模块中的数据库实体分离）

pub mod classes;
pub mod common;
pub mod subjects;
pub mod system;
pub mod teachers;

pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;
pub use common::role::{RowActions, UserRole};

// 程序启动时间，用于健康检查接口的运行时长统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

// API 业务错误码，以数字形式写入统一响应结构的 code 字段
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorCode {
    Success = 200,
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    InternalServerError = 500,

    // 班级相关
    ClassNotFound = 1001,
    ClassAlreadyExists = 1002,
    ClassCreationFailed = 1003,
    ClassUpdateFailed = 1004,
    ClassDeleteFailed = 1005,

    // 科目相关
    SubjectNotFound = 1101,
    SubjectAlreadyExists = 1102,
    SubjectCreationFailed = 1103,
    SubjectUpdateFailed = 1104,
    SubjectDeleteFailed = 1105,

    // 教师相关
    TeacherNotFound = 1201,

    // 参数校验
    ValidationFailed = 1301,
}
