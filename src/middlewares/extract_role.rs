//! 角色提取
//!
//! 认证在上游网关完成，网关将解析后的角色写入 X-User-Role 请求头转发过来。
//! 本服务只消费该角色：缺失或无法识别的值一律按匿名处理。

use actix_web::HttpRequest;

use crate::models::UserRole;

/// 转发角色所用的请求头
pub const ROLE_HEADER: &str = "X-User-Role";

pub struct ExtractRole;

impl ExtractRole {
    /// 从请求头中提取用户角色
    pub fn extract_user_role(request: &HttpRequest) -> Option<UserRole> {
        request
            .headers()
            .get(ROLE_HEADER)?
            .to_str()
            .ok()?
            .trim()
            .to_ascii_lowercase()
            .parse()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extracts_known_role() {
        let req = TestRequest::default()
            .insert_header((ROLE_HEADER, "admin"))
            .to_http_request();
        assert_eq!(ExtractRole::extract_user_role(&req), Some(UserRole::Admin));
    }

    #[test]
    fn test_role_header_is_case_insensitive() {
        let req = TestRequest::default()
            .insert_header((ROLE_HEADER, "Teacher"))
            .to_http_request();
        assert_eq!(
            ExtractRole::extract_user_role(&req),
            Some(UserRole::Teacher)
        );
    }

    #[test]
    fn test_missing_or_unknown_role_is_anonymous() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(ExtractRole::extract_user_role(&req), None);

        let req = TestRequest::default()
            .insert_header((ROLE_HEADER, "janitor"))
            .to_http_request();
        assert_eq!(ExtractRole::extract_user_role(&req), None);
    }
}
