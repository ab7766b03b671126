use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
//
// 角色由上游认证网关解析后通过请求头转发，本服务不负责签发或校验凭证。
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/role.ts")]
pub enum UserRole {
    Admin,   // 管理员
    Teacher, // 教师
    Student, // 学生
    Parent,  // 家长
}

impl UserRole {
    pub const ADMIN: &'static str = "admin";
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";
    pub const PARENT: &'static str = "parent";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }

    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Teacher, &Self::Student, &Self::Parent]
    }

    /// 列表页行操作能力：仅管理员可见增删改入口
    pub fn row_actions(role: Option<&UserRole>) -> RowActions {
        let is_admin = role == Some(&UserRole::Admin);
        RowActions {
            can_create: is_admin,
            can_update: is_admin,
            can_delete: is_admin,
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
            UserRole::Teacher => write!(f, "{}", UserRole::TEACHER),
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
            UserRole::Parent => write!(f, "{}", UserRole::PARENT),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::ADMIN => Ok(UserRole::Admin),
            UserRole::TEACHER => Ok(UserRole::Teacher),
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::PARENT => Ok(UserRole::Parent),
            _ => Err(format!(
                "Invalid user role: '{s}'. Supported roles: admin, teacher, student, parent"
            )),
        }
    }
}

// 列表页行操作能力标记，对应旧版仪表盘按角色渲染的增删改弹窗
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/role.ts")]
pub struct RowActions {
    pub can_create: bool,
    pub can_update: bool,
    pub can_delete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_gets_full_row_actions() {
        let actions = UserRole::row_actions(Some(&UserRole::Admin));
        assert!(actions.can_create && actions.can_update && actions.can_delete);
    }

    #[test]
    fn test_non_admin_gets_no_row_actions() {
        for role in [UserRole::Teacher, UserRole::Student, UserRole::Parent] {
            let actions = UserRole::row_actions(Some(&role));
            assert!(!actions.can_create && !actions.can_update && !actions.can_delete);
        }
    }

    #[test]
    fn test_missing_role_gets_no_row_actions() {
        let actions = UserRole::row_actions(None);
        assert!(!actions.can_create && !actions.can_update && !actions.can_delete);
    }

    #[test]
    fn test_role_round_trip() {
        for role in UserRole::all_roles() {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(&parsed, *role);
        }
        assert!("principal".parse::<UserRole>().is_err());
    }
}
