use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct Teacher {
    // 教师ID
    pub id: i64,
    // 登录名
    pub username: String,
    // 名
    pub name: String,
    // 姓
    pub surname: String,
    // 邮箱
    pub email: Option<String>,
}
