use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::teachers::entities::Teacher;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct Class {
    // 班级ID
    pub id: i64,
    // 班级名称
    pub class_name: String,
    // 容量
    pub capacity: i32,
    // 年级
    pub grade: i32,
    // 班主任ID
    pub supervisor_id: i64,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 列表页行数据：班级及其班主任和学生人数
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub class: Class,
    pub supervisor: Teacher,
    pub student_count: i64,
}
