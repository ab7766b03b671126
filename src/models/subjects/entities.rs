use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::teachers::entities::Teacher;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Subject {
    // 科目ID
    pub id: i64,
    // 科目名称
    pub subject_name: String,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 列表页行数据：科目及其任课教师
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub subject: Subject,
    pub teachers: Vec<Teacher>,
}
