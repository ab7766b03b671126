use super::entities::SubjectListItem;
use crate::models::common::pagination::PaginationInfo;
use crate::models::common::role::RowActions;
use serde::Serialize;
use ts_rs::TS;

// 科目列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<SubjectListItem>,
    pub actions: RowActions,
}
