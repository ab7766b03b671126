//! 教师存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::Teachers;
use crate::errors::{Result, SchoolAdminError};
use crate::models::teachers::entities::Teacher;
use sea_orm::EntityTrait;

impl SeaOrmStorage {
    /// 通过 ID 获取教师
    pub async fn get_teacher_by_id_impl(&self, teacher_id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(teacher_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }
}
