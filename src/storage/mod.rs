use crate::models::{
    classes::{
        entities::{Class, ClassListItem},
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    subjects::{
        entities::SubjectListItem,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
    teachers::entities::Teacher,
};

use crate::errors::Result;
use std::sync::Arc;

pub mod sea_orm_storage;

/// 创建存储后端实例（连接数据库并执行迁移）
pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息（含班主任与学生人数）
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<ClassListItem>>;
    // 列出班级
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    // 更新班级信息
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    // 删除班级
    async fn delete_class(&self, class_id: i64) -> Result<bool>;

    /// 科目管理方法
    // 创建科目并指派任课教师
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<SubjectListItem>;
    // 通过ID获取科目信息（含任课教师）
    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<SubjectListItem>>;
    // 列出科目
    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse>;
    // 更新科目信息
    async fn update_subject(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<SubjectListItem>>;
    // 删除科目
    async fn delete_subject(&self, subject_id: i64) -> Result<bool>;

    /// 教师查询方法
    // 通过ID获取教师信息
    async fn get_teacher_by_id(&self, teacher_id: i64) -> Result<Option<Teacher>>;
}
