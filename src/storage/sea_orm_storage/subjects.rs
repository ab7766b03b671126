//! 科目存储操作

use super::SeaOrmStorage;
use crate::config::AppConfig;
use crate::entity::prelude::{SubjectTeachers, Teachers};
use crate::entity::subject_teachers::{
    ActiveModel as SubjectTeacherActiveModel, Column as SubjectTeacherColumn,
};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::entity::teachers::Column as TeacherColumn;
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    PaginationInfo,
    common::role::RowActions,
    subjects::{
        entities::SubjectListItem,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, LoaderTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建科目并指派任课教师
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<SubjectListItem> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("开启事务失败: {e}")))?;

        // 指派的教师必须全部存在
        Self::ensure_teachers_exist(&txn, &req.teacher_ids).await?;

        let model = ActiveModel {
            subject_name: Set(req.name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let subject = model
            .insert(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("创建科目失败: {e}")))?;

        Self::replace_subject_teachers(&txn, subject.id, &req.teacher_ids, now).await?;

        let teachers = Teachers::find()
            .filter(TeacherColumn::Id.is_in(req.teacher_ids.clone()))
            .all(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教师失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(SubjectListItem {
            subject: subject.into_subject(),
            teachers: teachers.into_iter().map(|t| t.into_teacher()).collect(),
        })
    }

    /// 通过 ID 获取科目（含任课教师）
    pub async fn get_subject_by_id_impl(&self, subject_id: i64) -> Result<Option<SubjectListItem>> {
        let model = Subjects::find_by_id(subject_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询科目失败: {e}")))?;

        let Some(model) = model else {
            return Ok(None);
        };

        let teachers = vec![model.clone()]
            .load_many_to_many(Teachers, SubjectTeachers, &self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询任课教师失败: {e}")))?
            .pop()
            .unwrap_or_default();

        Ok(Some(SubjectListItem {
            subject: model.into_subject(),
            teachers: teachers.into_iter().map(|t| t.into_teacher()).collect(),
        }))
    }

    /// 分页列出科目
    ///
    /// 总数查询与分页查询放在同一事务里，保证 total 与当前页切片一致。
    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        let config = AppConfig::get();
        let page = Ord::max(query.page.unwrap_or(1), 1) as u64;
        let size = query
            .size
            .unwrap_or(config.pagination.default_page_size)
            .clamp(1, config.pagination.max_page_size) as u64;

        let mut select = Subjects::find();

        // 任课教师筛选（经关联表）
        if let Some(teacher_id) = query.teacher_id {
            let sub_query = Query::select()
                .column(SubjectTeacherColumn::SubjectId)
                .from(SubjectTeachers)
                .and_where(SubjectTeacherColumn::TeacherId.eq(teacher_id))
                .to_owned();
            select = select.filter(Column::Id.in_subquery(sub_query));
        }

        // 搜索条件：名称不区分大小写的子串匹配
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(&search.trim().to_lowercase());
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(Column::SubjectName)))
                    .like(LikeExpr::new(format!("%{escaped}%")).escape('\\')),
            );
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("开启事务失败: {e}")))?;

        let result = Self::fetch_subject_page(&txn, select, page, size).await;

        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;

        result
    }

    async fn fetch_subject_page<C: ConnectionTrait>(
        conn: &C,
        select: sea_orm::Select<Subjects>,
        page: u64,
        size: u64,
    ) -> Result<SubjectListResponse> {
        let total = select
            .clone()
            .count(conn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询科目总数失败: {e}")))?;

        // 偏移量封顶到总数，页码再大也只是空页，不会溢出
        let offset = Ord::min(size.checked_mul(page - 1).unwrap_or(u64::MAX), total);
        let models = select
            .offset(offset)
            .limit(size)
            .all(conn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询科目列表失败: {e}")))?;

        // 任课教师随当前页批量加载
        let teachers = models
            .load_many_to_many(Teachers, SubjectTeachers, conn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询任课教师失败: {e}")))?;

        let items = models
            .into_iter()
            .zip(teachers)
            .map(|(model, teachers)| SubjectListItem {
                subject: model.into_subject(),
                teachers: teachers.into_iter().map(|t| t.into_teacher()).collect(),
            })
            .collect();

        Ok(SubjectListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: total.div_ceil(size) as i64,
            },
            actions: RowActions::default(),
        })
    }

    /// 更新科目信息
    pub async fn update_subject_impl(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<SubjectListItem>> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("开启事务失败: {e}")))?;

        // 存在性检查放在事务内，避免并发删除后更新报错
        let existing = Subjects::find_by_id(subject_id)
            .one(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询科目失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(subject_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.subject_name = Set(name);
        }

        model
            .update(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("更新科目失败: {e}")))?;

        // 任课教师整组替换
        if let Some(ref teacher_ids) = update.teacher_ids {
            Self::ensure_teachers_exist(&txn, teacher_ids).await?;

            SubjectTeachers::delete_many()
                .filter(SubjectTeacherColumn::SubjectId.eq(subject_id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    SchoolAdminError::database_operation(format!("清除任课教师失败: {e}"))
                })?;

            Self::replace_subject_teachers(&txn, subject_id, teacher_ids, now).await?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_subject_by_id_impl(subject_id).await
    }

    /// 删除科目
    pub async fn delete_subject_impl(&self, subject_id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(subject_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 校验教师 ID 均存在
    async fn ensure_teachers_exist<C: ConnectionTrait>(
        conn: &C,
        teacher_ids: &[i64],
    ) -> Result<()> {
        let unique = Self::dedup_ids(teacher_ids);
        if unique.is_empty() {
            return Ok(());
        }

        let found = Teachers::find()
            .filter(TeacherColumn::Id.is_in(unique.clone()))
            .count(conn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教师失败: {e}")))?;

        if found as usize != unique.len() {
            return Err(SchoolAdminError::not_found("部分教师不存在"));
        }
        Ok(())
    }

    fn dedup_ids(ids: &[i64]) -> Vec<i64> {
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// 写入科目教师关联记录
    async fn replace_subject_teachers<C: ConnectionTrait>(
        conn: &C,
        subject_id: i64,
        teacher_ids: &[i64],
        now: i64,
    ) -> Result<()> {
        let unique = Self::dedup_ids(teacher_ids);
        if unique.is_empty() {
            return Ok(());
        }

        let links: Vec<SubjectTeacherActiveModel> = unique
            .iter()
            .map(|teacher_id| SubjectTeacherActiveModel {
                subject_id: Set(subject_id),
                teacher_id: Set(*teacher_id),
                created_at: Set(now),
                ..Default::default()
            })
            .collect();

        SubjectTeachers::insert_many(links)
            .exec(conn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("指派任课教师失败: {e}")))?;

        Ok(())
    }
}
