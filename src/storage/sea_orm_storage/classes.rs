//! 班级存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::config::AppConfig;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::prelude::Teachers;
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    PaginationInfo,
    classes::{
        entities::{Class, ClassListItem},
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    common::role::RowActions,
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, LoaderTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

// 按班级聚合的学生人数
#[derive(Debug, FromQueryResult)]
struct StudentCountRow {
    class_id: i64,
    count: i64,
}

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_name: Set(req.name),
            capacity: Set(req.capacity),
            grade: Set(req.grade),
            supervisor_id: Set(req.supervisor_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级（含班主任与学生人数）
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<ClassListItem>> {
        let model = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询班级失败: {e}")))?;

        let Some(model) = model else {
            return Ok(None);
        };

        let supervisor = Teachers::find_by_id(model.supervisor_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询班主任失败: {e}")))?
            .ok_or_else(|| {
                SchoolAdminError::database_operation(format!(
                    "班级 {} 的班主任记录缺失",
                    model.id
                ))
            })?;

        let student_count = Students::find()
            .filter(StudentColumn::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询学生人数失败: {e}")))?;

        Ok(Some(ClassListItem {
            class: model.into_class(),
            supervisor: supervisor.into_teacher(),
            student_count: student_count as i64,
        }))
    }

    /// 分页列出班级
    ///
    /// 总数查询与分页查询放在同一事务里，保证 total 与当前页切片一致。
    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let config = AppConfig::get();
        let page = Ord::max(query.page.unwrap_or(1), 1) as u64;
        let size = query
            .size
            .unwrap_or(config.pagination.default_page_size)
            .clamp(1, config.pagination.max_page_size) as u64;

        let mut select = Classes::find();

        // 班主任筛选
        if let Some(supervisor_id) = query.supervisor_id {
            select = select.filter(Column::SupervisorId.eq(supervisor_id));
        }

        // 年级筛选
        if let Some(grade) = query.grade {
            select = select.filter(Column::Grade.eq(grade));
        }

        // 搜索条件：名称不区分大小写的子串匹配
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(&search.trim().to_lowercase());
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(Column::ClassName)))
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

        let result = Self::fetch_class_page(&txn, select, page, size).await;

        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;

        result
    }

    async fn fetch_class_page<C: ConnectionTrait>(
        conn: &C,
        select: sea_orm::Select<Classes>,
        page: u64,
        size: u64,
    ) -> Result<ClassListResponse> {
        let total = select
            .clone()
            .count(conn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询班级总数失败: {e}")))?;

        // 偏移量封顶到总数，页码再大也只是空页，不会溢出
        let offset = Ord::min(size.checked_mul(page - 1).unwrap_or(u64::MAX), total);
        let models = select
            .offset(offset)
            .limit(size)
            .all(conn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询班级列表失败: {e}")))?;

        // 班主任随当前页批量加载
        let supervisors = models
            .load_one(Teachers, conn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询班主任失败: {e}")))?;

        // 学生人数按班级聚合
        let class_ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut counts: HashMap<i64, i64> = HashMap::new();
        if !class_ids.is_empty() {
            let rows = Students::find()
                .select_only()
                .column(StudentColumn::ClassId)
                .column_as(StudentColumn::Id.count(), "count")
                .filter(StudentColumn::ClassId.is_in(class_ids))
                .group_by(StudentColumn::ClassId)
                .into_model::<StudentCountRow>()
                .all(conn)
                .await
                .map_err(|e| {
                    SchoolAdminError::database_operation(format!("查询学生人数失败: {e}"))
                })?;
            counts = rows.into_iter().map(|r| (r.class_id, r.count)).collect();
        }

        let mut items = Vec::with_capacity(models.len());
        for (model, supervisor) in models.into_iter().zip(supervisors) {
            let supervisor = supervisor.ok_or_else(|| {
                SchoolAdminError::database_operation(format!(
                    "班级 {} 的班主任记录缺失",
                    model.id
                ))
            })?;
            let student_count = counts.get(&model.id).copied().unwrap_or(0);
            items.push(ClassListItem {
                supervisor: supervisor.into_teacher(),
                student_count,
                class: model.into_class(),
            });
        }

        Ok(ClassListResponse {
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

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        // 先检查班级是否存在
        let existing = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询班级失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.class_name = Set(name);
        }

        if let Some(capacity) = update.capacity {
            model.capacity = Set(capacity);
        }

        if let Some(grade) = update.grade {
            model.grade = Set(grade);
        }

        if let Some(supervisor_id) = update.supervisor_id {
            model.supervisor_id = Set(supervisor_id);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("更新班级失败: {e}")))?;

        Ok(Some(result.into_class()))
    }

    /// 删除班级
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(class_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
