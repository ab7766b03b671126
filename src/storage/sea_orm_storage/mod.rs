//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod classes;
mod subjects;
mod teachers;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolAdminError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实例
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 基于已有连接构造存储实例（测试用）
    #[cfg(test)]
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolAdminError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolAdminError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolAdminError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolAdminError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<ClassListItem>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    // 科目模块
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<SubjectListItem> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<SubjectListItem>> {
        self.get_subject_by_id_impl(subject_id).await
    }

    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        self.list_subjects_with_pagination_impl(query).await
    }

    async fn update_subject(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<SubjectListItem>> {
        self.update_subject_impl(subject_id, update).await
    }

    async fn delete_subject(&self, subject_id: i64) -> Result<bool> {
        self.delete_subject_impl(subject_id).await
    }

    // 教师模块
    async fn get_teacher_by_id(&self, teacher_id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(teacher_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::prelude::{StudentActiveModel, TeacherActiveModel};
    use crate::models::classes::requests::{ClassListQuery, CreateClassRequest};
    use crate::models::subjects::requests::{
        CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest,
    };
    use sea_orm::{ActiveModelTrait, Set};

    async fn setup_storage() -> SeaOrmStorage {
        // 内存库必须限制单连接，否则池内每个连接各自一份空库
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = Database::connect(opt).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmStorage::from_connection(db)
    }

    async fn seed_teacher(storage: &SeaOrmStorage, username: &str) -> i64 {
        let now = chrono::Utc::now().timestamp();
        TeacherActiveModel {
            username: Set(username.to_string()),
            name: Set("Jane".to_string()),
            surname: Set(username.to_string()),
            email: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap()
        .id
    }

    async fn seed_student(storage: &SeaOrmStorage, username: &str, class_id: i64) {
        let now = chrono::Utc::now().timestamp();
        StudentActiveModel {
            username: Set(username.to_string()),
            name: Set("John".to_string()),
            surname: Set(username.to_string()),
            class_id: Set(class_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap();
    }

    fn create_class_request(name: &str, supervisor_id: i64) -> CreateClassRequest {
        CreateClassRequest {
            name: name.to_string(),
            capacity: 30,
            grade: 5,
            supervisor_id,
        }
    }

    #[tokio::test]
    async fn test_class_list_pagination_totals() {
        let storage = setup_storage().await;
        let teacher_id = seed_teacher(&storage, "smith").await;

        for name in ["Alpha", "Beta", "Gamma"] {
            storage
                .create_class_impl(create_class_request(name, teacher_id))
                .await
                .unwrap();
        }

        let response = storage
            .list_classes_with_pagination_impl(ClassListQuery {
                page: Some(1),
                size: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(response.pagination.total, 3);
        assert_eq!(response.pagination.total_pages, 2);
        assert_eq!(response.items.len(), 2);

        let response = storage
            .list_classes_with_pagination_impl(ClassListQuery {
                page: Some(2),
                size: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(response.items.len(), 1);
    }

    #[tokio::test]
    async fn test_class_list_huge_page_returns_empty() {
        let storage = setup_storage().await;
        let teacher_id = seed_teacher(&storage, "smith").await;
        storage
            .create_class_impl(create_class_request("Alpha", teacher_id))
            .await
            .unwrap();

        let response = storage
            .list_classes_with_pagination_impl(ClassListQuery {
                page: Some(i64::MAX),
                size: Some(10),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(response.items.is_empty());
        assert_eq!(response.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_subject_list_huge_page_returns_empty() {
        let storage = setup_storage().await;
        let t1 = seed_teacher(&storage, "smith").await;
        storage
            .create_subject_impl(CreateSubjectRequest {
                name: "Math".to_string(),
                teacher_ids: vec![t1],
            })
            .await
            .unwrap();

        let response = storage
            .list_subjects_with_pagination_impl(SubjectListQuery {
                page: Some(i64::MAX),
                size: Some(10),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(response.items.is_empty());
        assert_eq!(response.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_class_list_embeds_supervisor_and_student_count() {
        let storage = setup_storage().await;
        let teacher_id = seed_teacher(&storage, "smith").await;
        let class = storage
            .create_class_impl(create_class_request("Alpha", teacher_id))
            .await
            .unwrap();

        seed_student(&storage, "s1", class.id).await;
        seed_student(&storage, "s2", class.id).await;

        let item = storage
            .get_class_by_id_impl(class.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(item.student_count, 2);
        assert_eq!(item.supervisor.id, teacher_id);

        let response = storage
            .list_classes_with_pagination_impl(ClassListQuery::default())
            .await
            .unwrap();
        assert_eq!(response.items[0].student_count, 2);
    }

    #[tokio::test]
    async fn test_class_search_is_case_insensitive_and_literal() {
        let storage = setup_storage().await;
        let teacher_id = seed_teacher(&storage, "smith").await;

        for name in ["Alpha", "Beta", "100% Club"] {
            storage
                .create_class_impl(create_class_request(name, teacher_id))
                .await
                .unwrap();
        }

        let response = storage
            .list_classes_with_pagination_impl(ClassListQuery {
                search: Some("ALP".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].class.class_name, "Alpha");

        // 通配符按字面量匹配
        let response = storage
            .list_classes_with_pagination_impl(ClassListQuery {
                search: Some("0%".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].class.class_name, "100% Club");
    }

    #[tokio::test]
    async fn test_subject_teacher_assignment_deduplicates() {
        let storage = setup_storage().await;
        let t1 = seed_teacher(&storage, "smith").await;

        let subject = storage
            .create_subject_impl(CreateSubjectRequest {
                name: "Math".to_string(),
                teacher_ids: vec![t1, t1],
            })
            .await
            .unwrap();
        assert_eq!(subject.teachers.len(), 1);
        assert_eq!(subject.teachers[0].id, t1);
    }

    #[tokio::test]
    async fn test_subject_create_rejects_unknown_teacher() {
        let storage = setup_storage().await;

        let result = storage
            .create_subject_impl(CreateSubjectRequest {
                name: "Math".to_string(),
                teacher_ids: vec![999],
            })
            .await;
        assert!(matches!(result, Err(SchoolAdminError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_subject_update_replaces_teacher_group() {
        let storage = setup_storage().await;
        let t1 = seed_teacher(&storage, "smith").await;
        let t2 = seed_teacher(&storage, "jones").await;

        let subject = storage
            .create_subject_impl(CreateSubjectRequest {
                name: "Math".to_string(),
                teacher_ids: vec![t1],
            })
            .await
            .unwrap();

        // 整组替换
        let updated = storage
            .update_subject_impl(
                subject.subject.id,
                UpdateSubjectRequest {
                    name: None,
                    teacher_ids: Some(vec![t2]),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.teachers.len(), 1);
        assert_eq!(updated.teachers[0].id, t2);

        // teacher_ids 缺省时保持原任课教师
        let updated = storage
            .update_subject_impl(
                subject.subject.id,
                UpdateSubjectRequest {
                    name: Some("Mathematics".to_string()),
                    teacher_ids: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.subject.subject_name, "Mathematics");
        assert_eq!(updated.teachers.len(), 1);
        assert_eq!(updated.teachers[0].id, t2);
    }

    #[tokio::test]
    async fn test_subject_list_filters_by_teacher() {
        let storage = setup_storage().await;
        let t1 = seed_teacher(&storage, "smith").await;
        let t2 = seed_teacher(&storage, "jones").await;

        storage
            .create_subject_impl(CreateSubjectRequest {
                name: "Math".to_string(),
                teacher_ids: vec![t1],
            })
            .await
            .unwrap();
        storage
            .create_subject_impl(CreateSubjectRequest {
                name: "History".to_string(),
                teacher_ids: vec![t2],
            })
            .await
            .unwrap();

        let response = storage
            .list_subjects_with_pagination_impl(SubjectListQuery {
                teacher_id: Some(t1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].subject.subject_name, "Math");
    }

    #[tokio::test]
    async fn test_subject_update_missing_returns_none() {
        let storage = setup_storage().await;
        let result = storage
            .update_subject_impl(
                42,
                UpdateSubjectRequest {
                    name: Some("Math".to_string()),
                    teacher_ids: None,
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_rows_return_false() {
        let storage = setup_storage().await;
        assert!(!storage.delete_class_impl(42).await.unwrap());
        assert!(!storage.delete_subject_impl(42).await.unwrap());
    }
}
