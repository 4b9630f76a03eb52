//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod applications;
mod assessments;
mod attempts;
mod batches;
mod bills;
mod colleges;
mod courses;
mod lookups;
mod materials;
mod reporting;
mod schedules;
mod users;

use crate::config::AppConfig;
use crate::errors::{ParcError, Result};
use crate::models::PaginationInfo;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Select,
};
use std::time::Duration;
use tracing::info;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// 写操作的错误转换：唯一约束冲突保留为 Conflict，其余附加上下文
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(DbErr) -> ParcError {
    move |e| match ParcError::from(e) {
        ParcError::DatabaseOperation(msg) => {
            ParcError::database_operation(format!("{context}: {msg}"))
        }
        other => other,
    }
}

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database.url, config).await
    }

    /// 连接指定数据库并执行迁移
    pub async fn connect(url: &str, config: &AppConfig) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| ParcError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM storage ready, database: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    ///
    /// 内存数据库只使用一个常驻连接，否则每个连接都会看到一个空库。
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ParcError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));
        if !in_memory {
            opt = opt
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory");
        }

        let mut pool = SqlitePoolOptions::new()
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.database.timeout));
        pool = if in_memory {
            pool.max_connections(1).idle_timeout(None).max_lifetime(None)
        } else {
            pool.max_connections(config.database.pool_size)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool
            .connect_with(opt)
            .await
            .map_err(|e| ParcError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| ParcError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ParcError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 分页查询，页码从 1 开始
    pub(crate) async fn fetch_page<E>(
        &self,
        select: Select<E>,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<(Vec<E::Model>, PaginationInfo)>
    where
        E: EntityTrait,
        E::Model: Sync,
    {
        let page = page.unwrap_or(1).max(1) as u64;
        let size = size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE) as u64;

        let paginator = select.paginate(&self.db, size);
        let totals = paginator
            .num_items_and_pages()
            .await
            .map_err(|e| ParcError::database_operation(format!("查询总数失败: {e}")))?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询列表失败: {e}")))?;

        Ok((
            items,
            PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: totals.number_of_items as i64,
                total_pages: totals.number_of_pages as i64,
            },
        ))
    }
}

use crate::models::{
    PaginatedResponse,
    applications::{
        entities::{ApplicationStatus, TrainerApplication},
        requests::NewApplication,
    },
    assessments::{
        entities::Assessment,
        requests::{AssessmentListQuery, CreateAssessmentRequest, UpdateAssessmentRequest},
    },
    attempts::{
        entities::StudentAttempt,
        requests::{AttemptListQuery, NewAttempt},
    },
    batches::{
        entities::Batch,
        requests::{CreateBatchRequest, UpdateBatchRequest},
    },
    bills::{
        entities::{Bill, BillStatus},
        requests::{BillListQuery, NewBill},
    },
    colleges::{
        entities::College,
        requests::{CreateCollegeRequest, UpdateCollegeRequest},
    },
    courses::{
        entities::{Course, CourseModule},
        requests::{
            CreateCourseModuleRequest, CreateCourseRequest, UpdateCourseModuleRequest,
            UpdateCourseRequest,
        },
    },
    materials::{
        entities::Material,
        requests::{MaterialFile, NewMaterial, UpdateMaterialRequest},
    },
    reporting::responses::{LeaderboardEntry, OverviewResponse},
    schedules::{entities::Schedule, requests::ScheduleRecord},
    users::{
        entities::User,
        requests::{AccessUpdate, NewUser, UserChanges, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::storage::{ListFilter, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户管理方法
    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.list_users_by_ids_impl(ids).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<Option<User>> {
        self.update_user_impl(id, changes).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn set_user_password(&self, id: i64, password_hash: &str, must_change_password: bool) -> Result<bool> {
        self.set_user_password_impl(id, password_hash, must_change_password).await
    }

    async fn update_user_access(&self, id: i64, update: AccessUpdate) -> Result<Option<User>> {
        self.update_user_access_impl(id, update).await
    }

    async fn set_user_resume(&self, id: i64, resume_path: &str) -> Result<bool> {
        self.set_user_resume_impl(id, resume_path).await
    }

    async fn get_user_resume_path(&self, id: i64) -> Result<Option<String>> {
        self.get_user_resume_path_impl(id).await
    }

    async fn assign_materials(&self, user_id: i64, material_ids: &[i64]) -> Result<Option<User>> {
        self.assign_materials_impl(user_id, material_ids).await
    }

    async fn assign_assessments(&self, user_id: i64, assessment_ids: &[i64]) -> Result<Option<User>> {
        self.assign_assessments_impl(user_id, assessment_ids).await
    }

    async fn list_student_course_names(&self, user_id: i64) -> Result<Vec<String>> {
        self.list_student_course_names_impl(user_id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 学院管理方法
    async fn create_college(&self, college: CreateCollegeRequest) -> Result<College> {
        self.create_college_impl(college).await
    }

    async fn get_college_by_id(&self, id: i64) -> Result<Option<College>> {
        self.get_college_by_id_impl(id).await
    }

    async fn get_college_by_name(&self, name: &str) -> Result<Option<College>> {
        self.get_college_by_name_impl(name).await
    }

    async fn list_colleges_with_pagination(&self, filter: ListFilter) -> Result<PaginatedResponse<College>> {
        self.list_colleges_with_pagination_impl(filter).await
    }

    async fn update_college(&self, id: i64, update: UpdateCollegeRequest) -> Result<Option<College>> {
        self.update_college_impl(id, update).await
    }

    async fn delete_college(&self, id: i64) -> Result<bool> {
        self.delete_college_impl(id).await
    }

    // 课程管理方法
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn get_course_by_name(&self, name: &str) -> Result<Option<Course>> {
        self.get_course_by_name_impl(name).await
    }

    async fn list_courses_with_pagination(&self, filter: ListFilter) -> Result<PaginatedResponse<Course>> {
        self.list_courses_with_pagination_impl(filter).await
    }

    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>> {
        self.update_course_impl(id, update).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    async fn create_course_module(&self, course_id: i64, module: CreateCourseModuleRequest) -> Result<CourseModule> {
        self.create_course_module_impl(course_id, module).await
    }

    async fn update_course_module(&self, course_id: i64, module_id: i64, update: UpdateCourseModuleRequest) -> Result<Option<CourseModule>> {
        self.update_course_module_impl(course_id, module_id, update).await
    }

    async fn delete_course_module(&self, course_id: i64, module_id: i64) -> Result<bool> {
        self.delete_course_module_impl(course_id, module_id).await
    }

    // 教学资料管理方法
    async fn create_material(&self, material: NewMaterial) -> Result<Material> {
        self.create_material_impl(material).await
    }

    async fn get_material_by_id(&self, id: i64) -> Result<Option<Material>> {
        self.get_material_by_id_impl(id).await
    }

    async fn get_material_file(&self, id: i64) -> Result<Option<MaterialFile>> {
        self.get_material_file_impl(id).await
    }

    async fn list_materials_by_ids(&self, ids: &[i64]) -> Result<Vec<Material>> {
        self.list_materials_by_ids_impl(ids).await
    }

    async fn list_course_material_paths(&self, course_id: i64) -> Result<Vec<String>> {
        self.list_course_material_paths_impl(course_id).await
    }

    async fn list_materials_with_pagination(&self, filter: ListFilter, material_type: Option<String>) -> Result<PaginatedResponse<Material>> {
        self.list_materials_with_pagination_impl(filter, material_type).await
    }

    async fn update_material(&self, id: i64, update: UpdateMaterialRequest) -> Result<Option<Material>> {
        self.update_material_impl(id, update).await
    }

    async fn delete_material(&self, id: i64) -> Result<Option<String>> {
        self.delete_material_impl(id).await
    }

    // 批次管理方法
    async fn create_batch(&self, batch: CreateBatchRequest) -> Result<Batch> {
        self.create_batch_impl(batch).await
    }

    async fn get_batch_by_id(&self, id: i64) -> Result<Option<Batch>> {
        self.get_batch_by_id_impl(id).await
    }

    async fn list_batches_with_pagination(&self, filter: ListFilter) -> Result<PaginatedResponse<Batch>> {
        self.list_batches_with_pagination_impl(filter).await
    }

    async fn update_batch(&self, id: i64, update: UpdateBatchRequest) -> Result<Option<Batch>> {
        self.update_batch_impl(id, update).await
    }

    async fn delete_batch(&self, id: i64) -> Result<bool> {
        self.delete_batch_impl(id).await
    }

    async fn add_batch_students(&self, batch_id: i64, user_ids: &[i64]) -> Result<u64> {
        self.add_batch_students_impl(batch_id, user_ids).await
    }

    async fn remove_batch_students(&self, batch_id: i64, user_ids: &[i64]) -> Result<u64> {
        self.remove_batch_students_impl(batch_id, user_ids).await
    }

    // 排课管理方法
    async fn create_schedule(&self, schedule: ScheduleRecord) -> Result<Schedule> {
        self.create_schedule_impl(schedule).await
    }

    async fn get_schedule_by_id(&self, id: i64) -> Result<Option<Schedule>> {
        self.get_schedule_by_id_impl(id).await
    }

    async fn list_schedules_with_pagination(&self, filter: ListFilter) -> Result<PaginatedResponse<Schedule>> {
        self.list_schedules_with_pagination_impl(filter).await
    }

    async fn update_schedule(&self, id: i64, schedule: ScheduleRecord) -> Result<Option<Schedule>> {
        self.update_schedule_impl(id, schedule).await
    }

    async fn delete_schedule(&self, id: i64) -> Result<bool> {
        self.delete_schedule_impl(id).await
    }

    async fn latest_schedule_end(&self, trainer_id: i64, now: chrono::DateTime<chrono::Utc>) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
        self.latest_schedule_end_impl(trainer_id, now).await
    }

    // 讲师申请管理方法
    async fn create_application(&self, application: NewApplication) -> Result<TrainerApplication> {
        self.create_application_impl(application).await
    }

    async fn get_application_by_id(&self, id: i64) -> Result<Option<TrainerApplication>> {
        self.get_application_by_id_impl(id).await
    }

    async fn get_application_by_email(&self, email: &str) -> Result<Option<TrainerApplication>> {
        self.get_application_by_email_impl(email).await
    }

    async fn get_application_resume_path(&self, id: i64) -> Result<Option<String>> {
        self.get_application_resume_path_impl(id).await
    }

    async fn list_applications_with_pagination(&self, status: Option<ApplicationStatus>, page: Option<i64>, size: Option<i64>) -> Result<PaginatedResponse<TrainerApplication>> {
        self.list_applications_with_pagination_impl(status, page, size).await
    }

    async fn update_application_status(&self, id: i64, status: ApplicationStatus) -> Result<Option<TrainerApplication>> {
        self.update_application_status_impl(id, status).await
    }

    async fn delete_application(&self, id: i64) -> Result<bool> {
        self.delete_application_impl(id).await
    }

    // 账单管理方法
    async fn create_bill(&self, bill: NewBill) -> Result<Bill> {
        self.create_bill_impl(bill).await
    }

    async fn get_bill_by_id(&self, id: i64) -> Result<Option<Bill>> {
        self.get_bill_by_id_impl(id).await
    }

    async fn list_bills_with_pagination(&self, query: BillListQuery) -> Result<PaginatedResponse<Bill>> {
        self.list_bills_with_pagination_impl(query).await
    }

    async fn update_bill_status(&self, id: i64, status: BillStatus) -> Result<Option<Bill>> {
        self.update_bill_status_impl(id, status).await
    }

    async fn delete_bill(&self, id: i64) -> Result<bool> {
        self.delete_bill_impl(id).await
    }

    // 测评管理方法
    async fn create_assessment(&self, assessment: CreateAssessmentRequest, created_by: i64) -> Result<Assessment> {
        self.create_assessment_impl(assessment, created_by).await
    }

    async fn get_assessment_by_id(&self, id: i64) -> Result<Option<Assessment>> {
        self.get_assessment_by_id_impl(id).await
    }

    async fn count_existing_assessments(&self, ids: &[i64]) -> Result<u64> {
        self.count_existing_assessments_impl(ids).await
    }

    async fn list_assessments_with_pagination(&self, query: AssessmentListQuery) -> Result<PaginatedResponse<Assessment>> {
        self.list_assessments_with_pagination_impl(query).await
    }

    async fn update_assessment(&self, id: i64, update: UpdateAssessmentRequest) -> Result<Option<Assessment>> {
        self.update_assessment_impl(id, update).await
    }

    async fn delete_assessment(&self, id: i64) -> Result<bool> {
        self.delete_assessment_impl(id).await
    }

    // 作答记录方法
    async fn create_attempt(&self, attempt: NewAttempt) -> Result<StudentAttempt> {
        self.create_attempt_impl(attempt).await
    }

    async fn list_attempts_with_pagination(&self, query: AttemptListQuery) -> Result<PaginatedResponse<StudentAttempt>> {
        self.list_attempts_with_pagination_impl(query).await
    }

    // 统计方法
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        self.leaderboard_impl().await
    }

    async fn overview_counts(&self) -> Result<OverviewResponse> {
        self.overview_counts_impl().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("data/parc.db").unwrap(),
            "sqlite://data/parc.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://u@h/db").is_ok());
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }
}
