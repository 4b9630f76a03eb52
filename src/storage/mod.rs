use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

pub use sea_orm_storage::SeaOrmStorage;

/// 通用列表过滤条件（学院、课程、批次、排课等）
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub course_id: Option<i64>,
    pub college_id: Option<i64>,
    pub trainer_id: Option<i64>,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 批量获取用户
    async fn list_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 设置密码，同时设置是否要求修改密码
    async fn set_user_password(
        &self,
        id: i64,
        password_hash: &str,
        must_change_password: bool,
    ) -> Result<bool>;
    // 更新讲师访问窗口
    async fn update_user_access(&self, id: i64, update: AccessUpdate) -> Result<Option<User>>;
    // 保存简历路径
    async fn set_user_resume(&self, id: i64, resume_path: &str) -> Result<bool>;
    // 获取简历路径
    async fn get_user_resume_path(&self, id: i64) -> Result<Option<String>>;
    // 为学员分配资料
    async fn assign_materials(&self, user_id: i64, material_ids: &[i64]) -> Result<Option<User>>;
    // 为学员分配测评
    async fn assign_assessments(
        &self,
        user_id: i64,
        assessment_ids: &[i64],
    ) -> Result<Option<User>>;
    // 学员所在批次涉及的课程名称（去重）
    async fn list_student_course_names(&self, user_id: i64) -> Result<Vec<String>>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 学院管理方法
    async fn create_college(&self, college: CreateCollegeRequest) -> Result<College>;
    async fn get_college_by_id(&self, id: i64) -> Result<Option<College>>;
    async fn get_college_by_name(&self, name: &str) -> Result<Option<College>>;
    async fn list_colleges_with_pagination(
        &self,
        filter: ListFilter,
    ) -> Result<PaginatedResponse<College>>;
    async fn update_college(
        &self,
        id: i64,
        update: UpdateCollegeRequest,
    ) -> Result<Option<College>>;
    async fn delete_college(&self, id: i64) -> Result<bool>;

    /// 课程管理方法
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn get_course_by_name(&self, name: &str) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        filter: ListFilter,
    ) -> Result<PaginatedResponse<Course>>;
    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;
    // 课程模块
    async fn create_course_module(
        &self,
        course_id: i64,
        module: CreateCourseModuleRequest,
    ) -> Result<CourseModule>;
    async fn update_course_module(
        &self,
        course_id: i64,
        module_id: i64,
        update: UpdateCourseModuleRequest,
    ) -> Result<Option<CourseModule>>;
    async fn delete_course_module(&self, course_id: i64, module_id: i64) -> Result<bool>;

    /// 教学资料管理方法
    async fn create_material(&self, material: NewMaterial) -> Result<Material>;
    async fn get_material_by_id(&self, id: i64) -> Result<Option<Material>>;
    async fn get_material_file(&self, id: i64) -> Result<Option<MaterialFile>>;
    async fn list_materials_by_ids(&self, ids: &[i64]) -> Result<Vec<Material>>;
    // 课程下所有资料的文件路径
    async fn list_course_material_paths(&self, course_id: i64) -> Result<Vec<String>>;
    async fn list_materials_with_pagination(
        &self,
        filter: ListFilter,
        material_type: Option<String>,
    ) -> Result<PaginatedResponse<Material>>;
    async fn update_material(
        &self,
        id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>>;
    // 删除资料，返回被删除记录的文件路径
    async fn delete_material(&self, id: i64) -> Result<Option<String>>;

    /// 批次管理方法
    async fn create_batch(&self, batch: CreateBatchRequest) -> Result<Batch>;
    async fn get_batch_by_id(&self, id: i64) -> Result<Option<Batch>>;
    async fn list_batches_with_pagination(
        &self,
        filter: ListFilter,
    ) -> Result<PaginatedResponse<Batch>>;
    async fn update_batch(&self, id: i64, update: UpdateBatchRequest) -> Result<Option<Batch>>;
    async fn delete_batch(&self, id: i64) -> Result<bool>;
    // 加入学员，已在批次中的会被忽略，返回新加入数量
    async fn add_batch_students(&self, batch_id: i64, user_ids: &[i64]) -> Result<u64>;
    async fn remove_batch_students(&self, batch_id: i64, user_ids: &[i64]) -> Result<u64>;

    /// 排课管理方法
    async fn create_schedule(&self, schedule: ScheduleRecord) -> Result<Schedule>;
    async fn get_schedule_by_id(&self, id: i64) -> Result<Option<Schedule>>;
    async fn list_schedules_with_pagination(
        &self,
        filter: ListFilter,
    ) -> Result<PaginatedResponse<Schedule>>;
    async fn update_schedule(&self, id: i64, schedule: ScheduleRecord)
    -> Result<Option<Schedule>>;
    async fn delete_schedule(&self, id: i64) -> Result<bool>;
    // 讲师结束时间不早于 `now` 的排课中最晚的结束时间
    async fn latest_schedule_end(
        &self,
        trainer_id: i64,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<chrono::DateTime<chrono::Utc>>>;

    /// 讲师申请管理方法
    async fn create_application(&self, application: NewApplication) -> Result<TrainerApplication>;
    async fn get_application_by_id(&self, id: i64) -> Result<Option<TrainerApplication>>;
    async fn get_application_by_email(&self, email: &str) -> Result<Option<TrainerApplication>>;
    async fn get_application_resume_path(&self, id: i64) -> Result<Option<String>>;
    async fn list_applications_with_pagination(
        &self,
        status: Option<ApplicationStatus>,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<PaginatedResponse<TrainerApplication>>;
    async fn update_application_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Option<TrainerApplication>>;
    async fn delete_application(&self, id: i64) -> Result<bool>;

    /// 账单管理方法
    // 账单与费用明细在同一事务中写入
    async fn create_bill(&self, bill: NewBill) -> Result<Bill>;
    async fn get_bill_by_id(&self, id: i64) -> Result<Option<Bill>>;
    async fn list_bills_with_pagination(
        &self,
        query: BillListQuery,
    ) -> Result<PaginatedResponse<Bill>>;
    async fn update_bill_status(&self, id: i64, status: BillStatus) -> Result<Option<Bill>>;
    async fn delete_bill(&self, id: i64) -> Result<bool>;

    /// 测评管理方法
    async fn create_assessment(
        &self,
        assessment: CreateAssessmentRequest,
        created_by: i64,
    ) -> Result<Assessment>;
    async fn get_assessment_by_id(&self, id: i64) -> Result<Option<Assessment>>;
    async fn count_existing_assessments(&self, ids: &[i64]) -> Result<u64>;
    async fn list_assessments_with_pagination(
        &self,
        query: AssessmentListQuery,
    ) -> Result<PaginatedResponse<Assessment>>;
    async fn update_assessment(
        &self,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>>;
    async fn delete_assessment(&self, id: i64) -> Result<bool>;

    /// 作答记录方法
    async fn create_attempt(&self, attempt: NewAttempt) -> Result<StudentAttempt>;
    async fn list_attempts_with_pagination(
        &self,
        query: AttemptListQuery,
    ) -> Result<PaginatedResponse<StudentAttempt>>;

    /// 统计方法
    // 至少作答一次的学员成绩汇总
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>>;
    async fn overview_counts(&self) -> Result<OverviewResponse>;
}

/// 共享存储句柄
pub type SharedStorage = Arc<dyn Storage>;

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
