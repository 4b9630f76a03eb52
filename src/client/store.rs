//! 数据同步层
//!
//! 登录后并发拉取全部资源集合并缓存在本地；增删改先调用接口，
//! 成功后按 id 修补本地集合，失败时集合保持不变并记录错误文字。

use futures_util::future::join_all;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

use super::api::{ApiClient, Upload};
use super::error::{ClientError, ClientResult};
use super::normalize::{normalize_dates, normalize_datetimes};
use crate::models::PaginatedResponse;
use crate::models::applications::entities::TrainerApplication;
use crate::models::assessments::entities::Assessment;
use crate::models::assessments::requests::{CreateAssessmentRequest, UpdateAssessmentRequest};
use crate::models::attempts::entities::StudentAttempt;
use crate::models::attempts::requests::CreateAttemptRequest;
use crate::models::auth::responses::LoginResponse;
use crate::models::batches::entities::Batch;
use crate::models::batches::requests::{
    BatchStudentsRequest, CreateBatchRequest, UpdateBatchRequest,
};
use crate::models::batches::responses::BatchRosterResponse;
use crate::models::bills::entities::Bill;
use crate::models::bills::requests::CreateBillRequest;
use crate::models::colleges::entities::College;
use crate::models::colleges::requests::{CreateCollegeRequest, UpdateCollegeRequest};
use crate::models::courses::entities::Course;
use crate::models::courses::requests::{
    CreateCourseModuleRequest, CreateCourseRequest, UpdateCourseModuleRequest,
    UpdateCourseRequest,
};
use crate::models::materials::entities::Material;
use crate::models::materials::requests::UpdateMaterialRequest;
use crate::models::reporting::responses::ReportingResponse;
use crate::models::schedules::entities::Schedule;
use crate::models::schedules::requests::{CreateScheduleRequest, UpdateScheduleRequest};
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::{
    AssignAssessmentsRequest, AssignMaterialsRequest, CreateUserRequest, UpdateUserRequest,
};
use crate::models::users::responses::BulkCreateStudentsResponse;

/// 单个资源请求的超时
pub const SYNC_TIMEOUT: Duration = Duration::from_secs(10);
pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";
pub const ALL_REQUESTS_FAILED: &str = "All data requests failed.";

const PAGE_SIZE: i64 = 100;

/// 登录后同步的资源集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Materials,
    Schedules,
    Colleges,
    Applications,
    Bills,
    Reporting,
    Assessments,
    Courses,
    Batches,
}

impl Resource {
    pub const ALL: [Resource; 10] = [
        Resource::Users,
        Resource::Materials,
        Resource::Schedules,
        Resource::Colleges,
        Resource::Applications,
        Resource::Bills,
        Resource::Reporting,
        Resource::Assessments,
        Resource::Courses,
        Resource::Batches,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Resource::Users => "/users",
            Resource::Materials => "/materials",
            Resource::Schedules => "/schedules",
            Resource::Colleges => "/colleges",
            Resource::Applications => "/applications",
            Resource::Bills => "/bills",
            Resource::Reporting => "/reporting",
            Resource::Assessments => "/assessments",
            Resource::Courses => "/courses",
            Resource::Batches => "/batches",
        }
    }

    fn paginated(self) -> bool {
        self != Resource::Reporting
    }

    /// 单条记录的日期归一化
    fn normalize(self, item: &mut Value) {
        match self {
            Resource::Schedules => normalize_datetimes(item, &["start_date", "end_date"]),
            Resource::Bills => normalize_dates(item, &["date"]),
            Resource::Users => normalize_datetimes(item, &["access_expiry_date"]),
            Resource::Batches => normalize_dates(item, &["start_date", "end_date"]),
            Resource::Reporting => {
                if let Some(attempts) = item
                    .get_mut("student_attempts")
                    .and_then(Value::as_array_mut)
                {
                    attempts
                        .iter_mut()
                        .for_each(|attempt| normalize_datetimes(attempt, &["timestamp"]));
                }
            }
            _ => {}
        }
    }
}

/// 拥有数字 id 的实体
pub trait Identified {
    fn id(&self) -> i64;
}

macro_rules! impl_identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

impl_identified!(
    User,
    Material,
    Schedule,
    College,
    TrainerApplication,
    Bill,
    Assessment,
    Course,
    Batch,
    StudentAttempt,
);

fn insert_front<T>(items: &mut Vec<T>, item: T) {
    items.insert(0, item);
}

/// 按 id 替换，不存在时插入到最前
fn replace_by_id<T: Identified>(items: &mut Vec<T>, item: T) {
    match items.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(existing) => *existing = item,
        None => insert_front(items, item),
    }
}

fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: i64) {
    items.retain(|item| item.id() != id);
}

/// 账单按日期倒序，同一天保持原有顺序
fn sort_bills(bills: &mut [Bill]) {
    bills.sort_by(|a, b| b.date.cmp(&a.date));
}

fn decode<T: DeserializeOwned>(resource: Resource, mut value: Value) -> ClientResult<T> {
    resource.normalize(&mut value);
    Ok(serde_json::from_value(value)?)
}

/// 拉取单个资源，分页资源会取完所有页
async fn fetch_resource(api: &ApiClient, resource: Resource) -> ClientResult<Value> {
    if !resource.paginated() {
        let mut data = api.get_value_once(resource.path()).await?;
        resource.normalize(&mut data);
        return Ok(data);
    }

    let mut items = Vec::new();
    let mut page = 1;
    loop {
        let path = format!("{}?page={page}&size={PAGE_SIZE}", resource.path());
        let data: PaginatedResponse<Value> =
            serde_json::from_value(api.get_value_once(&path).await?)?;
        items.extend(data.items);
        if page >= data.pagination.total_pages {
            break;
        }
        page += 1;
    }

    items.iter_mut().for_each(|item| resource.normalize(item));
    Ok(Value::Array(items))
}

/// 本地缓存的集合
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub users: Vec<User>,
    pub materials: Vec<Material>,
    pub schedules: Vec<Schedule>,
    pub colleges: Vec<College>,
    pub applications: Vec<TrainerApplication>,
    pub bills: Vec<Bill>,
    pub reporting: Option<ReportingResponse>,
    pub assessments: Vec<Assessment>,
    pub courses: Vec<Course>,
    pub batches: Vec<Batch>,
}

pub struct DataStore {
    api: ApiClient,
    data: Collections,
    current_user: Option<User>,
    synced: bool,
    error: Option<String>,
    sync_timeout: Duration,
}

impl DataStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            data: Collections::default(),
            current_user: None,
            synced: false,
            error: None,
            sync_timeout: SYNC_TIMEOUT,
        }
    }

    pub fn with_sync_timeout(mut self, timeout: Duration) -> Self {
        self.sync_timeout = timeout;
        self
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn data(&self) -> &Collections {
        &self.data
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_synced(&self) -> bool {
        self.synced
    }

    /// 最近一次失败的提示文字
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn users(&self) -> &[User] {
        &self.data.users
    }

    pub fn trainers(&self) -> Vec<&User> {
        self.users_with_role(UserRole::Trainer)
    }

    pub fn students(&self) -> Vec<&User> {
        self.users_with_role(UserRole::Student)
    }

    fn users_with_role(&self, role: UserRole) -> Vec<&User> {
        self.data.users.iter().filter(|u| u.role == role).collect()
    }

    pub fn materials(&self) -> &[Material] {
        &self.data.materials
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.data.schedules
    }

    pub fn colleges(&self) -> &[College] {
        &self.data.colleges
    }

    pub fn applications(&self) -> &[TrainerApplication] {
        &self.data.applications
    }

    pub fn bills(&self) -> &[Bill] {
        &self.data.bills
    }

    pub fn reporting(&self) -> Option<&ReportingResponse> {
        self.data.reporting.as_ref()
    }

    pub fn assessments(&self) -> &[Assessment] {
        &self.data.assessments
    }

    pub fn courses(&self) -> &[Course] {
        &self.data.courses
    }

    pub fn batches(&self) -> &[Batch] {
        &self.data.batches
    }

    /// 记录并返回错误文字
    fn record<T>(&mut self, result: ClientResult<T>) -> Result<T, String> {
        result.map_err(|e| {
            let message = e.to_string();
            warn!("Request failed: {}", message);
            self.error = Some(message.clone());
            message
        })
    }

    fn fail_sync(&mut self, message: &str) -> Result<(), String> {
        warn!("Sync failed: {}", message);
        self.synced = false;
        self.error = Some(message.to_string());
        Err(message.to_string())
    }

    /// 登录后立即同步；同步失败不影响登录结果，错误见 `error()`
    pub async fn login(&mut self, username: &str, password: &str) -> Result<LoginResponse, String> {
        let result = self.api.login(username, password).await;
        let login = self.record(result)?;
        self.current_user = Some(login.user.clone());
        self.error = None;

        if let Err(e) = self.sync_all().await {
            warn!("Initial sync after login failed: {}", e);
        }
        Ok(login)
    }

    pub fn logout(&mut self) {
        self.api.clear_tokens();
        self.data = Collections::default();
        self.current_user = None;
        self.synced = false;
        self.error = None;
    }

    async fn fetch_all(&self) -> Vec<(Resource, ClientResult<Value>)> {
        let api = &self.api;
        let timeout = self.sync_timeout;
        join_all(Resource::ALL.iter().map(|&resource| async move {
            let outcome = tokio::time::timeout(timeout, fetch_resource(api, resource))
                .await
                .unwrap_or(Err(ClientError::Timeout));
            (resource, outcome)
        }))
        .await
    }

    fn apply(&mut self, resource: Resource, data: Value) -> ClientResult<()> {
        let data_ref = &mut self.data;
        match resource {
            Resource::Users => data_ref.users = serde_json::from_value(data)?,
            Resource::Materials => data_ref.materials = serde_json::from_value(data)?,
            Resource::Schedules => data_ref.schedules = serde_json::from_value(data)?,
            Resource::Colleges => data_ref.colleges = serde_json::from_value(data)?,
            Resource::Applications => data_ref.applications = serde_json::from_value(data)?,
            Resource::Bills => {
                let mut bills: Vec<Bill> = serde_json::from_value(data)?;
                sort_bills(&mut bills);
                data_ref.bills = bills;
            }
            Resource::Reporting => data_ref.reporting = Some(serde_json::from_value(data)?),
            Resource::Assessments => data_ref.assessments = serde_json::from_value(data)?,
            Resource::Courses => data_ref.courses = serde_json::from_value(data)?,
            Resource::Batches => data_ref.batches = serde_json::from_value(data)?,
        }
        Ok(())
    }

    /// 写入成功拉取的集合，返回写入成功的资源
    fn apply_outcomes(&mut self, outcomes: Vec<(Resource, ClientResult<Value>)>) -> Vec<Resource> {
        let mut applied = Vec::new();
        for (resource, outcome) in outcomes {
            match outcome.and_then(|data| self.apply(resource, data)) {
                Ok(()) => applied.push(resource),
                Err(e) => warn!("Failed to sync {}: {}", resource.path(), e),
            }
        }
        applied
    }

    /// 并发拉取全部资源
    ///
    /// 成功的集合总会先写入。出现 401 时刷新一次令牌并整体重试一次，
    /// 仍失败则报告会话过期；全部失败时报错；部分失败时失败的集合保留原内容。
    pub async fn sync_all(&mut self) -> Result<(), String> {
        let has_unauthorized = |outcomes: &[(Resource, ClientResult<Value>)]| {
            outcomes
                .iter()
                .any(|(_, outcome)| matches!(outcome, Err(e) if e.is_unauthorized()))
        };

        let outcomes = self.fetch_all().await;
        let unauthorized = has_unauthorized(&outcomes);
        let mut applied = self.apply_outcomes(outcomes);

        if unauthorized {
            info!("Sync received 401, refreshing access token");
            if self.api.refresh().await.is_err() {
                return self.fail_sync(SESSION_EXPIRED);
            }
            let retried = self.fetch_all().await;
            let unauthorized = has_unauthorized(&retried);
            for resource in self.apply_outcomes(retried) {
                if !applied.contains(&resource) {
                    applied.push(resource);
                }
            }
            if unauthorized {
                return self.fail_sync(SESSION_EXPIRED);
            }
        }

        if applied.is_empty() {
            return self.fail_sync(ALL_REQUESTS_FAILED);
        }

        info!("Synced {}/{} resources", applied.len(), Resource::ALL.len());
        self.error = None;
        self.synced = true;
        Ok(())
    }

    /// 单独刷新某个集合，遇到 401 时刷新令牌重试一次
    pub async fn refetch(&mut self, resource: Resource) -> Result<(), String> {
        let result = match fetch_resource(&self.api, resource).await {
            Err(ClientError::Unauthorized(_)) => match self.api.refresh().await {
                Ok(()) => fetch_resource(&self.api, resource).await,
                Err(e) => Err(e),
            },
            other => other,
        };
        let applied = result.and_then(|data| self.apply(resource, data));
        self.record(applied)
    }

    /// 变更成功后顺带刷新关联集合，失败只记日志
    async fn refetch_quietly(&mut self, resource: Resource) {
        if let Err(e) = self.refetch(resource).await {
            warn!("Failed to refresh {} after update: {}", resource.path(), e);
        }
    }

    async fn call<B: Serialize, T: DeserializeOwned>(
        &mut self,
        resource: Resource,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, String> {
        let result = self
            .api
            .send_json(method, path, body)
            .await
            .and_then(|data| decode(resource, data));
        self.record(result)
    }

    async fn action<T: DeserializeOwned>(
        &mut self,
        resource: Resource,
        path: &str,
    ) -> Result<T, String> {
        let result = self
            .api
            .post_action(path)
            .await
            .and_then(|data| decode(resource, data));
        self.record(result)
    }

    async fn upload<T: DeserializeOwned>(
        &mut self,
        resource: Resource,
        path: &str,
        upload: &Upload,
    ) -> Result<T, String> {
        let result = self
            .api
            .post_multipart::<Value>(path, upload)
            .await
            .and_then(|data| decode(resource, data));
        self.record(result)
    }

    async fn remove(&mut self, path: &str) -> Result<(), String> {
        let result = self.api.delete(path).await;
        self.record(result)
    }

    // 用户

    pub async fn create_user(&mut self, request: &CreateUserRequest) -> Result<User, String> {
        let user: User = self
            .call(Resource::Users, Method::POST, "/users", request)
            .await?;
        insert_front(&mut self.data.users, user.clone());
        Ok(user)
    }

    pub async fn update_user(
        &mut self,
        id: i64,
        request: &UpdateUserRequest,
    ) -> Result<User, String> {
        let user: User = self
            .call(Resource::Users, Method::PATCH, &format!("/users/{id}"), request)
            .await?;
        replace_by_id(&mut self.data.users, user.clone());
        Ok(user)
    }

    pub async fn delete_user(&mut self, id: i64) -> Result<(), String> {
        self.remove(&format!("/users/{id}")).await?;
        remove_by_id(&mut self.data.users, id);
        Ok(())
    }

    pub async fn bulk_create_students(
        &mut self,
        upload: &Upload,
    ) -> Result<BulkCreateStudentsResponse, String> {
        let response: BulkCreateStudentsResponse = self
            .upload(Resource::Users, "/users/bulk_create_students", upload)
            .await?;
        self.refetch_quietly(Resource::Users).await;
        Ok(response)
    }

    pub async fn assign_materials(
        &mut self,
        id: i64,
        material_ids: Vec<i64>,
    ) -> Result<User, String> {
        let body = AssignMaterialsRequest { material_ids };
        let user: User = self
            .call(
                Resource::Users,
                Method::POST,
                &format!("/users/{id}/assign_materials"),
                &body,
            )
            .await?;
        replace_by_id(&mut self.data.users, user.clone());
        Ok(user)
    }

    pub async fn assign_assessments(
        &mut self,
        id: i64,
        assessment_ids: Vec<i64>,
    ) -> Result<User, String> {
        let body = AssignAssessmentsRequest { assessment_ids };
        let user: User = self
            .call(
                Resource::Users,
                Method::POST,
                &format!("/users/{id}/assign_assessments"),
                &body,
            )
            .await?;
        replace_by_id(&mut self.data.users, user.clone());
        Ok(user)
    }

    // 学院

    pub async fn create_college(
        &mut self,
        request: &CreateCollegeRequest,
    ) -> Result<College, String> {
        let college: College = self
            .call(Resource::Colleges, Method::POST, "/colleges", request)
            .await?;
        insert_front(&mut self.data.colleges, college.clone());
        Ok(college)
    }

    pub async fn update_college(
        &mut self,
        id: i64,
        request: &UpdateCollegeRequest,
    ) -> Result<College, String> {
        let college: College = self
            .call(
                Resource::Colleges,
                Method::PATCH,
                &format!("/colleges/{id}"),
                request,
            )
            .await?;
        replace_by_id(&mut self.data.colleges, college.clone());
        Ok(college)
    }

    pub async fn delete_college(&mut self, id: i64) -> Result<(), String> {
        self.remove(&format!("/colleges/{id}")).await?;
        remove_by_id(&mut self.data.colleges, id);
        Ok(())
    }

    // 课程与模块

    pub async fn create_course(&mut self, request: &CreateCourseRequest) -> Result<Course, String> {
        let course: Course = self
            .call(Resource::Courses, Method::POST, "/courses", request)
            .await?;
        insert_front(&mut self.data.courses, course.clone());
        Ok(course)
    }

    pub async fn update_course(
        &mut self,
        id: i64,
        request: &UpdateCourseRequest,
    ) -> Result<Course, String> {
        let course: Course = self
            .call(
                Resource::Courses,
                Method::PATCH,
                &format!("/courses/{id}"),
                request,
            )
            .await?;
        replace_by_id(&mut self.data.courses, course.clone());
        Ok(course)
    }

    pub async fn delete_course(&mut self, id: i64) -> Result<(), String> {
        self.remove(&format!("/courses/{id}")).await?;
        remove_by_id(&mut self.data.courses, id);
        // 课程删除会级联删除其资料
        self.data.materials.retain(|m| m.course_id != id);
        Ok(())
    }

    /// 模块变更后重新读取所属课程
    async fn reload_course(&mut self, course_id: i64) -> Result<Course, String> {
        let result = self
            .api
            .get::<Value>(&format!("/courses/{course_id}"))
            .await
            .and_then(|data| decode(Resource::Courses, data));
        let course: Course = self.record(result)?;
        replace_by_id(&mut self.data.courses, course.clone());
        Ok(course)
    }

    pub async fn create_module(
        &mut self,
        course_id: i64,
        request: &CreateCourseModuleRequest,
    ) -> Result<Course, String> {
        self.call::<_, Value>(
            Resource::Courses,
            Method::POST,
            &format!("/courses/{course_id}/modules"),
            request,
        )
        .await?;
        self.reload_course(course_id).await
    }

    pub async fn update_module(
        &mut self,
        course_id: i64,
        module_id: i64,
        request: &UpdateCourseModuleRequest,
    ) -> Result<Course, String> {
        self.call::<_, Value>(
            Resource::Courses,
            Method::PATCH,
            &format!("/courses/{course_id}/modules/{module_id}"),
            request,
        )
        .await?;
        self.reload_course(course_id).await
    }

    pub async fn delete_module(&mut self, course_id: i64, module_id: i64) -> Result<Course, String> {
        self.remove(&format!("/courses/{course_id}/modules/{module_id}"))
            .await?;
        self.reload_course(course_id).await
    }

    // 资料

    /// `upload` 需包含 `title`、`course`、`type` 字段与 `file` 文件
    pub async fn upload_material(&mut self, upload: &Upload) -> Result<Material, String> {
        let material: Material = self
            .upload(Resource::Materials, "/materials", upload)
            .await?;
        insert_front(&mut self.data.materials, material.clone());
        Ok(material)
    }

    pub async fn update_material(
        &mut self,
        id: i64,
        request: &UpdateMaterialRequest,
    ) -> Result<Material, String> {
        let material: Material = self
            .call(
                Resource::Materials,
                Method::PATCH,
                &format!("/materials/{id}"),
                request,
            )
            .await?;
        replace_by_id(&mut self.data.materials, material.clone());
        Ok(material)
    }

    pub async fn delete_material(&mut self, id: i64) -> Result<(), String> {
        self.remove(&format!("/materials/{id}")).await?;
        remove_by_id(&mut self.data.materials, id);
        Ok(())
    }

    // 批次

    pub async fn create_batch(&mut self, request: &CreateBatchRequest) -> Result<Batch, String> {
        let batch: Batch = self
            .call(Resource::Batches, Method::POST, "/batches", request)
            .await?;
        insert_front(&mut self.data.batches, batch.clone());
        Ok(batch)
    }

    pub async fn update_batch(
        &mut self,
        id: i64,
        request: &UpdateBatchRequest,
    ) -> Result<Batch, String> {
        let batch: Batch = self
            .call(
                Resource::Batches,
                Method::PATCH,
                &format!("/batches/{id}"),
                request,
            )
            .await?;
        replace_by_id(&mut self.data.batches, batch.clone());
        Ok(batch)
    }

    pub async fn delete_batch(&mut self, id: i64) -> Result<(), String> {
        self.remove(&format!("/batches/{id}")).await?;
        remove_by_id(&mut self.data.batches, id);
        Ok(())
    }

    pub async fn create_batch_with_students(
        &mut self,
        upload: &Upload,
    ) -> Result<BatchRosterResponse, String> {
        let response: BatchRosterResponse = self
            .upload(Resource::Batches, "/batches/create_with_students", upload)
            .await?;
        insert_front(&mut self.data.batches, response.batch.clone());
        self.refetch_quietly(Resource::Users).await;
        Ok(response)
    }

    pub async fn add_students_from_file(
        &mut self,
        id: i64,
        upload: &Upload,
    ) -> Result<BatchRosterResponse, String> {
        let response: BatchRosterResponse = self
            .upload(
                Resource::Batches,
                &format!("/batches/{id}/add_students_from_file"),
                upload,
            )
            .await?;
        replace_by_id(&mut self.data.batches, response.batch.clone());
        self.refetch_quietly(Resource::Users).await;
        Ok(response)
    }

    async fn change_students(
        &mut self,
        id: i64,
        action: &str,
        student_ids: Vec<i64>,
    ) -> Result<Batch, String> {
        let body = BatchStudentsRequest { student_ids };
        let batch: Batch = self
            .call(
                Resource::Batches,
                Method::POST,
                &format!("/batches/{id}/{action}"),
                &body,
            )
            .await?;
        replace_by_id(&mut self.data.batches, batch.clone());
        self.refetch_quietly(Resource::Users).await;
        Ok(batch)
    }

    pub async fn add_students(&mut self, id: i64, student_ids: Vec<i64>) -> Result<Batch, String> {
        self.change_students(id, "add_students", student_ids).await
    }

    pub async fn remove_students(
        &mut self,
        id: i64,
        student_ids: Vec<i64>,
    ) -> Result<Batch, String> {
        self.change_students(id, "remove_students", student_ids)
            .await
    }

    // 排课

    pub async fn create_schedule(
        &mut self,
        request: &CreateScheduleRequest,
    ) -> Result<Schedule, String> {
        let schedule: Schedule = self
            .call(Resource::Schedules, Method::POST, "/schedules", request)
            .await?;
        insert_front(&mut self.data.schedules, schedule.clone());
        Ok(schedule)
    }

    pub async fn update_schedule(
        &mut self,
        id: i64,
        request: &UpdateScheduleRequest,
    ) -> Result<Schedule, String> {
        let schedule: Schedule = self
            .call(
                Resource::Schedules,
                Method::PATCH,
                &format!("/schedules/{id}"),
                request,
            )
            .await?;
        replace_by_id(&mut self.data.schedules, schedule.clone());
        Ok(schedule)
    }

    pub async fn delete_schedule(&mut self, id: i64) -> Result<(), String> {
        self.remove(&format!("/schedules/{id}")).await?;
        remove_by_id(&mut self.data.schedules, id);
        Ok(())
    }

    // 讲师申请

    /// 公开提交，不需要登录
    pub async fn submit_application(
        &mut self,
        upload: &Upload,
    ) -> Result<TrainerApplication, String> {
        let application: TrainerApplication = self
            .upload(Resource::Applications, "/applications", upload)
            .await?;
        insert_front(&mut self.data.applications, application.clone());
        Ok(application)
    }

    /// 审批通过后申请离开待审列表，新讲师加入用户列表
    pub async fn approve_application(&mut self, id: i64) -> Result<User, String> {
        let user: User = self
            .action(Resource::Users, &format!("/applications/{id}/approve"))
            .await?;
        remove_by_id(&mut self.data.applications, id);
        insert_front(&mut self.data.users, user.clone());
        Ok(user)
    }

    pub async fn decline_application(&mut self, id: i64) -> Result<TrainerApplication, String> {
        let application: TrainerApplication = self
            .action(Resource::Applications, &format!("/applications/{id}/decline"))
            .await?;
        remove_by_id(&mut self.data.applications, id);
        Ok(application)
    }

    pub async fn delete_application(&mut self, id: i64) -> Result<(), String> {
        self.remove(&format!("/applications/{id}")).await?;
        remove_by_id(&mut self.data.applications, id);
        Ok(())
    }

    // 账单

    pub async fn create_bill(&mut self, request: &CreateBillRequest) -> Result<Bill, String> {
        let bill: Bill = self
            .call(Resource::Bills, Method::POST, "/bills", request)
            .await?;
        insert_front(&mut self.data.bills, bill.clone());
        sort_bills(&mut self.data.bills);
        Ok(bill)
    }

    pub async fn mark_bill_as_paid(&mut self, id: i64) -> Result<Bill, String> {
        let bill: Bill = self
            .action(Resource::Bills, &format!("/bills/{id}/mark_as_paid"))
            .await?;
        replace_by_id(&mut self.data.bills, bill.clone());
        sort_bills(&mut self.data.bills);
        Ok(bill)
    }

    pub async fn delete_bill(&mut self, id: i64) -> Result<(), String> {
        self.remove(&format!("/bills/{id}")).await?;
        remove_by_id(&mut self.data.bills, id);
        Ok(())
    }

    // 测评与作答

    pub async fn create_assessment(
        &mut self,
        request: &CreateAssessmentRequest,
    ) -> Result<Assessment, String> {
        let assessment: Assessment = self
            .call(Resource::Assessments, Method::POST, "/assessments", request)
            .await?;
        insert_front(&mut self.data.assessments, assessment.clone());
        Ok(assessment)
    }

    pub async fn update_assessment(
        &mut self,
        id: i64,
        request: &UpdateAssessmentRequest,
    ) -> Result<Assessment, String> {
        let assessment: Assessment = self
            .call(
                Resource::Assessments,
                Method::PATCH,
                &format!("/assessments/{id}"),
                request,
            )
            .await?;
        replace_by_id(&mut self.data.assessments, assessment.clone());
        Ok(assessment)
    }

    pub async fn delete_assessment(&mut self, id: i64) -> Result<(), String> {
        self.remove(&format!("/assessments/{id}")).await?;
        remove_by_id(&mut self.data.assessments, id);
        Ok(())
    }

    /// 提交后刷新排行榜
    pub async fn submit_attempt(
        &mut self,
        request: &CreateAttemptRequest,
    ) -> Result<StudentAttempt, String> {
        let result = self
            .api
            .send_json(Method::POST, "/attempts", request)
            .await
            .and_then(|mut data| {
                normalize_datetimes(&mut data, &["timestamp"]);
                Ok(serde_json::from_value::<StudentAttempt>(data)?)
            });
        let attempt = self.record(result)?;
        self.refetch_quietly(Resource::Reporting).await;
        Ok(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bills::entities::BillStatus;
    use chrono::NaiveDate;

    fn bill(id: i64, date: (i32, u32, u32)) -> Bill {
        let now = chrono::Utc::now();
        Bill {
            id,
            trainer: 7,
            trainer_name: "Grace Hopper".to_string(),
            invoice_number: format!("INV-{id}"),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            status: BillStatus::Pending,
            expenses: Vec::new(),
            total_amount: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_bills_sorted_newest_first() {
        let mut bills = vec![bill(1, (2025, 1, 3)), bill(2, (2025, 2, 1)), bill(3, (2024, 12, 31))];
        sort_bills(&mut bills);
        let ids: Vec<i64> = bills.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_patch_helpers() {
        let mut bills = vec![bill(1, (2025, 1, 3)), bill(2, (2025, 2, 1))];

        insert_front(&mut bills, bill(3, (2025, 3, 1)));
        assert_eq!(bills[0].id, 3);

        let mut paid = bill(1, (2025, 1, 3));
        paid.status = BillStatus::Paid;
        replace_by_id(&mut bills, paid);
        assert_eq!(bills.len(), 3);
        assert_eq!(bills[2].status, BillStatus::Paid);

        replace_by_id(&mut bills, bill(9, (2025, 1, 1)));
        assert_eq!(bills[0].id, 9);

        remove_by_id(&mut bills, 2);
        assert!(bills.iter().all(|b| b.id != 2));
        remove_by_id(&mut bills, 404);
        assert_eq!(bills.len(), 3);
    }

    #[test]
    fn test_resource_paths_are_unique() {
        let mut paths: Vec<&str> = Resource::ALL.iter().map(|r| r.path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), Resource::ALL.len());
        assert!(!Resource::Reporting.paginated());
    }

    #[test]
    fn test_reporting_attempt_timestamps_normalized() {
        let mut value = serde_json::json!({
            "leaderboard": [],
            "student_attempts": [{"timestamp": "2025-03-01"}]
        });
        Resource::Reporting.normalize(&mut value);
        assert_eq!(
            value["student_attempts"][0]["timestamp"],
            "2025-03-01T00:00:00+00:00"
        );
    }
}
