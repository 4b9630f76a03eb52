use super::entities::{UserRole, UserStatus};
use crate::models::common::PaginationQuery;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

// 用户创建请求，`name` 为全名
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub expertise: Option<String>,
    pub experience: Option<i32>,
    pub college: Option<String>,
    pub education: Option<String>,
    /// 学员创建时直接加入的批次
    #[serde(default)]
    pub batches: Vec<i64>,
}

// 用户更新请求
#[derive(Debug, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub phone: Option<String>,
    pub expertise: Option<String>,
    pub experience: Option<i32>,
    pub college: Option<String>,
    pub education: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct AssignMaterialsRequest {
    pub material_ids: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct AssignAssessmentsRequest {
    pub assessment_ids: Vec<i64>,
}

// 用户列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

/// 存储层新建用户记录，密码已哈希
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub expertise: Option<String>,
    pub experience: Option<i32>,
    pub college: Option<String>,
    pub education: Option<String>,
    pub resume_path: Option<String>,
    pub must_change_password: bool,
}

/// 存储层用户更新，`None` 表示不修改
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub expertise: Option<String>,
    pub experience: Option<i32>,
    pub college: Option<String>,
    pub education: Option<String>,
}

/// 讲师访问窗口变更
#[derive(Debug, Clone, PartialEq)]
pub struct AccessUpdate {
    pub status: UserStatus,
    pub access_expiry_date: Option<chrono::DateTime<chrono::Utc>>,
    /// 新的临时密码哈希，同时要求首次登录修改
    pub password_hash: Option<String>,
}
