use super::entities::User;
use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户列表响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserListResponse {
    pub items: Vec<User>,
    pub pagination: PaginationInfo,
}

// 导入失败的行
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct ImportRowError {
    pub row: usize,
    pub email: Option<String>,
    pub reason: String,
}

// 批量导入学员结果
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct BulkCreateStudentsResponse {
    pub created: Vec<User>,
    pub skipped: Vec<String>,
    pub errors: Vec<ImportRowError>,
}
