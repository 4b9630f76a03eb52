use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "application.ts")]
pub struct ApplicationListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

/// 申请表单字段（multipart 解析后）
#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience: i32,
    pub tech_stack: String,
    pub expertise_domains: String,
}

/// 存储层新建申请，简历已落盘
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub form: ApplicationForm,
    pub resume_path: String,
}
