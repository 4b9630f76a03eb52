use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::materials::entities::Material;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseModule {
    pub id: i64,
    pub course_id: i64,
    pub module_number: i32,
    pub title: String,
    pub material_ids: Vec<i64>,
    /// 按 material_ids 顺序展开的资料
    #[serde(default)]
    pub materials: Vec<Material>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub cover_photo: Option<String>,
    /// 按 module_number 升序
    #[serde(default)]
    pub modules: Vec<CourseModule>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
