use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::materials::entities::Material;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct Schedule {
    pub id: i64,
    pub trainer: i64,
    pub trainer_name: String,
    pub college: i64,
    pub college_name: String,
    pub course: i64,
    pub course_name: String,
    pub batch: Option<i64>,
    pub batch_name: Option<String>,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    /// 资料 id 列表
    pub materials: Vec<i64>,
    #[serde(default)]
    pub material_details: Vec<Material>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
