use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "college.ts")]
pub struct College {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub contact_person: String,
    pub contact_email: String,
    pub contact_phone: String,
    /// 在该学院开设过批次的课程
    #[serde(default)]
    pub course_ids: Vec<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
