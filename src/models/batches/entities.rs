use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "batch.ts")]
pub struct Batch {
    pub id: i64,
    pub name: String,
    pub course_id: i64,
    pub course_name: String,
    pub college_id: i64,
    pub college_name: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub student_ids: Vec<i64>,
    pub student_count: usize,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
