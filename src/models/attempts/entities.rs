use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "attempt.ts")]
pub struct StudentAttempt {
    pub id: i64,
    pub student: i64,
    pub student_name: String,
    pub assessment: i64,
    pub assessment_title: String,
    pub score: i32,
    #[serde(default)]
    pub answers: Option<Vec<Option<usize>>>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
