use crate::models::attempts::entities::StudentAttempt;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "reporting.ts")]
pub struct LeaderboardEntry {
    pub student_id: i64,
    pub student_name: String,
    pub total_score: i64,
    pub attempts: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "reporting.ts")]
pub struct ReportingResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
    /// 最近 10 条作答
    pub student_attempts: Vec<StudentAttempt>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "reporting.ts")]
pub struct OverviewResponse {
    pub admins: i64,
    pub trainers: i64,
    pub students: i64,
    pub employees: i64,
    pub colleges: i64,
    pub courses: i64,
    pub batches: i64,
    pub materials: i64,
    pub pending_applications: i64,
    pub unpaid_bills: i64,
}
