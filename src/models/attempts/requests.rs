use crate::models::common::PaginationQuery;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "attempt.ts")]
pub struct AttemptListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub student: Option<i64>,
    pub assessment: Option<i64>,
}

// 提交作答；有 answers 且测评可自动判分时忽略 score
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "attempt.ts")]
pub struct CreateAttemptRequest {
    pub assessment: i64,
    pub score: Option<i32>,
    pub answers: Option<Vec<Option<usize>>>,
}

/// 存储层作答记录
#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub student_id: i64,
    pub assessment_id: i64,
    pub score: i32,
    pub answers: Option<Vec<Option<usize>>>,
}

/// 存储层作答查询
#[derive(Debug, Clone, Default)]
pub struct AttemptListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub assessment_id: Option<i64>,
}
