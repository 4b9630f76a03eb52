use super::entities::{AssessmentQuestion, AssessmentType};
use crate::models::common::PaginationQuery;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct AssessmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub course: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct CreateAssessmentRequest {
    pub title: String,
    pub course: i64,
    pub material: Option<i64>,
    #[serde(rename = "type")]
    pub assessment_type: AssessmentType,
    #[serde(default)]
    pub questions: Vec<AssessmentQuestion>,
    pub max_score: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct UpdateAssessmentRequest {
    pub title: Option<String>,
    pub course: Option<i64>,
    pub material: Option<i64>,
    #[serde(rename = "type")]
    pub assessment_type: Option<AssessmentType>,
    pub questions: Option<Vec<AssessmentQuestion>>,
    pub max_score: Option<i32>,
}

/// 存储层测评查询
#[derive(Debug, Clone, Default)]
pub struct AssessmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_id: Option<i64>,
    /// 仅返回这些 id（学员只能看到分配给自己的测评）
    pub only_ids: Option<Vec<i64>>,
}
