use crate::models::common::PaginationQuery;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct ScheduleListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub trainer: Option<i64>,
    pub college: Option<i64>,
    pub course: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct CreateScheduleRequest {
    pub trainer: i64,
    pub college: i64,
    pub course: i64,
    pub batch: Option<i64>,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub materials: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct UpdateScheduleRequest {
    pub trainer: Option<i64>,
    pub college: Option<i64>,
    pub course: Option<i64>,
    /// 缺省表示不修改，`null` 表示解除批次
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub batch: Option<Option<i64>>,
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
    pub materials: Option<Vec<i64>>,
}

/// 存储层排课记录（创建与整体替换共用）
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRecord {
    pub trainer_id: i64,
    pub college_id: i64,
    pub course_id: i64,
    pub batch_id: Option<i64>,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    pub material_ids: Vec<i64>,
}

// 字段出现时（包括 null）包一层 Some，与缺省区分
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_absent_null_and_set_are_distinct() {
        let absent: UpdateScheduleRequest = serde_json::from_str(r#"{"course": 2}"#).unwrap();
        assert_eq!(absent.batch, None);

        let cleared: UpdateScheduleRequest = serde_json::from_str(r#"{"batch": null}"#).unwrap();
        assert_eq!(cleared.batch, Some(None));

        let set: UpdateScheduleRequest = serde_json::from_str(r#"{"batch": 4}"#).unwrap();
        assert_eq!(set.batch, Some(Some(4)));

        let body = serde_json::to_value(&cleared).unwrap();
        assert!(body["batch"].is_null() && body.get("batch").is_some());
        let body = serde_json::to_value(&absent).unwrap();
        assert!(body.get("batch").is_none());
    }
}
