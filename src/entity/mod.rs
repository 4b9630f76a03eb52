//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

use chrono::{DateTime, Utc};

pub mod prelude;

pub mod assessments;
pub mod batch_students;
pub mod batches;
pub mod bills;
pub mod colleges;
pub mod course_modules;
pub mod courses;
pub mod expenses;
pub mod materials;
pub mod schedules;
pub mod student_attempts;
pub mod trainer_applications;
pub mod users;

/// 秒级时间戳转 UTC 时间
pub(crate) fn to_utc(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

/// 解析 JSON 文本存储的 id 列表，损坏的数据视为空列表
pub(crate) fn parse_id_list(raw: &str) -> Vec<i64> {
    serde_json::from_str(raw).unwrap_or_default()
}

pub(crate) fn encode_id_list(ids: &[i64]) -> String {
    serde_json::to_string(ids).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_list_roundtrip_tolerates_garbage() {
        assert_eq!(parse_id_list(&encode_id_list(&[3, 1, 2])), vec![3, 1, 2]);
        assert!(parse_id_list("not json").is_empty());
        assert_eq!(to_utc(0).timestamp(), 0);
    }
}
