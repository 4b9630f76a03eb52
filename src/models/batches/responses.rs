use super::entities::Batch;
use crate::models::users::responses::ImportRowError;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 名单导入后的批次
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "batch.ts")]
pub struct BatchRosterResponse {
    pub batch: Batch,
    pub created_students: usize,
    pub enrolled_students: usize,
    pub errors: Vec<ImportRowError>,
}
