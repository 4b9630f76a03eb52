use super::entities::MaterialType;
use crate::models::common::PaginationQuery;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct MaterialListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub course: Option<i64>,
    #[serde(rename = "type")]
    pub material_type: Option<MaterialType>,
    pub search: Option<String>,
}

// 资料元数据更新（文件本身不可替换）
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct UpdateMaterialRequest {
    pub title: Option<String>,
    pub course: Option<i64>,
    pub duration_in_minutes: Option<i32>,
}

/// 存储层新建资料，文件已落盘
#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub title: String,
    pub course_id: i64,
    pub material_type: MaterialType,
    pub file_path: String,
    pub original_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub duration_in_minutes: Option<i32>,
    pub uploaded_by: Option<i64>,
}

/// 资料文件位置，用于内容下载
#[derive(Debug, Clone)]
pub struct MaterialFile {
    pub file_path: String,
    pub original_name: String,
    pub content_type: String,
}
