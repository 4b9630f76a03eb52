use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 资料类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export, export_to = "material.ts")]
pub enum MaterialType {
    Pdf,
    Ppt,
    Doc,
    Video,
}

impl MaterialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::Pdf => "PDF",
            MaterialType::Ppt => "PPT",
            MaterialType::Doc => "DOC",
            MaterialType::Video => "VIDEO",
        }
    }

    /// 该类型接受的文件扩展名（小写，不带点）
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            MaterialType::Pdf => &["pdf"],
            MaterialType::Ppt => &["ppt", "pptx"],
            MaterialType::Doc => &["doc", "docx"],
            MaterialType::Video => &["mp4", "webm", "mov", "mkv"],
        }
    }
}

impl std::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MaterialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PDF" => Ok(MaterialType::Pdf),
            "PPT" => Ok(MaterialType::Ppt),
            "DOC" => Ok(MaterialType::Doc),
            "VIDEO" => Ok(MaterialType::Video),
            _ => Err(format!(
                "Invalid material type: '{s}'. Supported types: PDF, PPT, DOC, VIDEO"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct Material {
    pub id: i64,
    pub title: String,
    pub course_id: i64,
    pub course: String,
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    pub original_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub duration_in_minutes: Option<i32>,
    pub uploaded_by: Option<i64>,
    /// 相对 API 根路径的内容地址
    pub content_url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
