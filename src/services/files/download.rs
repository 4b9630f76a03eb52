use actix_web::{HttpResponse, Result as ActixResult, http::header};
use tracing::error;

use super::resolve_upload_path;
use crate::models::{ApiResponse, ErrorCode};

/// 读取已上传的文件并返回
///
/// `inline` 为真时浏览器直接打开（资料预览、简历），否则作为附件下载。
pub async fn file_response(
    relative: &str,
    content_type: &str,
    file_name: &str,
    inline: bool,
) -> ActixResult<HttpResponse> {
    let path = resolve_upload_path(relative);

    let data = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "File not found",
            )));
        }
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "File read failed",
                )),
            );
        }
    };

    let disposition = if inline { "inline" } else { "attachment" };
    let file_name = file_name.replace('"', "");

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, content_type.to_string()))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("{disposition}; filename=\"{file_name}\""),
        ))
        .body(data))
}
