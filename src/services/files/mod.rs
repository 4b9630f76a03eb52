//! 上传文件的落盘与读取
//!
//! 文件保存在 `upload.dir` 下的子目录中，数据库只记录相对路径。

pub mod download;
pub mod upload;

pub use download::file_response;
pub use upload::{FileContent, FileSink, UploadError, UploadForm, UploadedFile, read_upload_form};

use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::AppConfig;
use crate::errors::Result;

/// 相对路径转为磁盘路径
pub fn resolve_upload_path(relative: &str) -> PathBuf {
    Path::new(&AppConfig::get().upload.dir).join(relative)
}

/// 生成新的相对路径：`{subdir}/{timestamp}-{uuid}.{ext}`
pub fn new_relative_path(subdir: &str, extension: &str) -> String {
    format!(
        "{subdir}/{}-{}.{extension}",
        chrono::Utc::now().timestamp(),
        uuid::Uuid::new_v4()
    )
}

/// 删除上传文件，文件不存在时忽略
pub async fn remove_upload(relative: &str) {
    let path = resolve_upload_path(relative);
    if let Err(e) = tokio::fs::remove_file(&path).await
        && e.kind() != std::io::ErrorKind::NotFound
    {
        warn!("Failed to remove upload {}: {}", path.display(), e);
    }
}

/// 复制上传文件到另一个子目录，返回新的相对路径
pub async fn copy_upload(relative: &str, subdir: &str) -> Result<String> {
    let extension = Path::new(relative)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("bin");
    let target = new_relative_path(subdir, extension);
    let target_path = resolve_upload_path(&target);
    if let Some(parent) = target_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::copy(resolve_upload_path(relative), &target_path).await?;
    Ok(target)
}
