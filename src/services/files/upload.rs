use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures_util::StreamExt;
use std::collections::HashMap;
use tokio::io::AsyncWriteExt;

use super::{new_relative_path, remove_upload, resolve_upload_path};
use crate::errors::ParcError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::file_magic::{file_extension, validate_magic_bytes};

/// 魔术字节校验需要的文件头长度
const HEAD_LEN: usize = 16;
/// 普通文本字段的长度上限
const MAX_TEXT_FIELD: usize = 64 * 1024;
/// 单个表单的文本字段数上限
const MAX_TEXT_FIELDS: usize = 32;

/// 文件保存方式
#[derive(Debug, Clone, Copy)]
pub enum FileSink<'a> {
    /// 保存在内存（名单等小文件）
    Memory,
    /// 写入 `upload.dir/<subdir>`
    Disk(&'a str),
}

#[derive(Debug)]
pub enum FileContent {
    Memory(Vec<u8>),
    /// 相对 `upload.dir` 的路径
    Stored(String),
}

#[derive(Debug)]
pub struct UploadedFile {
    pub original_name: String,
    pub content_type: String,
    pub extension: String,
    pub size: usize,
    pub content: FileContent,
}

impl UploadedFile {
    pub fn stored_path(&self) -> Option<&str> {
        match &self.content {
            FileContent::Stored(path) => Some(path),
            FileContent::Memory(_) => None,
        }
    }

    /// 丢弃已落盘的文件（校验失败或数据库写入失败时）
    pub async fn discard(&self) {
        if let Some(path) = self.stored_path() {
            remove_upload(path).await;
        }
    }
}

/// multipart 表单：文本字段加至多一个文件
#[derive(Debug, Default)]
pub struct UploadForm {
    pub fields: HashMap<String, String>,
    pub file: Option<UploadedFile>,
}

impl UploadForm {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn parse<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        self.text(name).and_then(|value| value.parse().ok())
    }
}

#[derive(Debug)]
pub enum UploadError {
    Malformed(String),
    MultipleFiles,
    TypeNotAllowed,
    ContentMismatch,
    TooLarge(usize),
    Io(ParcError),
}

impl UploadError {
    pub fn into_response(self) -> HttpResponse {
        match self {
            UploadError::Malformed(reason) => HttpResponse::BadRequest().json(
                ApiResponse::error_empty(ErrorCode::FileUploadFailed, reason),
            ),
            UploadError::MultipleFiles => HttpResponse::BadRequest().json(
                ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    "Only one file can be uploaded at a time",
                ),
            ),
            UploadError::TypeNotAllowed => HttpResponse::BadRequest().json(
                ApiResponse::error_empty(ErrorCode::FileTypeNotAllowed, "File type not allowed"),
            ),
            UploadError::ContentMismatch => HttpResponse::BadRequest().json(
                ApiResponse::error_empty(
                    ErrorCode::FileTypeNotAllowed,
                    "File content does not match its extension",
                ),
            ),
            UploadError::TooLarge(limit) => HttpResponse::PayloadTooLarge().json(
                ApiResponse::error_empty(
                    ErrorCode::FileSizeExceeded,
                    format!("File size exceeds the limit of {limit} bytes"),
                ),
            ),
            UploadError::Io(e) => {
                tracing::error!("{}", e);
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    "Failed to store uploaded file",
                ))
            }
        }
    }
}

impl From<std::io::Error> for UploadError {
    fn from(err: std::io::Error) -> Self {
        UploadError::Io(err.into())
    }
}

/// 读取 multipart 表单
///
/// `file_field` 之外的字段按文本处理。文件扩展名必须在 `allowed_extensions` 中，
/// 文件头需与扩展名一致，超过 `max_size` 立即中止并清理已写入的部分。
pub async fn read_upload_form(
    payload: &mut Multipart,
    file_field: &str,
    allowed_extensions: &[&str],
    max_size: usize,
    sink: FileSink<'_>,
) -> Result<UploadForm, UploadError> {
    let mut form = UploadForm::default();
    let result = read_fields(
        payload,
        &mut form,
        file_field,
        allowed_extensions,
        max_size,
        sink,
    )
    .await;

    match result {
        Ok(()) => Ok(form),
        Err(e) => {
            if let Some(file) = &form.file {
                file.discard().await;
            }
            Err(e)
        }
    }
}

async fn read_fields(
    payload: &mut Multipart,
    form: &mut UploadForm,
    file_field: &str,
    allowed_extensions: &[&str],
    max_size: usize,
    sink: FileSink<'_>,
) -> Result<(), UploadError> {
    let mut text_fields = 0usize;
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| UploadError::Malformed(format!("{e}")))?;
        let name = field.name().unwrap_or_default().to_string();

        if name != file_field {
            text_fields += 1;
            if text_fields > MAX_TEXT_FIELDS {
                return Err(UploadError::Malformed("Too many form fields".to_string()));
            }
            let mut value = Vec::new();
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| UploadError::Malformed(format!("{e}")))?;
                if value.len() + data.len() > MAX_TEXT_FIELD {
                    return Err(UploadError::Malformed(format!("Field '{name}' is too long")));
                }
                value.extend_from_slice(&data);
            }
            let value = String::from_utf8(value)
                .map_err(|_| UploadError::Malformed(format!("Field '{name}' is not UTF-8")))?;
            form.fields.insert(name, value);
            continue;
        }

        if form.file.is_some() {
            return Err(UploadError::MultipleFiles);
        }

        let original_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();
        let extension = file_extension(&original_name)
            .filter(|ext| allowed_extensions.contains(&ext.as_str()))
            .ok_or(UploadError::TypeNotAllowed)?;
        let content_type = field
            .content_type()
            .map(|ct| ct.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let mut head = Vec::with_capacity(HEAD_LEN);
        let mut size = 0usize;

        let content = match sink {
            FileSink::Memory => {
                let mut buffer = Vec::new();
                while let Some(chunk) = field.next().await {
                    let data = chunk.map_err(|e| UploadError::Malformed(format!("{e}")))?;
                    size += data.len();
                    if size > max_size {
                        return Err(UploadError::TooLarge(max_size));
                    }
                    buffer.extend_from_slice(&data);
                }
                head.extend_from_slice(&buffer[..buffer.len().min(HEAD_LEN)]);
                FileContent::Memory(buffer)
            }
            FileSink::Disk(subdir) => {
                let relative = new_relative_path(subdir, &extension);
                let path = resolve_upload_path(&relative);
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                let mut file = tokio::fs::File::create(&path).await?;

                while let Some(chunk) = field.next().await {
                    let data = match chunk {
                        Ok(data) => data,
                        Err(e) => {
                            remove_upload(&relative).await;
                            return Err(UploadError::Malformed(format!("{e}")));
                        }
                    };
                    size += data.len();
                    if size > max_size {
                        remove_upload(&relative).await;
                        return Err(UploadError::TooLarge(max_size));
                    }
                    if head.len() < HEAD_LEN {
                        let take = (HEAD_LEN - head.len()).min(data.len());
                        head.extend_from_slice(&data[..take]);
                    }
                    if let Err(e) = file.write_all(&data).await {
                        remove_upload(&relative).await;
                        return Err(e.into());
                    }
                }
                if let Err(e) = file.flush().await {
                    remove_upload(&relative).await;
                    return Err(e.into());
                }
                FileContent::Stored(relative)
            }
        };

        let uploaded = UploadedFile {
            original_name,
            content_type,
            extension,
            size,
            content,
        };

        if !validate_magic_bytes(&head, &uploaded.extension) {
            uploaded.discard().await;
            return Err(UploadError::ContentMismatch);
        }

        form.file = Some(uploaded);
    }

    Ok(())
}
