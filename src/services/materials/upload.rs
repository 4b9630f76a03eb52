use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MaterialService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    materials::{entities::MaterialType, requests::NewMaterial},
};
use crate::services::files::{FileSink, UploadForm, UploadedFile, read_upload_form};
use crate::services::{current_user, internal_error};

/// 所有资料类型接受的扩展名
const ALL_MATERIAL_EXTENSIONS: &[&str] = &[
    "pdf", "ppt", "pptx", "doc", "docx", "mp4", "webm", "mov", "mkv",
];

fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

/// 校验表单字段，成功时返回待写入的资料记录
fn build_material(
    form: &UploadForm,
    file: &UploadedFile,
    uploaded_by: i64,
) -> Result<NewMaterial, HttpResponse> {
    let title = form
        .text("title")
        .ok_or_else(|| bad_request(ErrorCode::ValidationFailed, "Title is required."))?;
    let course_id: i64 = form
        .parse("course")
        .ok_or_else(|| bad_request(ErrorCode::ValidationFailed, "A valid course is required."))?;
    let material_type: MaterialType = form
        .text("type")
        .ok_or_else(|| bad_request(ErrorCode::ValidationFailed, "Material type is required."))?
        .parse()
        .map_err(|e: String| bad_request(ErrorCode::ValidationFailed, e))?;

    let duration_in_minutes = match form.text("duration_in_minutes") {
        Some(value) => Some(value.parse::<i32>().ok().filter(|d| *d >= 0).ok_or_else(|| {
            bad_request(
                ErrorCode::ValidationFailed,
                "Duration must be a non-negative number of minutes.",
            )
        })?),
        None => None,
    };

    if !material_type
        .allowed_extensions()
        .contains(&file.extension.as_str())
    {
        return Err(bad_request(
            ErrorCode::MaterialFileInvalid,
            format!(
                "File type .{} does not match material type {}.",
                file.extension, material_type
            ),
        ));
    }

    let file_path = file
        .stored_path()
        .map(str::to_string)
        .ok_or_else(|| internal_error("Material upload failed", "file was not stored"))?;

    Ok(NewMaterial {
        title: title.to_string(),
        course_id,
        material_type,
        file_path,
        original_name: file.original_name.clone(),
        content_type: file.content_type.clone(),
        file_size: file.size as i64,
        duration_in_minutes,
        uploaded_by: Some(uploaded_by),
    })
}

pub async fn upload_material(
    service: &MaterialService,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let uploader = current_user(request)?;
    let storage = service.get_storage(request)?;

    let max_size = AppConfig::get().upload.max_size;
    let mut form = match read_upload_form(
        &mut payload,
        "file",
        ALL_MATERIAL_EXTENSIONS,
        max_size,
        FileSink::Disk("materials"),
    )
    .await
    {
        Ok(form) => form,
        Err(e) => return Ok(e.into_response()),
    };

    let Some(file) = form.file.take() else {
        return Ok(bad_request(
            ErrorCode::MaterialFileMissing,
            "A material file is required.",
        ));
    };

    let material = match build_material(&form, &file, uploader.id) {
        Ok(material) => material,
        Err(response) => {
            file.discard().await;
            return Ok(response);
        }
    };

    match storage.get_course_by_id(material.course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            file.discard().await;
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            file.discard().await;
            return Ok(internal_error("Material upload failed", e));
        }
    }

    match storage.create_material(material).await {
        Ok(material) => {
            info!(
                "Material {} uploaded by user {} ({} bytes)",
                material.id, uploader.id, material.file_size
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                material,
                "Material uploaded successfully",
            )))
        }
        Err(e) => {
            file.discard().await;
            Ok(internal_error("Material upload failed", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::files::FileContent;

    fn stored_pdf() -> UploadedFile {
        UploadedFile {
            original_name: "intro.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            extension: "pdf".to_string(),
            size: 1024,
            content: FileContent::Stored("materials/1-intro.pdf".to_string()),
        }
    }

    fn form(fields: &[(&str, &str)]) -> UploadForm {
        UploadForm {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            file: None,
        }
    }

    #[test]
    fn test_build_material_from_form() {
        let form = form(&[
            ("title", " Intro "),
            ("course", "3"),
            ("type", "pdf"),
            ("duration_in_minutes", "45"),
        ]);
        let material = build_material(&form, &stored_pdf(), 7).unwrap();
        assert_eq!(material.title, "Intro");
        assert_eq!(material.course_id, 3);
        assert_eq!(material.material_type, MaterialType::Pdf);
        assert_eq!(material.duration_in_minutes, Some(45));
        assert_eq!(material.uploaded_by, Some(7));
        assert_eq!(material.file_path, "materials/1-intro.pdf");
    }

    #[test]
    fn test_extension_must_match_declared_type() {
        let form = form(&[("title", "Intro"), ("course", "3"), ("type", "VIDEO")]);
        let response = build_material(&form, &stored_pdf(), 7).unwrap_err();
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        assert!(build_material(&form(&[("course", "3"), ("type", "PDF")]), &stored_pdf(), 1).is_err());
        assert!(build_material(&form(&[("title", "x"), ("type", "PDF")]), &stored_pdf(), 1).is_err());
        assert!(
            build_material(
                &form(&[("title", "x"), ("course", "1"), ("type", "PDF"), ("duration_in_minutes", "-5")]),
                &stored_pdf(),
                1
            )
            .is_err()
        );
    }
}
