use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ApplicationService;
use crate::config::AppConfig;
use crate::errors::ParcError;
use crate::models::{
    ApiResponse, ErrorCode,
    applications::requests::{ApplicationForm, NewApplication},
};
use crate::services::files::{FileSink, UploadForm, read_upload_form};
use crate::services::internal_error;
use crate::utils::validate::{normalize_email, validate_email, validate_phone};

fn application_exists() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::ApplicationAlreadyExists,
        "An application with this email already exists.",
    ))
}

/// 从表单字段构造申请，返回第一条校验错误
fn parse_form(form: &UploadForm) -> Result<ApplicationForm, String> {
    let required = |name: &str| {
        form.text(name)
            .map(str::to_string)
            .ok_or_else(|| format!("{name} is required."))
    };

    let name = required("name")?;
    let email = required("email")?;
    validate_email(&email)?;
    let phone = required("phone")?;
    validate_phone(&phone)?;
    let experience = form
        .parse::<i32>("experience")
        .filter(|years| *years >= 0)
        .ok_or("experience must be a non-negative number of years.")?;

    Ok(ApplicationForm {
        name,
        email: normalize_email(&email),
        phone,
        experience,
        tech_stack: form.text("tech_stack").unwrap_or_default().to_string(),
        expertise_domains: form
            .text("expertise_domains")
            .unwrap_or_default()
            .to_string(),
    })
}

pub async fn submit_application(
    service: &ApplicationService,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let max_size = AppConfig::get().upload.max_size;
    let mut form = match read_upload_form(
        &mut payload,
        "resume",
        &["pdf"],
        max_size,
        FileSink::Disk("applications"),
    )
    .await
    {
        Ok(form) => form,
        Err(e) => return Ok(e.into_response()),
    };

    let Some(resume) = form.file.take() else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "A PDF resume is required.",
        )));
    };

    let application_form = match parse_form(&form) {
        Ok(application_form) => application_form,
        Err(msg) => {
            resume.discard().await;
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    };

    match storage
        .get_application_by_email(&application_form.email)
        .await
    {
        Ok(None) => {}
        Ok(Some(_)) => {
            resume.discard().await;
            return Ok(application_exists());
        }
        Err(e) => {
            resume.discard().await;
            return Ok(internal_error("Application submission failed", e));
        }
    }

    let Some(resume_path) = resume.stored_path().map(str::to_string) else {
        return Ok(internal_error(
            "Application submission failed",
            "resume was not stored",
        ));
    };

    match storage
        .create_application(NewApplication {
            form: application_form,
            resume_path,
        })
        .await
    {
        Ok(application) => {
            info!("Trainer application {} submitted", application.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                application,
                "Application submitted successfully",
            )))
        }
        Err(ParcError::Conflict(_)) => {
            resume.discard().await;
            Ok(application_exists())
        }
        Err(e) => {
            resume.discard().await;
            Ok(internal_error("Application submission failed", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_parse_form() {
        let parsed = parse_form(&form(&[
            ("name", "Grace Hopper"),
            ("email", "Grace@Navy.mil"),
            ("phone", "+1 555 010 0199"),
            ("experience", "12"),
            ("tech_stack", "COBOL"),
        ]))
        .unwrap();
        assert_eq!(parsed.email, "grace@navy.mil");
        assert_eq!(parsed.experience, 12);
        assert_eq!(parsed.expertise_domains, "");
    }

    #[test]
    fn test_parse_form_errors() {
        let missing_phone = form(&[
            ("name", "Grace"),
            ("email", "grace@navy.mil"),
            ("experience", "1"),
        ]);
        assert_eq!(parse_form(&missing_phone).unwrap_err(), "phone is required.");

        let bad_experience = form(&[
            ("name", "Grace"),
            ("email", "grace@navy.mil"),
            ("phone", "5550100199"),
            ("experience", "-2"),
        ]);
        assert!(parse_form(&bad_experience).is_err());
    }
}
