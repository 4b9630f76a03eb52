use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use tracing::info;

use super::{BatchService, check_references, validate_date_range};
use crate::models::{
    ApiResponse, ErrorCode,
    batches::{requests::CreateBatchRequest, responses::BatchRosterResponse},
    users::{entities::UserRole, responses::ImportRowError},
};
use crate::services::files::UploadForm;
use crate::services::mail::Mailer;
use crate::services::users::import::{provision_roster, read_roster};
use crate::services::{internal_error, mailer_from_request};
use crate::storage::Storage;
use crate::utils::roster::RosterRow;

/// 名单处理后可加入批次的学员
struct Enrollment {
    student_ids: Vec<i64>,
    created: usize,
    errors: Vec<ImportRowError>,
}

/// 开通缺失的学员账号；已存在但不是学员的邮箱记为行错误
async fn resolve_roster(
    storage: &dyn Storage,
    mailer: &dyn Mailer,
    rows: Vec<RosterRow>,
    college_name: String,
) -> crate::errors::Result<Enrollment> {
    let outcome = provision_roster(storage, mailer, rows, Some(college_name)).await?;

    let mut errors = outcome.errors;
    let mut student_ids: Vec<i64> = outcome.created.iter().map(|user| user.id).collect();
    for (row, user) in outcome.existing {
        if user.role == UserRole::Student {
            student_ids.push(user.id);
        } else {
            errors.push(ImportRowError {
                row,
                email: Some(user.email),
                reason: format!("User exists with role {} and cannot be enrolled.", user.role),
            });
        }
    }
    errors.sort_by_key(|error| error.row);

    Ok(Enrollment {
        student_ids,
        created: outcome.created.len(),
        errors,
    })
}

fn parse_date(form: &UploadForm, name: &str) -> Result<NaiveDate, HttpResponse> {
    form.text(name)
        .and_then(|value| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
        .ok_or_else(|| {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                format!("{name} must be a date in YYYY-MM-DD format."),
            ))
        })
}

/// 从表单字段构造批次，学员稍后补充
fn batch_from_form(form: &UploadForm) -> Result<CreateBatchRequest, HttpResponse> {
    let invalid = |message: &'static str| {
        HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, message))
    };

    let name = form
        .text("name")
        .ok_or_else(|| invalid("Batch name is required."))?;
    let course = form
        .parse::<i64>("course")
        .ok_or_else(|| invalid("A valid course is required."))?;
    let college = form
        .parse::<i64>("college")
        .ok_or_else(|| invalid("A valid college is required."))?;
    let start_date = parse_date(form, "start_date")?;
    let end_date = parse_date(form, "end_date")?;
    validate_date_range(start_date, end_date)?;

    Ok(CreateBatchRequest {
        name: name.to_string(),
        course,
        college,
        start_date,
        end_date,
        student_ids: Vec::new(),
    })
}

pub async fn create_with_students(
    service: &BatchService,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let mailer = mailer_from_request(request);

    let (form, rows) = match read_roster(&mut payload).await {
        Ok(parsed) => parsed,
        Err(response) => return Ok(response),
    };
    let mut batch_request = match batch_from_form(&form) {
        Ok(batch) => batch,
        Err(response) => return Ok(response),
    };
    let college = match check_references(
        storage.as_ref(),
        Some(batch_request.course),
        Some(batch_request.college),
    )
    .await
    {
        Ok(Some(college)) => college,
        Ok(None) => return Ok(internal_error("Batch creation failed", "college missing")),
        Err(response) => return Ok(response),
    };

    let enrollment =
        match resolve_roster(storage.as_ref(), mailer.as_ref(), rows, college.name).await {
            Ok(enrollment) => enrollment,
            Err(e) => return Ok(internal_error("Roster import failed", e)),
        };
    batch_request.student_ids = enrollment.student_ids.clone();

    let batch = match storage.create_batch(batch_request).await {
        Ok(batch) => batch,
        Err(e) => return Ok(internal_error("Batch creation failed", e)),
    };

    info!(
        "Created batch {} with {} students ({} new)",
        batch.id, batch.student_count, enrollment.created
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        BatchRosterResponse {
            enrolled_students: enrollment.student_ids.len(),
            created_students: enrollment.created,
            errors: enrollment.errors,
            batch,
        },
        "Batch created successfully",
    )))
}

pub async fn add_students_from_file(
    service: &BatchService,
    batch_id: i64,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let mailer = mailer_from_request(request);

    let batch = match storage.get_batch_by_id(batch_id).await {
        Ok(Some(batch)) => batch,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::BatchNotFound,
                "Batch not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to add students", e)),
    };

    let (_, rows) = match read_roster(&mut payload).await {
        Ok(parsed) => parsed,
        Err(response) => return Ok(response),
    };

    let enrollment = match resolve_roster(
        storage.as_ref(),
        mailer.as_ref(),
        rows,
        batch.college_name.clone(),
    )
    .await
    {
        Ok(enrollment) => enrollment,
        Err(e) => return Ok(internal_error("Roster import failed", e)),
    };

    let enrolled = match storage
        .add_batch_students(batch_id, &enrollment.student_ids)
        .await
    {
        Ok(added) => added as usize,
        Err(e) => return Ok(internal_error("Failed to add students", e)),
    };

    let batch = match storage.get_batch_by_id(batch_id).await {
        Ok(Some(batch)) => batch,
        Ok(None) => batch,
        Err(e) => return Ok(internal_error("Failed to add students", e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        BatchRosterResponse {
            batch,
            created_students: enrollment.created,
            enrolled_students: enrolled,
            errors: enrollment.errors,
        },
        "Students added successfully",
    )))
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
    fn test_batch_from_form() {
        let batch = batch_from_form(&form(&[
            ("name", "Spring 2025"),
            ("course", "2"),
            ("college", "5"),
            ("start_date", "2025-03-01"),
            ("end_date", "2025-06-30"),
        ]))
        .unwrap();
        assert_eq!(batch.name, "Spring 2025");
        assert_eq!(batch.course, 2);
        assert_eq!(batch.college, 5);
        assert!(batch.student_ids.is_empty());
    }

    #[test]
    fn test_batch_from_form_rejects_bad_dates() {
        let reversed = form(&[
            ("name", "Spring"),
            ("course", "2"),
            ("college", "5"),
            ("start_date", "2025-06-30"),
            ("end_date", "2025-03-01"),
        ]);
        assert!(batch_from_form(&reversed).is_err());

        let malformed = form(&[
            ("name", "Spring"),
            ("course", "2"),
            ("college", "5"),
            ("start_date", "03/01/2025"),
            ("end_date", "2025-06-30"),
        ]);
        assert!(batch_from_form(&malformed).is_err());
    }
}
