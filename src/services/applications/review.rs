use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{ApplicationService, application_not_found};
use crate::errors::ParcError;
use crate::models::{
    ApiResponse, ErrorCode,
    applications::entities::{ApplicationStatus, TrainerApplication},
    users::entities::UserRole,
};
use crate::services::files::copy_upload;
use crate::services::mail::{deliver, templates};
use crate::services::users::{NewAccount, provision_account};
use crate::services::{internal_error, mailer_from_request};

fn already_processed(application: &TrainerApplication) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ApplicationAlreadyProcessed,
        format!(
            "Application has already been {}.",
            application.status.as_str().to_lowercase()
        ),
    ))
}

fn user_exists() -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::UserAlreadyExists,
        "A user with this email already exists.",
    ))
}

/// 审批通过：创建停用状态的讲师并复制简历
pub async fn approve_application(
    service: &ApplicationService,
    application_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let mailer = mailer_from_request(request);

    let application = match storage.get_application_by_id(application_id).await {
        Ok(Some(application)) => application,
        Ok(None) => return Ok(application_not_found()),
        Err(e) => return Ok(internal_error("Application approval failed", e)),
    };
    if application.status != ApplicationStatus::Pending {
        return Ok(already_processed(&application));
    }

    match storage.get_user_by_email(&application.email).await {
        Ok(None) => {}
        Ok(Some(_)) => return Ok(user_exists()),
        Err(e) => return Ok(internal_error("Application approval failed", e)),
    }

    let account = NewAccount {
        name: application.name.clone(),
        email: application.email.clone(),
        role: UserRole::Trainer,
        phone: Some(application.phone.clone()).filter(|p| !p.is_empty()),
        expertise: Some(application.expertise_domains.clone()).filter(|e| !e.is_empty()),
        experience: Some(application.experience),
        college: None,
        education: None,
    };
    let trainer = match provision_account(storage.as_ref(), mailer.as_ref(), account).await {
        Ok(trainer) => trainer,
        Err(ParcError::Conflict(_)) => return Ok(user_exists()),
        Err(e) => return Ok(internal_error("Application approval failed", e)),
    };

    // 简历复制失败不影响审批
    match storage.get_application_resume_path(application_id).await {
        Ok(Some(path)) => match copy_upload(&path, "resumes").await {
            Ok(copied) => {
                if let Err(e) = storage.set_user_resume(trainer.id, &copied).await {
                    warn!("Failed to attach resume to trainer {}: {}", trainer.id, e);
                }
            }
            Err(e) => warn!("Failed to copy resume of application {}: {}", application_id, e),
        },
        Ok(None) => {}
        Err(e) => warn!("Failed to load resume of application {}: {}", application_id, e),
    }

    if let Err(e) = storage
        .update_application_status(application_id, ApplicationStatus::Approved)
        .await
    {
        return Ok(internal_error("Application approval failed", e));
    }

    deliver(
        mailer.as_ref(),
        templates::application_approved(&trainer.first_name, &trainer.email),
    )
    .await;
    info!(
        "Application {} approved, trainer {} created",
        application_id, trainer.id
    );

    let trainer = storage
        .get_user_by_id(trainer.id)
        .await
        .ok()
        .flatten()
        .unwrap_or(trainer);

    Ok(HttpResponse::Created().json(ApiResponse::success(
        trainer,
        "Application approved successfully",
    )))
}

pub async fn decline_application(
    service: &ApplicationService,
    application_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_application_by_id(application_id).await {
        Ok(Some(application)) if application.status != ApplicationStatus::Pending => {
            return Ok(already_processed(&application));
        }
        Ok(Some(_)) => {}
        Ok(None) => return Ok(application_not_found()),
        Err(e) => return Ok(internal_error("Application decline failed", e)),
    }

    match storage
        .update_application_status(application_id, ApplicationStatus::Declined)
        .await
    {
        Ok(Some(application)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            application,
            "Application declined",
        ))),
        Ok(None) => Ok(application_not_found()),
        Err(e) => Ok(internal_error("Application decline failed", e)),
    }
}
