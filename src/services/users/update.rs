use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::ParcError;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::split_full_name,
        requests::{UpdateUserRequest, UserChanges},
    },
};
use crate::utils::validate::{normalize_email, validate_email, validate_phone};

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let mut changes = UserChanges {
        role: update_data.role,
        status: update_data.status,
        expertise: update_data.expertise,
        experience: update_data.experience,
        college: update_data.college,
        education: update_data.education,
        ..Default::default()
    };

    if let Some(name) = update_data.name {
        if name.trim().is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "Name cannot be empty.",
            )));
        }
        let (first_name, last_name) = split_full_name(&name);
        changes.first_name = Some(first_name);
        changes.last_name = Some(last_name);
    }

    if let Some(email) = update_data.email {
        if let Err(msg) = validate_email(email.trim()) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
        changes.email = Some(normalize_email(&email));
    }

    if let Some(phone) = update_data.phone {
        if !phone.trim().is_empty()
            && let Err(msg) = validate_phone(&phone)
        {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
        changes.phone = Some(phone.trim().to_string());
    }

    match storage.update_user(user_id, changes).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            user,
            "User information updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(ParcError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "A user with this email already exists.",
            ),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::UserUpdateFailed,
                format!("User update failed: {e}"),
            )),
        ),
    }
}
