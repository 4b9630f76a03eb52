use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CollegeService, validate_contact};
use crate::errors::ParcError;
use crate::models::{ApiResponse, ErrorCode, colleges::requests::UpdateCollegeRequest};
use crate::services::internal_error;
use crate::utils::validate::normalize_email;

pub async fn update_college(
    service: &CollegeService,
    college_id: i64,
    mut body: UpdateCollegeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(name) = &body.name
        && name.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "College name cannot be empty.",
        )));
    }
    if let Err(msg) = validate_contact(body.contact_email.as_deref(), body.contact_phone.as_deref())
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    body.name = body.name.map(|name| name.trim().to_string());
    body.contact_email = body
        .contact_email
        .map(|email| normalize_email(&email));

    let storage = service.get_storage(request)?;

    match storage.update_college(college_id, body).await {
        Ok(Some(college)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            college,
            "College updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CollegeNotFound,
            "College not found",
        ))),
        Err(ParcError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::CollegeAlreadyExists,
                "A college with this name already exists.",
            ),
        )),
        Err(e) => Ok(internal_error("College update failed", e)),
    }
}
