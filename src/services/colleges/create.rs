use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CollegeService, validate_contact};
use crate::errors::ParcError;
use crate::models::{ApiResponse, ErrorCode, colleges::requests::CreateCollegeRequest};
use crate::services::internal_error;
use crate::utils::validate::normalize_email;

pub async fn create_college(
    service: &CollegeService,
    mut body: CreateCollegeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    body.name = body.name.trim().to_string();
    if body.name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "College name is required.",
        )));
    }
    if let Err(msg) = validate_contact(Some(&body.contact_email), Some(&body.contact_phone)) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    if !body.contact_email.trim().is_empty() {
        body.contact_email = normalize_email(&body.contact_email);
    }

    let storage = service.get_storage(request)?;

    match storage.create_college(body).await {
        Ok(college) => Ok(HttpResponse::Created().json(ApiResponse::success(
            college,
            "College created successfully",
        ))),
        Err(ParcError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::CollegeAlreadyExists,
                "A college with this name already exists.",
            ),
        )),
        Err(e) => Ok(internal_error("College creation failed", e)),
    }
}
