use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ApplicationService;
use crate::models::{
    ApiResponse,
    applications::{entities::ApplicationStatus, requests::ApplicationListParams},
};
use crate::services::internal_error;

/// 只列出待审批的申请
pub async fn list_applications(
    service: &ApplicationService,
    query: ApplicationListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_applications_with_pagination(
            Some(ApplicationStatus::Pending),
            Some(query.pagination.page),
            Some(query.pagination.size),
        )
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Application list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve application list", e)),
    }
}
