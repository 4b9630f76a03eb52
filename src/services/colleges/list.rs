use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CollegeService;
use crate::models::{ApiResponse, colleges::requests::CollegeListParams};
use crate::services::internal_error;
use crate::storage::ListFilter;

pub async fn list_colleges(
    service: &CollegeService,
    query: CollegeListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let filter = ListFilter {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
        ..Default::default()
    };

    match storage.list_colleges_with_pagination(filter).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "College list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve college list", e)),
    }
}
