use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::models::{ApiResponse, materials::requests::MaterialListParams};
use crate::services::internal_error;
use crate::storage::ListFilter;

pub async fn list_materials(
    service: &MaterialService,
    query: MaterialListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let filter = ListFilter {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
        course_id: query.course,
        ..Default::default()
    };
    let material_type = query.material_type.map(|t| t.as_str().to_string());

    match storage
        .list_materials_with_pagination(filter, material_type)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Material list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve material list", e)),
    }
}
