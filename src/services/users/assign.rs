use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::BTreeSet;

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::{User, UserRole},
        requests::{AssignAssessmentsRequest, AssignMaterialsRequest},
    },
};
use crate::services::internal_error;
use crate::storage::Storage;

/// 取出学员，不存在或不是学员时返回对应的错误响应
async fn load_student(
    storage: &dyn Storage,
    user_id: i64,
    what: &str,
) -> Result<User, HttpResponse> {
    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) if user.role == UserRole::Student => Ok(user),
        Ok(Some(_)) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserRoleMismatch,
            format!("Can only assign {what} to students."),
        ))),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Err(internal_error("Failed to load user", e)),
    }
}

fn unique(ids: &[i64]) -> Vec<i64> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

/// 替换学员的资料分配，所有 id 必须存在
pub async fn assign_materials(
    service: &UserService,
    user_id: i64,
    body: AssignMaterialsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(response) = load_student(storage.as_ref(), user_id, "materials").await {
        return Ok(response);
    }

    let material_ids = unique(&body.material_ids);
    match storage.list_materials_by_ids(&material_ids).await {
        Ok(found) if found.len() == material_ids.len() => {}
        Ok(_) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::InvalidMaterialIds,
                "One or more material IDs are invalid.",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to assign materials", e)),
    }

    match storage.assign_materials(user_id, &material_ids).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            user,
            "Materials assigned successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(internal_error("Failed to assign materials", e)),
    }
}

/// 替换学员的测评分配，所有 id 必须存在
pub async fn assign_assessments(
    service: &UserService,
    user_id: i64,
    body: AssignAssessmentsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(response) = load_student(storage.as_ref(), user_id, "assessments").await {
        return Ok(response);
    }

    let assessment_ids = unique(&body.assessment_ids);
    match storage.count_existing_assessments(&assessment_ids).await {
        Ok(count) if count as usize == assessment_ids.len() => {}
        Ok(_) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::InvalidAssessmentIds,
                "One or more assessment IDs are invalid.",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to assign assessments", e)),
    }

    match storage.assign_assessments(user_id, &assessment_ids).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            user,
            "Assessments assigned successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(internal_error("Failed to assign assessments", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_sorts_and_dedupes() {
        assert_eq!(unique(&[3, 1, 3, 2, 1]), vec![1, 2, 3]);
        assert!(unique(&[]).is_empty());
    }
}
