//! 统计报表：排行榜、最近作答与运营概览

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse,
    attempts::requests::AttemptListQuery,
    reporting::responses::ReportingResponse,
};
use crate::services::internal_error;
use crate::storage::Storage;

/// 最近作答的条数
pub const RECENT_ATTEMPTS: i64 = 10;

pub struct ReportingService {
    storage: Option<Arc<dyn Storage>>,
}

impl ReportingService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn get_reporting(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;

        let leaderboard = match storage.leaderboard().await {
            Ok(leaderboard) => leaderboard,
            Err(e) => return Ok(internal_error("Failed to build leaderboard", e)),
        };
        let recent = AttemptListQuery {
            page: Some(1),
            size: Some(RECENT_ATTEMPTS),
            ..Default::default()
        };
        let student_attempts = match storage.list_attempts_with_pagination(recent).await {
            Ok(page) => page.items,
            Err(e) => return Ok(internal_error("Failed to load recent attempts", e)),
        };

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            ReportingResponse {
                leaderboard,
                student_attempts,
            },
            "Reporting data retrieved successfully",
        )))
    }

    pub async fn get_overview(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;

        match storage.overview_counts().await {
            Ok(overview) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                overview,
                "Overview retrieved successfully",
            ))),
            Err(e) => Ok(internal_error("Failed to retrieve overview", e)),
        }
    }
}
