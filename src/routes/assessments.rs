use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assessments::requests::{
    AssessmentListParams, CreateAssessmentRequest, UpdateAssessmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AssessmentService;
use crate::utils::SafeIDI64;

static ASSESSMENT_SERVICE: Lazy<AssessmentService> = Lazy::new(AssessmentService::new_lazy);

pub async fn list_assessments(
    req: HttpRequest,
    query: web::Query<AssessmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .list_assessments(query.into_inner(), &req)
        .await
}

pub async fn create_assessment(
    req: HttpRequest,
    body: web::Json<CreateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .create_assessment(body.into_inner(), &req)
        .await
}

pub async fn get_assessment(
    req: HttpRequest,
    assessment_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.get_assessment(assessment_id.0, &req).await
}

pub async fn update_assessment(
    req: HttpRequest,
    assessment_id: SafeIDI64,
    body: web::Json<UpdateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .update_assessment(assessment_id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_assessment(
    req: HttpRequest,
    assessment_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .delete_assessment(assessment_id.0, &req)
        .await
}

pub fn configure_assessment_routes(cfg: &mut web::ServiceConfig) {
    let staff = || middlewares::RequireRole::new_any(UserRole::staff_roles());
    // 学员只能看到分配给自己的测评（业务层过滤）
    let readers = || {
        middlewares::RequireRole::new_any(&[
            &UserRole::Admin,
            &UserRole::Trainer,
            &UserRole::Student,
        ])
    };

    cfg.service(
        web::scope("/api/v1/assessments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_assessments).wrap(readers()))
                    .route(web::post().to(create_assessment).wrap(staff())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_assessment).wrap(readers()))
                    .route(web::patch().to(update_assessment).wrap(staff()))
                    .route(web::put().to(update_assessment).wrap(staff()))
                    .route(web::delete().to(delete_assessment).wrap(staff())),
            ),
    );
}
