use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attempts::requests::{AttemptListParams, CreateAttemptRequest};
use crate::models::users::entities::UserRole;
use crate::services::AttemptService;

static ATTEMPT_SERVICE: Lazy<AttemptService> = Lazy::new(AttemptService::new_lazy);

pub async fn list_attempts(
    req: HttpRequest,
    query: web::Query<AttemptListParams>,
) -> ActixResult<HttpResponse> {
    ATTEMPT_SERVICE.list_attempts(query.into_inner(), &req).await
}

pub async fn submit_attempt(
    req: HttpRequest,
    body: web::Json<CreateAttemptRequest>,
) -> ActixResult<HttpResponse> {
    ATTEMPT_SERVICE.submit_attempt(body.into_inner(), &req).await
}

pub fn configure_attempt_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attempts")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 学员只能看到自己的作答（业务层过滤）
                    .route(web::get().to(list_attempts))
                    .route(
                        web::post()
                            .to(submit_attempt)
                            .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                    ),
            ),
    );
}
