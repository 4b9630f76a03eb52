pub mod applications;

pub mod assessments;

pub mod attempts;

pub mod auth;

pub mod batches;

pub mod bills;

pub mod colleges;

pub mod courses;

pub mod materials;

pub mod reporting;

pub mod schedules;

pub mod users;

pub use applications::configure_application_routes;
pub use assessments::configure_assessment_routes;
pub use attempts::configure_attempt_routes;
pub use auth::configure_auth_routes;
pub use batches::configure_batch_routes;
pub use bills::configure_bill_routes;
pub use colleges::configure_college_routes;
pub use courses::configure_course_routes;
pub use materials::configure_material_routes;
pub use reporting::configure_reporting_routes;
pub use schedules::configure_schedule_routes;
pub use users::configure_user_routes;

/// 注册全部 API 路由
pub fn configure_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_college_routes)
        .configure(configure_course_routes)
        .configure(configure_material_routes)
        .configure(configure_batch_routes)
        .configure(configure_schedule_routes)
        .configure(configure_application_routes)
        .configure(configure_bill_routes)
        .configure(configure_assessment_routes)
        .configure(configure_attempt_routes)
        .configure(configure_reporting_routes);
}
