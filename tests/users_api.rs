#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use parc_platform::models::users::entities::UserRole;
use parc_platform::storage::Storage;
use serde_json::json;

use common::{ADMIN_EMAIL, TestContext};

#[actix_web::test]
async fn test_create_user_splits_name_and_rejects_duplicates() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);

    let payload = json!({
        "name": "Katherine Coleman Johnson",
        "email": "Katherine@Parc.test",
        "role": "STUDENT",
        "phone": "+1 555 0100"
    });
    let (status, body) = call!(&app, post, "/api/v1/users", token, &payload);
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["first_name"], "Katherine");
    assert_eq!(body["data"]["last_name"], "Coleman Johnson");
    assert_eq!(body["data"]["username"], "katherine@parc.test");
    assert_eq!(ctx.mailer.sent_to("katherine@parc.test").len(), 1);

    let (status, _) = call!(&app, post, "/api/v1/users", token, &payload);
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_trainer_created_by_admin_starts_inactive_without_mail() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);

    let (status, body) = call!(
        &app,
        post,
        "/api/v1/users",
        token,
        json!({ "name": "Linus", "email": "linus@parc.test", "role": "TRAINER", "expertise": "Kernels" })
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "inactive");
    assert_eq!(body["data"]["last_name"], "");
    assert!(ctx.mailer.sent_to("linus@parc.test").is_empty());
}

#[actix_web::test]
async fn test_only_students_must_change_their_first_password() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);

    let (status, body) = call!(
        &app,
        post,
        "/api/v1/users",
        token,
        json!({ "name": "Frances Allen", "email": "frances@parc.test", "role": "EMPLOYEE" })
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["must_change_password"], false);
    let mails = ctx.mailer.sent_to("frances@parc.test");
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].subject, "Your Parc Platform Login Details");
    assert!(!mails[0].body.contains("student"));

    // 邮件中的密码可以直接登录，不会被要求改密
    let employee = login!(&app, "frances@parc.test", common::password_in(&mails[0]));
    let (_, me) = call!(&app, get, "/api/v1/auth/me", employee);
    assert_eq!(me["data"]["must_change_password"], false);

    let (_, body) = call!(
        &app,
        post,
        "/api/v1/users",
        token,
        json!({ "name": "Jean Sammet", "email": "jean@parc.test", "role": "STUDENT" })
    );
    assert_eq!(body["data"]["must_change_password"], true);
    let mails = ctx.mailer.sent_to("jean@parc.test");
    assert_eq!(mails[0].subject, "Your Parc Platform Account Credentials");
}

#[actix_web::test]
async fn test_users_endpoints_are_admin_only() {
    let ctx = TestContext::new().await;
    ctx.create_user("barbara.liskov@parc.test", UserRole::Trainer).await;
    ctx.create_user("ken.thompson@parc.test", UserRole::Student).await;
    let app = init_app!(ctx);

    let trainer = login!(&app, "barbara.liskov@parc.test");
    let student = login!(&app, "ken.thompson@parc.test");
    let admin = login!(&app, ADMIN_EMAIL);

    let (status, _) = call!(&app, get, "/api/v1/users", trainer);
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = call!(&app, get, "/api/v1/users", student);
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call!(&app, get, "/api/v1/users?role=TRAINER", admin);
    assert_eq!(status, StatusCode::OK);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["email"], "barbara.liskov@parc.test");
}

#[actix_web::test]
async fn test_admin_cannot_delete_self() {
    let ctx = TestContext::new().await;
    let student = ctx.create_user("dennis.ritchie@parc.test", UserRole::Student).await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);
    let (_, me) = call!(&app, get, "/api/v1/auth/me", token);
    let admin_id = me["data"]["id"].as_i64().unwrap();

    let (status, _) = call!(&app, delete, format!("/api/v1/users/{admin_id}"), token);
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call!(&app, delete, format!("/api/v1/users/{}", student.id), token);
    assert_eq!(status, StatusCode::OK);
    assert!(ctx.storage.get_user_by_id(student.id).await.unwrap().is_none());

    let (status, _) = call!(&app, get, format!("/api/v1/users/{}", student.id), token);
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_assign_materials_only_to_students_with_valid_ids() {
    let ctx = TestContext::new().await;
    let trainer = ctx.create_user("john.backus@parc.test", UserRole::Trainer).await;
    let student = ctx.create_user("frances.allen@parc.test", UserRole::Student).await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);

    let (status, body) = call!(
        &app,
        post,
        format!("/api/v1/users/{}/assign_materials", trainer.id),
        token,
        json!({ "material_ids": [] })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Can only assign materials to students.");

    let (status, body) = call!(
        &app,
        post,
        format!("/api/v1/users/{}/assign_materials", student.id),
        token,
        json!({ "material_ids": [4242] })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "One or more material IDs are invalid.");
}

#[actix_web::test]
async fn test_bulk_create_students_reports_rows() {
    let ctx = TestContext::new().await;
    ctx.create_user("edsger.dijkstra@parc.test", UserRole::Student).await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);

    let csv = "name,email,phone\n\
               Barbara Liskov,barbara@parc.test,+1 555 0101\n\
               Edsger Dijkstra,edsger.dijkstra@parc.test,\n\
               No Email,not-an-email,\n\
               Barbara Again,BARBARA@parc.test,\n";
    let boundary = "parc-roster-boundary";
    let body = common::multipart_body(
        boundary,
        &[("college", "MIT")],
        Some(("file", "roster.csv", "text/csv", csv.as_bytes())),
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/users/bulk_create_students")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let (status, body) = common::read_response(test::call_service(&app, req).await).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let created = body["data"]["created"].as_array().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["email"], "barbara@parc.test");
    assert_eq!(created[0]["college"], "MIT");
    assert_eq!(body["data"]["skipped"], json!(["edsger.dijkstra@parc.test"]));

    let errors = body["data"]["errors"].as_array().unwrap();
    let rows: Vec<i64> = errors.iter().map(|e| e["row"].as_i64().unwrap()).collect();
    assert_eq!(rows, vec![4, 5]);

    assert_eq!(ctx.mailer.sent_to("barbara@parc.test").len(), 1);
}

#[actix_web::test]
async fn test_resume_missing_returns_404() {
    let ctx = TestContext::new().await;
    let trainer = ctx.create_user("niklaus.wirth@parc.test", UserRole::Trainer).await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);

    let (status, body) = call!(&app, get, format!("/api/v1/users/{}/resume", trainer.id), token);
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Resume not found for this user.");
}
