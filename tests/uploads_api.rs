#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use parc_platform::models::users::entities::UserRole;
use serde_json::json;

use common::{ADMIN_EMAIL, TestContext};

const PDF: &[u8] = b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog >>\nendobj\n%%EOF\n";

/// 建立一门课程，返回课程 id
macro_rules! seed_course {
    ($app:expr, $token:expr) => {{
        let (status, course) = call!(
            $app,
            post,
            "/api/v1/courses",
            $token,
            json!({ "name": "Operating Systems" })
        );
        assert_eq!(status, StatusCode::CREATED);
        course["data"]["id"].as_i64().unwrap()
    }};
}

#[actix_web::test]
async fn test_material_upload_checks_type_and_content() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);
    let course = seed_course!(&app, token).to_string();

    // 扩展名与资料类型不符
    let (status, body) = upload!(
        &app,
        "/api/v1/materials",
        Some(token.as_str()),
        &[("title", "Scheduling"), ("course", course.as_str()), ("type", "VIDEO")],
        Some(("file", "scheduling.pdf", "application/pdf", PDF))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "File type .pdf does not match material type VIDEO."
    );

    // 文件头与扩展名不符
    let (status, body) = upload!(
        &app,
        "/api/v1/materials",
        Some(token.as_str()),
        &[("title", "Scheduling"), ("course", course.as_str()), ("type", "PDF")],
        Some(("file", "scheduling.pdf", "application/pdf", &b"<html>not a pdf</html>"[..]))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "File content does not match its extension");

    let (status, body) = upload!(
        &app,
        "/api/v1/materials",
        Some(token.as_str()),
        &[("title", "Scheduling"), ("course", "9999"), ("type", "PDF")],
        Some(("file", "scheduling.pdf", "application/pdf", PDF))
    );
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");

    let (status, body) = call!(&app, get, "/api/v1/materials", token);
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_uploaded_material_content_is_served_inline() {
    let ctx = TestContext::new().await;
    ctx.create_user("maurice.wilkes@parc.test", UserRole::Student).await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);
    let course = seed_course!(&app, token).to_string();

    let (status, body) = upload!(
        &app,
        "/api/v1/materials",
        Some(token.as_str()),
        &[
            ("title", "Virtual Memory"),
            ("course", course.as_str()),
            ("type", "pdf"),
            ("duration_in_minutes", "45"),
        ],
        Some(("file", "virtual-memory.pdf", "application/pdf", PDF))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let material = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["type"], "PDF");
    assert_eq!(body["data"]["course"], "Operating Systems");
    assert_eq!(body["data"]["file_size"], PDF.len());
    assert_eq!(body["data"]["duration_in_minutes"], 45);

    // 学员不能上传，但可以读取内容
    let student = login!(&app, "maurice.wilkes@parc.test");
    let (status, _) = upload!(
        &app,
        "/api/v1/materials",
        Some(student.as_str()),
        &[("title", "Paging"), ("course", course.as_str()), ("type", "PDF")],
        Some(("file", "paging.pdf", "application/pdf", PDF))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/materials/{material}/content"))
        .insert_header(("Authorization", format!("Bearer {student}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(*resp.headers().get("content-type").unwrap(), "application/pdf");
    assert!(
        resp.headers().get("content-disposition").unwrap()
            .to_str()
            .unwrap()
            .starts_with("inline")
    );
    assert_eq!(test::read_body(resp).await.as_ref(), PDF);

    let (status, _) = call!(&app, delete, format!("/api/v1/materials/{material}"), token);
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call!(&app, get, format!("/api/v1/materials/{material}/content"), token);
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_form_with_too_many_fields_is_rejected() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let names: Vec<String> = (0..40).map(|i| format!("extra_{i}")).collect();
    let fields: Vec<(&str, &str)> = names.iter().map(|name| (name.as_str(), "x")).collect();

    let (status, body) = upload!(
        &app,
        "/api/v1/applications",
        None,
        &fields,
        Some(("resume", "resume.pdf", "application/pdf", PDF))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Too many form fields");
}
