#[macro_use]
mod common;

use actix_web::http::StatusCode;
use parc_platform::models::users::entities::UserRole;
use serde_json::json;

use common::{ADMIN_EMAIL, TestContext};

#[actix_web::test]
async fn test_college_crud() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);

    let (status, body) = call!(
        &app,
        post,
        "/api/v1/colleges",
        token,
        json!({
            "name": "Northwind College",
            "address": "1 Harbour Road",
            "contact_person": "Grace Hopper",
            "contact_email": "grace@northwind.test",
            "contact_phone": "+1 555 0199"
        })
    );
    assert_eq!(status, StatusCode::CREATED);
    let college_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = call!(
        &app,
        post,
        "/api/v1/colleges",
        token,
        json!({ "name": "Northwind College" })
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "A college with this name already exists.");

    let (status, body) = call!(
        &app,
        patch,
        format!("/api/v1/colleges/{college_id}"),
        token,
        json!({ "contact_person": "Mary Jackson" })
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["contact_person"], "Mary Jackson");
    assert_eq!(body["data"]["address"], "1 Harbour Road");

    let (status, body) = call!(&app, get, "/api/v1/colleges?search=northwind", token);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);

    let (status, _) = call!(&app, delete, format!("/api/v1/colleges/{college_id}"), token);
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call!(&app, get, format!("/api/v1/colleges/{college_id}"), token);
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_college_name_is_required() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);

    let (status, body) = call!(&app, post, "/api/v1/colleges", token, json!({ "name": "  " }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "College name is required.");
}

#[actix_web::test]
async fn test_students_read_catalogue_but_cannot_write() {
    let ctx = TestContext::new().await;
    ctx.create_user("alan.kay@parc.test", UserRole::Student).await;
    let app = init_app!(ctx);
    let admin = login!(&app, ADMIN_EMAIL);
    let student = login!(&app, "alan.kay@parc.test");

    let (status, _) = call!(
        &app,
        post,
        "/api/v1/courses",
        admin,
        json!({ "name": "Smalltalk Basics", "description": "Objects all the way down" })
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call!(&app, get, "/api/v1/courses", student);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["name"], "Smalltalk Basics");

    let (status, _) = call!(
        &app,
        post,
        "/api/v1/courses",
        student,
        json!({ "name": "Forbidden Course" })
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call!(
        &app,
        post,
        "/api/v1/colleges",
        student,
        json!({ "name": "Forbidden College" })
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_course_modules_are_ordered_and_unique() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);

    let (_, body) = call!(
        &app,
        post,
        "/api/v1/courses",
        token,
        json!({ "name": "Distributed Systems" })
    );
    let course_id = body["data"]["id"].as_i64().unwrap();
    let modules = format!("/api/v1/courses/{course_id}/modules");

    let (status, _) = call!(
        &app,
        post,
        modules,
        token,
        json!({ "module_number": 2, "title": "Consensus" })
    );
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = call!(
        &app,
        post,
        modules,
        token,
        json!({ "module_number": 1, "title": "Clocks" })
    );
    assert_eq!(status, StatusCode::CREATED);
    let clocks_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = call!(
        &app,
        post,
        modules,
        token,
        json!({ "module_number": 2, "title": "Replication" })
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        "A module with this number already exists in the course."
    );

    let (status, _) = call!(
        &app,
        post,
        modules,
        token,
        json!({ "module_number": 3, "title": "Storage", "material_ids": [999] })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call!(&app, get, format!("/api/v1/courses/{course_id}"), token);
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body["data"]["modules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Clocks", "Consensus"]);

    let (status, _) = call!(
        &app,
        delete,
        format!("/api/v1/courses/{course_id}/modules/{clocks_id}"),
        token
    );
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call!(
        &app,
        delete,
        format!("/api/v1/courses/{course_id}/modules/{clocks_id}"),
        token
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}
