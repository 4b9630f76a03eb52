#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::{Duration, Utc};
use parc_platform::models::users::entities::UserRole;
use serde_json::{Value, json};

use common::{ADMIN_EMAIL, TestContext};

/// 建立学院与课程，返回 (college_id, course_id)
macro_rules! seed_catalogue {
    ($app:expr, $token:expr) => {{
        let (status, college) = call!(
            $app,
            post,
            "/api/v1/colleges",
            $token,
            json!({ "name": "Harbour Institute" })
        );
        assert_eq!(status, StatusCode::CREATED);
        let (status, course) = call!(
            $app,
            post,
            "/api/v1/courses",
            $token,
            json!({ "name": "Systems Programming" })
        );
        assert_eq!(status, StatusCode::CREATED);
        (
            college["data"]["id"].as_i64().unwrap(),
            course["data"]["id"].as_i64().unwrap(),
        )
    }};
}

fn schedule_body(trainer: i64, college: i64, course: i64, days: i64) -> Value {
    let start = Utc::now() + Duration::days(1);
    json!({
        "trainer": trainer,
        "college": college,
        "course": course,
        "start_date": start.to_rfc3339(),
        "end_date": (start + Duration::days(days)).to_rfc3339(),
    })
}

#[actix_web::test]
async fn test_batch_rejects_inverted_dates_and_enrolls_students() {
    let ctx = TestContext::new().await;
    let student = ctx.create_user("radia.perlman@parc.test", UserRole::Student).await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);
    let (college, course) = seed_catalogue!(&app, token);

    let (status, body) = call!(
        &app,
        post,
        "/api/v1/batches",
        token,
        json!({
            "name": "Spring Cohort",
            "course": course,
            "college": college,
            "start_date": "2025-06-01",
            "end_date": "2025-05-01"
        })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "End date cannot be before start date.");

    let (status, body) = call!(
        &app,
        post,
        "/api/v1/batches",
        token,
        json!({
            "name": "Spring Cohort",
            "course": course,
            "college": college,
            "start_date": "2025-03-01",
            "end_date": "2025-05-01",
            "student_ids": [student.id]
        })
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["student_count"], 1);
    assert_eq!(body["data"]["college_name"], "Harbour Institute");

    let (_, user) = call!(&app, get, format!("/api/v1/users/{}", student.id), token);
    assert_eq!(user["data"]["batches"], json!([body["data"]["id"]]));
}

#[actix_web::test]
async fn test_first_schedule_activates_trainer_with_credentials() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);
    let (college, course) = seed_catalogue!(&app, token);

    let (_, trainer) = call!(
        &app,
        post,
        "/api/v1/users",
        token,
        json!({ "name": "Leslie Lamport", "email": "leslie@parc.test", "role": "TRAINER" })
    );
    let trainer_id = trainer["data"]["id"].as_i64().unwrap();
    assert_eq!(trainer["data"]["status"], "inactive");

    let (status, schedule) = call!(
        &app,
        post,
        "/api/v1/schedules",
        token,
        schedule_body(trainer_id, college, course, 14)
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(schedule["data"]["trainer_name"], "Leslie Lamport");

    let (_, trainer) = call!(&app, get, format!("/api/v1/users/{trainer_id}"), token);
    assert_eq!(trainer["data"]["status"], "active");
    assert!(trainer["data"]["access_expiry_date"].is_string());

    let mails = ctx.mailer.sent_to("leslie@parc.test");
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].subject, "Your Parc Platform Login Credentials");

    // 新密码可以直接登录
    let password = common::password_in(&mails[0]);
    let trainer_token = login!(&app, "leslie@parc.test", password);
    let (status, me) = call!(&app, get, "/api/v1/auth/me", trainer_token);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["data"]["role"], "TRAINER");

    // 已激活的讲师再次排课不会收到新密码
    let (status, _) = call!(
        &app,
        post,
        "/api/v1/schedules",
        token,
        schedule_body(trainer_id, college, course, 30)
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ctx.mailer.sent_to("leslie@parc.test").len(), 1);
}

#[actix_web::test]
async fn test_schedule_patch_can_detach_batch() {
    let ctx = TestContext::new().await;
    let trainer = ctx.create_user("butler.lampson@parc.test", UserRole::Trainer).await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);
    let (college, course) = seed_catalogue!(&app, token);

    let (_, other) = call!(&app, post, "/api/v1/courses", token, json!({ "name": "Compilers" }));
    let other_course = other["data"]["id"].as_i64().unwrap();
    let (status, batch) = call!(
        &app,
        post,
        "/api/v1/batches",
        token,
        json!({
            "name": "Autumn Cohort",
            "course": course,
            "college": college,
            "start_date": "2025-09-01",
            "end_date": "2025-12-01"
        })
    );
    assert_eq!(status, StatusCode::CREATED);
    let batch_id = batch["data"]["id"].as_i64().unwrap();

    let mut body = schedule_body(trainer.id, college, course, 10);
    body["batch"] = json!(batch_id);
    let (status, schedule) = call!(&app, post, "/api/v1/schedules", token, body);
    assert_eq!(status, StatusCode::CREATED);
    let schedule_id = schedule["data"]["id"].as_i64().unwrap();
    assert_eq!(schedule["data"]["batch"], batch_id);

    // 省略 batch 时沿用原批次，与新课程不符
    let (status, _) = call!(
        &app,
        patch,
        format!("/api/v1/schedules/{schedule_id}"),
        token,
        json!({ "course": other_course })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call!(
        &app,
        patch,
        format!("/api/v1/schedules/{schedule_id}"),
        token,
        json!({ "course": other_course, "batch": null })
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["course"], other_course);
    assert!(body["data"]["batch"].is_null());
    assert!(body["data"]["batch_name"].is_null());
}

#[actix_web::test]
async fn test_deleting_last_schedule_deactivates_trainer() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);
    let (college, course) = seed_catalogue!(&app, token);

    let (_, trainer) = call!(
        &app,
        post,
        "/api/v1/users",
        token,
        json!({ "name": "Dennis Ritchie", "email": "dennis@parc.test", "role": "TRAINER" })
    );
    let trainer_id = trainer["data"]["id"].as_i64().unwrap();
    let (_, schedule) = call!(
        &app,
        post,
        "/api/v1/schedules",
        token,
        schedule_body(trainer_id, college, course, 5)
    );
    let schedule_id = schedule["data"]["id"].as_i64().unwrap();

    let mails = ctx.mailer.sent_to("dennis@parc.test");
    let trainer_token = login!(&app, "dennis@parc.test", common::password_in(&mails[0]));
    let (status, _) = call!(&app, get, "/api/v1/schedules", trainer_token);
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call!(&app, delete, format!("/api/v1/schedules/{schedule_id}"), token);
    assert_eq!(status, StatusCode::OK);

    let (_, trainer) = call!(&app, get, format!("/api/v1/users/{trainer_id}"), token);
    assert_eq!(trainer["data"]["status"], "inactive");
    assert!(trainer["data"]["access_expiry_date"].is_null());

    let (status, _) = call!(&app, delete, format!("/api/v1/schedules/{schedule_id}"), token);
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_batch_roster_endpoints() {
    let ctx = TestContext::new().await;
    let existing = ctx.create_user("fran.allen@parc.test", UserRole::Student).await;
    ctx.create_user("bjarne.stroustrup@parc.test", UserRole::Trainer).await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);
    let (college, course) = seed_catalogue!(&app, token);
    let (college, course) = (college.to_string(), course.to_string());

    let roster = "name,email\n\
                  Fran Allen,fran.allen@parc.test\n\
                  Ivan Sutherland,ivan@parc.test\n\
                  Bjarne Stroustrup,bjarne.stroustrup@parc.test\n";
    let (status, body) = upload!(
        &app,
        "/api/v1/batches/create_with_students",
        Some(token.as_str()),
        &[
            ("name", "Winter Cohort"),
            ("course", course.as_str()),
            ("college", college.as_str()),
            ("start_date", "2025-01-06"),
            ("end_date", "2025-03-28"),
        ],
        Some(("file", "roster.csv", "text/csv", roster.as_bytes()))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let batch_id = body["data"]["batch"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["created_students"], 1);
    assert_eq!(body["data"]["enrolled_students"], 2);
    assert_eq!(body["data"]["batch"]["student_count"], 2);
    // 讲师邮箱不能加入批次
    let errors = body["data"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["row"], 4);
    assert_eq!(errors[0]["email"], "bjarne.stroustrup@parc.test");

    let new_student = ctx.mailer.sent_to("ivan@parc.test");
    assert_eq!(new_student.len(), 1);

    let more = "name,email\nAlan Kay,alan.kay@parc.test\n";
    let (status, body) = upload!(
        &app,
        format!("/api/v1/batches/{batch_id}/add_students_from_file"),
        Some(token.as_str()),
        &[],
        Some(("file", "more.csv", "text/csv", more.as_bytes()))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["created_students"], 1);
    assert_eq!(body["data"]["batch"]["student_count"], 3);

    let (status, body) = call!(
        &app,
        post,
        format!("/api/v1/batches/{batch_id}/remove_students"),
        token,
        json!({ "student_ids": [existing.id] })
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["student_count"], 2);
    assert!(
        !body["data"]["student_ids"]
            .as_array()
            .unwrap()
            .contains(&json!(existing.id))
    );

    let (status, body) = call!(
        &app,
        post,
        format!("/api/v1/batches/{batch_id}/add_students"),
        token,
        json!({ "student_ids": [existing.id] })
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["student_count"], 3);

    let (status, body) = call!(
        &app,
        post,
        format!("/api/v1/batches/{batch_id}/add_students"),
        token,
        json!({ "student_ids": [] })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "student_ids cannot be empty.");

    let (status, _) = call!(
        &app,
        post,
        "/api/v1/batches/999/add_students",
        token,
        json!({ "student_ids": [existing.id] })
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_trainers_only_see_their_own_schedules() {
    let ctx = TestContext::new().await;
    let ada = ctx.create_user("ada.lovelace@parc.test", UserRole::Trainer).await;
    let charles = ctx.create_user("charles.babbage@parc.test", UserRole::Trainer).await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);
    let (college, course) = seed_catalogue!(&app, token);

    for trainer in [ada.id, charles.id, charles.id] {
        let (status, _) = call!(
            &app,
            post,
            "/api/v1/schedules",
            token,
            schedule_body(trainer, college, course, 7)
        );
        assert_eq!(status, StatusCode::CREATED);
    }

    let ada_token = login!(&app, "ada.lovelace@parc.test");
    let (status, body) = call!(
        &app,
        get,
        format!("/api/v1/schedules?trainer={}", charles.id),
        ada_token
    );
    assert_eq!(status, StatusCode::OK);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["trainer"], ada.id);

    let (_, body) = call!(&app, get, "/api/v1/schedules", token);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 3);

    let (status, _) = call!(
        &app,
        post,
        "/api/v1/schedules",
        ada_token,
        schedule_body(ada.id, college, course, 7)
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_schedule_requires_a_trainer() {
    let ctx = TestContext::new().await;
    let student = ctx.create_user("tim.berners-lee@parc.test", UserRole::Student).await;
    let app = init_app!(ctx);
    let token = login!(&app, ADMIN_EMAIL);
    let (college, course) = seed_catalogue!(&app, token);

    let (status, body) = call!(
        &app,
        post,
        "/api/v1/schedules",
        token,
        schedule_body(student.id, college, course, 7)
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The selected user is not a trainer.");
}

#[actix_web::test]
async fn test_trainer_bill_lifecycle() {
    let ctx = TestContext::new().await;
    let trainer = ctx.create_user("margaret.hamilton@parc.test", UserRole::Trainer).await;
    ctx.create_user("john.mccarthy@parc.test", UserRole::Trainer).await;
    let app = init_app!(ctx);
    let admin = login!(&app, ADMIN_EMAIL);
    let own = login!(&app, "margaret.hamilton@parc.test");
    let other = login!(&app, "john.mccarthy@parc.test");

    let (status, body) = call!(
        &app,
        post,
        "/api/v1/bills",
        own,
        json!({
            "trainer": 1,
            "date": "2025-04-12",
            "expenses": [
                { "type": "Travel", "description": "Train tickets", "amount": 120.5 },
                { "type": "Food", "amount": 30.0 }
            ]
        })
    );
    assert_eq!(status, StatusCode::CREATED);
    let bill_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["trainer"], trainer.id);
    assert_eq!(body["data"]["status"], "PENDING");
    assert_eq!(body["data"]["total_amount"], 150.5);
    assert!(
        body["data"]["invoice_number"]
            .as_str()
            .unwrap()
            .starts_with("INV-20250412-")
    );

    let (_, body) = call!(&app, get, "/api/v1/bills", other);
    assert!(body["data"]["items"].as_array().unwrap().is_empty());

    let (status, _) = call!(&app, post, format!("/api/v1/bills/{bill_id}/mark_as_paid"), own);
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call!(&app, post, format!("/api/v1/bills/{bill_id}/mark_as_paid"), admin);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "PAID");

    // 已付款的账单讲师不能再删除
    let (status, body) = call!(&app, delete, format!("/api/v1/bills/{bill_id}"), own);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Paid bills cannot be deleted.");
    let (status, _) = call!(&app, delete, format!("/api/v1/bills/{bill_id}"), admin);
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_bill_without_expenses_is_rejected() {
    let ctx = TestContext::new().await;
    ctx.create_user("alan.turing@parc.test", UserRole::Trainer).await;
    let app = init_app!(ctx);
    let token = login!(&app, "alan.turing@parc.test");

    let (status, body) = call!(
        &app,
        post,
        "/api/v1/bills",
        token,
        json!({ "date": "2025-04-12", "expenses": [] })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "A bill must contain at least one expense.");
}

#[actix_web::test]
async fn test_attempts_are_graded_and_ranked() {
    let ctx = TestContext::new().await;
    let grace_user = ctx.create_user("grace.hopper@parc.test", UserRole::Student).await;
    let john_user = ctx.create_user("john.vonneumann@parc.test", UserRole::Student).await;
    let app = init_app!(ctx);
    let admin = login!(&app, ADMIN_EMAIL);
    let (_, course) = seed_catalogue!(&app, admin);

    let (status, body) = call!(
        &app,
        post,
        "/api/v1/assessments",
        admin,
        json!({
            "title": "Pointers Quiz",
            "course": course,
            "type": "TEST",
            "questions": [
                { "question": "Size of a pointer on x86_64?", "options": ["4", "8"], "correct_option": 1 },
                { "question": "Null deref is?", "options": ["UB", "Fine"], "correct_option": 0 },
                { "question": "Heap or stack for Box?", "options": ["Heap", "Stack"], "correct_option": 0 }
            ]
        })
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let assessment = body["data"]["id"].as_i64().unwrap();

    // 未分配的测评不能作答
    let grace = login!(&app, "grace.hopper@parc.test");
    let (status, body) = call!(
        &app,
        post,
        "/api/v1/attempts",
        grace,
        json!({ "assessment": assessment, "answers": [1, 0, 0] })
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "This assessment has not been assigned to you.");

    for student in [grace_user.id, john_user.id] {
        let (status, _) = call!(
            &app,
            post,
            format!("/api/v1/users/{student}/assign_assessments"),
            admin,
            json!({ "assessment_ids": [assessment] })
        );
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = call!(
        &app,
        post,
        "/api/v1/attempts",
        grace,
        json!({ "assessment": assessment, "answers": [1, 0, 0] })
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["score"], 3);

    let john = login!(&app, "john.vonneumann@parc.test");
    let (status, body) = call!(
        &app,
        post,
        "/api/v1/attempts",
        john,
        json!({ "assessment": assessment, "answers": [1, null, 1] })
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["score"], 1);

    let (status, _) = call!(
        &app,
        post,
        "/api/v1/attempts",
        john,
        json!({ "assessment": assessment, "answers": [5] })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call!(
        &app,
        post,
        "/api/v1/attempts",
        admin,
        json!({ "assessment": assessment, "score": 3 })
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call!(&app, get, "/api/v1/reporting", john);
    assert_eq!(status, StatusCode::OK);
    let leaderboard = body["data"]["leaderboard"].as_array().unwrap();
    assert_eq!(leaderboard[0]["student_name"], "grace hopper");
    assert_eq!(leaderboard[0]["total_score"], 3);
    assert_eq!(leaderboard[1]["total_score"], 1);
    assert_eq!(body["data"]["student_attempts"].as_array().unwrap().len(), 2);

    let (status, _) = call!(&app, get, "/api/v1/reporting/overview", john);
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, body) = call!(&app, get, "/api/v1/reporting/overview", admin);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["students"], 2);

    // 角色不再是学员的账号不进入排行榜
    let (status, _) = call!(
        &app,
        patch,
        format!("/api/v1/users/{}", john_user.id),
        admin,
        json!({ "role": "EMPLOYEE" })
    );
    assert_eq!(status, StatusCode::OK);
    let (_, body) = call!(&app, get, "/api/v1/reporting", grace);
    let leaderboard = body["data"]["leaderboard"].as_array().unwrap();
    assert_eq!(leaderboard.len(), 1);
    assert_eq!(leaderboard[0]["student_id"], grace_user.id);
}

#[actix_web::test]
async fn test_application_requires_resume_and_admin_review() {
    let ctx = TestContext::new().await;
    ctx.create_user("donald.knuth@parc.test", UserRole::Trainer).await;
    let app = init_app!(ctx);

    let boundary = "parc-application-boundary";
    let body = common::multipart_body(
        boundary,
        &[
            ("name", "Barbara Liskov"),
            ("email", "liskov@parc.test"),
            ("phone", "+1 555 0142"),
            ("experience", "12"),
        ],
        None,
    );
    let req = test::TestRequest::post()
        .uri("/api/v1/applications")
        .peer_addr(common::next_peer())
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let (status, body) = common::read_response(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "A PDF resume is required.");

    let trainer = login!(&app, "donald.knuth@parc.test");
    let (status, _) = call!(&app, get, "/api/v1/applications", trainer);
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = login!(&app, ADMIN_EMAIL);
    let (status, body) = call!(&app, get, "/api/v1/applications", admin);
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["items"].as_array().unwrap().is_empty());

    let (status, _) = call!(&app, post, "/api/v1/applications/77/approve", admin);
    assert_eq!(status, StatusCode::NOT_FOUND);
}

const RESUME: &[u8] = b"%PDF-1.4\n% resume\n%%EOF\n";

/// 提交一份带 PDF 简历的申请，返回申请 id
macro_rules! submit_application {
    ($app:expr, $name:expr, $email:expr) => {{
        let (status, body) = upload!(
            $app,
            "/api/v1/applications",
            None,
            &[
                ("name", $name),
                ("email", $email),
                ("phone", "+1 555 0150"),
                ("experience", "8"),
                ("expertise_domains", "Distributed systems"),
            ],
            Some(("resume", "resume.pdf", "application/pdf", RESUME))
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }};
}

#[actix_web::test]
async fn test_application_approval_and_decline() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let admin = login!(&app, ADMIN_EMAIL);

    let approved = submit_application!(&app, "Leslie Lamport", "Lamport@parc.test");
    let declined = submit_application!(&app, "Butler Lampson", "lampson@parc.test");

    let (status, _) = upload!(
        &app,
        "/api/v1/applications",
        None,
        &[
            ("name", "Leslie Lamport"),
            ("email", "lamport@parc.test"),
            ("phone", "+1 555 0150"),
            ("experience", "8"),
        ],
        Some(("resume", "resume.pdf", "application/pdf", RESUME))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call!(&app, post, format!("/api/v1/applications/{approved}/approve"), admin);
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["role"], "TRAINER");
    assert_eq!(body["data"]["status"], "inactive");
    assert_eq!(body["data"]["email"], "lamport@parc.test");
    assert_eq!(body["data"]["has_resume"], true);
    let trainer_id = body["data"]["id"].as_i64().unwrap();

    let mails = ctx.mailer.sent_to("lamport@parc.test");
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].subject, "Your Application has been Approved!");

    // 已处理的申请不能再次审批
    let (status, body) = call!(&app, post, format!("/api/v1/applications/{approved}/approve"), admin);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Application has already been approved.");

    let (status, body) = call!(&app, post, format!("/api/v1/applications/{declined}/decline"), admin);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "DECLINED");
    let (status, body) = call!(&app, post, format!("/api/v1/applications/{declined}/approve"), admin);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Application has already been declined.");
    assert!(ctx.mailer.sent_to("lampson@parc.test").is_empty());

    let (_, body) = call!(&app, get, "/api/v1/applications", admin);
    assert!(body["data"]["items"].as_array().unwrap().is_empty());

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{trainer_id}/resume"))
        .insert_header(("Authorization", format!("Bearer {admin}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await.as_ref(), RESUME);
}
