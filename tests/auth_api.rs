#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use parc_platform::models::users::entities::{UserRole, UserStatus};
use parc_platform::models::users::requests::AccessUpdate;
use parc_platform::storage::Storage;
use serde_json::json;

use common::{ADMIN_EMAIL, PASSWORD, TestContext};

#[actix_web::test]
async fn test_login_returns_token_pair_and_user() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/token")
        .peer_addr(common::next_peer())
        .set_json(json!({ "username": ADMIN_EMAIL, "password": PASSWORD }))
        .to_request();
    let (status, body) = common::read_response(test::call_service(&app, req).await).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["access"].as_str().is_some());
    assert!(body["data"]["refresh"].as_str().is_some());
    assert_eq!(body["data"]["user"]["email"], ADMIN_EMAIL);
    assert_eq!(body["data"]["user"]["role"], "ADMIN");
    assert!(body["data"]["user"].get("password_hash").is_none());
}

#[actix_web::test]
async fn test_wrong_password_is_rejected() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/token")
        .peer_addr(common::next_peer())
        .set_json(json!({ "username": ADMIN_EMAIL, "password": "Wrong1Password" }))
        .to_request();
    let (status, _) = common::read_response(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_login_is_rate_limited_per_ip() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let peer = common::next_peer();

    let mut statuses = Vec::new();
    for _ in 0..6 {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/token")
            .peer_addr(peer)
            .set_json(json!({ "username": ADMIN_EMAIL, "password": "Wrong1Password" }))
            .to_request();
        statuses.push(test::call_service(&app, req).await.status());
    }
    assert!(statuses[..5].iter().all(|s| *s == StatusCode::UNAUTHORIZED));
    assert_eq!(statuses[5], StatusCode::TOO_MANY_REQUESTS);
}

#[actix_web::test]
async fn test_inactive_account_cannot_log_in() {
    let ctx = TestContext::new().await;
    let trainer = ctx.create_user("ada.lovelace@parc.test", UserRole::Trainer).await;
    ctx.storage
        .update_user_access(
            trainer.id,
            AccessUpdate {
                status: UserStatus::Inactive,
                access_expiry_date: None,
                password_hash: None,
            },
        )
        .await
        .unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/token")
        .peer_addr(common::next_peer())
        .set_json(json!({ "username": trainer.email, "password": PASSWORD }))
        .to_request();
    let (status, body) = common::read_response(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "Your account is inactive. Please contact an administrator."
    );
}

#[actix_web::test]
async fn test_expired_trainer_is_deactivated_on_login() {
    let ctx = TestContext::new().await;
    let trainer = ctx.create_user("alan.turing@parc.test", UserRole::Trainer).await;
    ctx.storage
        .update_user_access(
            trainer.id,
            AccessUpdate {
                status: UserStatus::Active,
                access_expiry_date: Some(chrono::Utc::now() - chrono::Duration::days(1)),
                password_hash: None,
            },
        )
        .await
        .unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/token")
        .peer_addr(common::next_peer())
        .set_json(json!({ "username": trainer.email, "password": PASSWORD }))
        .to_request();
    let (status, body) = common::read_response(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["message"].as_str().unwrap().contains("access period has expired"));

    let reloaded = ctx.storage.get_user_by_id(trainer.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, UserStatus::Inactive);
}

#[actix_web::test]
async fn test_me_requires_bearer_token() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/auth/me").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let token = login!(&app, ADMIN_EMAIL);
    let (status, body) = call!(&app, get, "/api/v1/auth/me", token);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], ADMIN_EMAIL);
}

#[actix_web::test]
async fn test_refresh_issues_new_access_token() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/token")
        .peer_addr(common::next_peer())
        .set_json(json!({ "username": ADMIN_EMAIL, "password": PASSWORD }))
        .to_request();
    let (_, body) = common::read_response(test::call_service(&app, req).await).await;
    let refresh = body["data"]["refresh"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .peer_addr(common::next_peer())
        .set_json(json!({ "refresh": refresh }))
        .to_request();
    let (status, body) = common::read_response(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    let access = body["data"]["access"].as_str().unwrap().to_string();

    let (status, _) = call!(&app, get, "/api/v1/auth/me", access);
    assert_eq!(status, StatusCode::OK);

    // 访问令牌不能当刷新令牌用
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .peer_addr(common::next_peer())
        .set_json(json!({ "refresh": access }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_set_password_enforces_policy_and_clears_flag() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    let admin_token = login!(&app, ADMIN_EMAIL);

    let (status, body) = call!(
        &app,
        post,
        "/api/v1/users",
        admin_token,
        json!({ "name": "Grace Hopper", "email": "grace@parc.test", "role": "STUDENT" })
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["must_change_password"], true);

    let mail = ctx.mailer.sent_to("grace@parc.test");
    assert_eq!(mail.len(), 1);
    let temp_password = common::password_in(&mail[0]);
    let token = login!(&app, "grace@parc.test", temp_password);

    let (status, _) = call!(
        &app,
        post,
        "/api/v1/auth/set_password",
        token,
        json!({ "password": "short" })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call!(
        &app,
        post,
        "/api/v1/auth/set_password",
        token,
        json!({ "password": "Cobol1959Rules" })
    );
    assert_eq!(status, StatusCode::OK);

    let token = login!(&app, "grace@parc.test", "Cobol1959Rules");
    let (_, body) = call!(&app, get, "/api/v1/auth/me", token);
    assert_eq!(body["data"]["must_change_password"], false);
}
