use parc_platform::client::{
    ALL_REQUESTS_FAILED, ApiClient, DataStore, Resource, SESSION_EXPIRED,
};
use parc_platform::models::bills::requests::{CreateBillRequest, ExpenseInput};
use parc_platform::models::bills::entities::ExpenseType;
use parc_platform::models::colleges::requests::CreateCollegeRequest;
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMESTAMP: &str = "2025-03-01T08:00:00Z";

fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": 0,
        "message": "ok",
        "data": data,
        "timestamp": TIMESTAMP,
    }))
}

fn failure(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "code": 1000,
        "message": message,
        "data": null,
        "timestamp": TIMESTAMP,
    }))
}

fn page(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({
        "items": items,
        "pagination": { "page": 1, "page_size": 100, "total": total, "total_pages": 1 }
    })
}

fn empty_data(resource: Resource) -> Value {
    match resource {
        Resource::Reporting => json!({ "leaderboard": [], "student_attempts": [] }),
        _ => page(Vec::new()),
    }
}

fn college(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "address": "",
        "contact_person": "",
        "contact_email": "",
        "contact_phone": "",
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP,
    })
}

fn bill(id: i64, date: &str) -> Value {
    json!({
        "id": id,
        "trainer": 7,
        "trainer_name": "Grace Hopper",
        "invoice_number": format!("INV-{}-ABC12{id}", date.replace('-', "")),
        "date": date,
        "status": "PENDING",
        "expenses": [{ "id": id, "type": "Travel", "description": "", "amount": 10.0 }],
        "total_amount": 10.0,
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP,
    })
}

fn user(id: i64, email: &str) -> Value {
    json!({
        "id": id,
        "username": email,
        "email": email,
        "role": "ADMIN",
        "status": "active",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "full_name": "Ada Lovelace",
        "has_resume": false,
        "must_change_password": false,
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP,
    })
}

fn api_path(resource: Resource) -> String {
    format!("/api/v1{}", resource.path())
}

/// 除 `overrides` 外的资源都返回空数据
async fn mount_resources(server: &MockServer, overrides: &[(Resource, ResponseTemplate)]) {
    for resource in Resource::ALL {
        let response = overrides
            .iter()
            .find(|(r, _)| *r == resource)
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| ok(empty_data(resource)));
        Mock::given(method("GET"))
            .and(path(api_path(resource)))
            .respond_with(response)
            .mount(server)
            .await;
    }
}

fn store_for(server: &MockServer) -> DataStore {
    let api = ApiClient::new(server.uri()).unwrap();
    api.set_tokens("access-token", Some("refresh-token".to_string()));
    DataStore::new(api)
}

#[tokio::test]
async fn test_sync_all_populates_collections() {
    let server = MockServer::start().await;
    mount_resources(
        &server,
        &[
            (Resource::Colleges, ok(page(vec![college(1, "Harbour Institute")]))),
            (
                Resource::Bills,
                ok(page(vec![bill(1, "2025-01-10"), bill(2, "2025-02-20")])),
            ),
        ],
    )
    .await;

    let mut store = store_for(&server);
    store.sync_all().await.unwrap();

    assert!(store.is_synced());
    assert_eq!(store.error(), None);
    assert_eq!(store.colleges().len(), 1);
    assert_eq!(store.colleges()[0].name, "Harbour Institute");
    let bill_ids: Vec<i64> = store.bills().iter().map(|b| b.id).collect();
    assert_eq!(bill_ids, vec![2, 1]);
    assert!(store.reporting().is_some());
}

#[tokio::test]
async fn test_partial_failure_keeps_previous_data() {
    let server = MockServer::start().await;
    mount_resources(
        &server,
        &[(Resource::Colleges, ok(page(vec![college(1, "Harbour Institute")])))],
    )
    .await;
    let mut store = store_for(&server);
    store.sync_all().await.unwrap();

    server.reset().await;
    mount_resources(
        &server,
        &[(Resource::Colleges, failure(500, "Internal server error"))],
    )
    .await;

    store.sync_all().await.unwrap();
    assert!(store.is_synced());
    assert_eq!(store.colleges().len(), 1);
}

#[tokio::test]
async fn test_all_requests_failing_reports_error() {
    let server = MockServer::start().await;
    let failures: Vec<(Resource, ResponseTemplate)> = Resource::ALL
        .iter()
        .map(|r| (*r, failure(503, "Service unavailable")))
        .collect();
    mount_resources(&server, &failures).await;

    let mut store = store_for(&server);
    let err = store.sync_all().await.unwrap_err();
    assert_eq!(err, ALL_REQUESTS_FAILED);
    assert_eq!(store.error(), Some(ALL_REQUESTS_FAILED));
    assert!(!store.is_synced());
}

#[tokio::test]
async fn test_slow_resource_times_out() {
    let server = MockServer::start().await;
    mount_resources(
        &server,
        &[(
            Resource::Colleges,
            ok(page(vec![college(1, "Slow College")])).set_delay(Duration::from_millis(500)),
        )],
    )
    .await;

    let mut store = store_for(&server).with_sync_timeout(Duration::from_millis(100));
    store.sync_all().await.unwrap();
    assert!(store.colleges().is_empty());
}

#[tokio::test]
async fn test_unauthorized_sync_refreshes_and_retries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(ok(json!({ "access": "fresh-token", "expires_in": 900 })))
        .expect(1)
        .mount(&server)
        .await;
    for resource in Resource::ALL {
        let data = match resource {
            Resource::Colleges => page(vec![college(3, "Fresh College")]),
            other => empty_data(other),
        };
        Mock::given(method("GET"))
            .and(path(api_path(resource)))
            .and(header("authorization", "Bearer fresh-token"))
            .respond_with(ok(data))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(api_path(resource)))
            .respond_with(failure(401, "Invalid or expired token"))
            .with_priority(10)
            .mount(&server)
            .await;
    }

    let mut store = store_for(&server);
    store.sync_all().await.unwrap();

    assert_eq!(store.api().access_token().as_deref(), Some("fresh-token"));
    assert_eq!(store.colleges()[0].name, "Fresh College");
}

#[tokio::test]
async fn test_failed_refresh_expires_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(failure(401, "Invalid refresh token"))
        .mount(&server)
        .await;
    let unauthorized: Vec<(Resource, ResponseTemplate)> = Resource::ALL
        .iter()
        .map(|r| (*r, failure(401, "Invalid or expired token")))
        .collect();
    mount_resources(&server, &unauthorized).await;

    let mut store = store_for(&server);
    let err = store.sync_all().await.unwrap_err();
    assert_eq!(err, SESSION_EXPIRED);
    assert_eq!(store.error(), Some(SESSION_EXPIRED));
    assert!(!store.api().is_authenticated());
}

#[tokio::test]
async fn test_expired_session_still_keeps_successful_collections() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(failure(401, "Invalid refresh token"))
        .expect(1)
        .mount(&server)
        .await;
    mount_resources(
        &server,
        &[
            (Resource::Colleges, ok(page(vec![college(4, "Lakeside College")]))),
            (Resource::Bills, ok(page(vec![bill(9, "2025-02-01")]))),
            (Resource::Users, failure(401, "Invalid or expired token")),
        ],
    )
    .await;

    let mut store = store_for(&server);
    let err = store.sync_all().await.unwrap_err();

    assert_eq!(err, SESSION_EXPIRED);
    assert_eq!(store.error(), Some(SESSION_EXPIRED));
    assert!(!store.is_synced());
    assert_eq!(store.colleges()[0].name, "Lakeside College");
    assert_eq!(store.bills()[0].id, 9);
    assert!(store.reporting().is_some());
}

#[tokio::test]
async fn test_login_stores_tokens_and_syncs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/token"))
        .respond_with(ok(json!({
            "access": "access-token",
            "refresh": "refresh-token",
            "expires_in": 900,
            "user": user(1, "admin@parc.test"),
        })))
        .mount(&server)
        .await;
    mount_resources(
        &server,
        &[(Resource::Users, ok(page(vec![user(1, "admin@parc.test")])))],
    )
    .await;

    let mut store = DataStore::new(ApiClient::new(server.uri()).unwrap());
    let login = store.login("admin@parc.test", "Welcome2Parc").await.unwrap();

    assert_eq!(login.user.email, "admin@parc.test");
    assert!(store.api().is_authenticated());
    assert_eq!(store.current_user().map(|u| u.id), Some(1));
    assert!(store.is_synced());
    assert_eq!(store.users().len(), 1);

    store.logout();
    assert!(!store.api().is_authenticated());
    assert!(store.users().is_empty());
    assert!(store.current_user().is_none());
}

#[tokio::test]
async fn test_college_mutations_patch_local_collection() {
    let server = MockServer::start().await;
    mount_resources(
        &server,
        &[(Resource::Colleges, ok(page(vec![college(1, "Harbour Institute")])))],
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/colleges"))
        .respond_with(ok(college(2, "Riverside College")))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/colleges/1"))
        .respond_with(ok(Value::Null))
        .mount(&server)
        .await;

    let mut store = store_for(&server);
    store.sync_all().await.unwrap();

    let request = CreateCollegeRequest {
        name: "Riverside College".to_string(),
        address: String::new(),
        contact_person: String::new(),
        contact_email: String::new(),
        contact_phone: String::new(),
    };
    let created = store.create_college(&request).await.unwrap();
    assert_eq!(created.id, 2);
    let ids: Vec<i64> = store.colleges().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2, 1]);

    store.delete_college(1).await.unwrap();
    let ids: Vec<i64> = store.colleges().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2]);
}

#[tokio::test]
async fn test_failed_mutation_records_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/colleges"))
        .respond_with(failure(409, "A college with this name already exists."))
        .mount(&server)
        .await;

    let mut store = store_for(&server);
    let request = CreateCollegeRequest {
        name: "Harbour Institute".to_string(),
        address: String::new(),
        contact_person: String::new(),
        contact_email: String::new(),
        contact_phone: String::new(),
    };
    let err = store.create_college(&request).await.unwrap_err();
    assert_eq!(err, "A college with this name already exists.");
    assert_eq!(store.error(), Some("A college with this name already exists."));
    assert!(store.colleges().is_empty());
}

#[tokio::test]
async fn test_new_bill_is_sorted_by_date() {
    let server = MockServer::start().await;
    mount_resources(
        &server,
        &[(
            Resource::Bills,
            ok(page(vec![bill(1, "2025-05-01"), bill(2, "2025-01-01")])),
        )],
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/bills"))
        .respond_with(ok(bill(3, "2025-03-15")))
        .mount(&server)
        .await;

    let mut store = store_for(&server);
    store.sync_all().await.unwrap();

    let request = CreateBillRequest {
        trainer: Some(7),
        date: chrono::NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
        expenses: vec![ExpenseInput {
            expense_type: ExpenseType::Travel,
            description: String::new(),
            amount: 10.0,
        }],
    };
    store.create_bill(&request).await.unwrap();
    let ids: Vec<i64> = store.bills().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1, 3, 2]);
}
