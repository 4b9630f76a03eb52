#![allow(dead_code)]

use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use parc_platform::cache::ObjectCache;
use parc_platform::cache::object_cache::moka::MokaCacheWrapper;
use parc_platform::config::AppConfig;
use parc_platform::errors::Result;
use parc_platform::models::users::entities::{User, UserRole, UserStatus};
use parc_platform::models::users::requests::NewUser;
use parc_platform::services::mail::{MailMessage, Mailer};
use parc_platform::storage::Storage;
use parc_platform::storage::sea_orm_storage::SeaOrmStorage;
use parc_platform::utils::password::hash_password;

pub const ADMIN_EMAIL: &str = "admin@parc.test";
pub const PASSWORD: &str = "Welcome2Parc";

/// 记录所有外发邮件
#[derive(Default)]
pub struct CapturingMailer {
    sent: Mutex<Vec<MailMessage>>,
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send(&self, message: MailMessage) -> Result<()> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message);
        Ok(())
    }
}

impl CapturingMailer {
    pub fn sent_to(&self, email: &str) -> Vec<MailMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.to == email)
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

/// 邮件正文中的临时密码
pub fn password_in(message: &MailMessage) -> String {
    message
        .body
        .lines()
        .find_map(|line| line.strip_prefix("Password: "))
        .expect("mail carries a password")
        .to_string()
}

/// 每次登录使用不同的来源地址，避开登录限流
pub fn next_peer() -> SocketAddr {
    static NEXT: AtomicU32 = AtomicU32::new(1);
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    SocketAddr::from(([10, (n >> 16) as u8, (n >> 8) as u8, n as u8], 40000))
}

pub struct TestContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub mailer: Arc<CapturingMailer>,
}

impl TestContext {
    /// 内存 SQLite，每个测试独立一份
    pub async fn new() -> Self {
        let storage = SeaOrmStorage::connect("sqlite::memory:", AppConfig::get())
            .await
            .expect("in-memory database");
        let ctx = Self {
            storage: Arc::new(storage),
            cache: Arc::new(MokaCacheWrapper::new()),
            mailer: Arc::new(CapturingMailer::default()),
        };
        ctx.create_user(ADMIN_EMAIL, UserRole::Admin).await;
        ctx
    }

    pub fn mailer(&self) -> Arc<dyn Mailer> {
        self.mailer.clone()
    }

    /// 直接写入一个可登录的账号，密码为 `PASSWORD`
    pub async fn create_user(&self, email: &str, role: UserRole) -> User {
        let (first_name, last_name) = email
            .split('@')
            .next()
            .and_then(|local| local.split_once('.'))
            .map(|(f, l)| (f.to_string(), l.to_string()))
            .unwrap_or_else(|| ("Test".to_string(), "User".to_string()));
        self.storage
            .create_user(NewUser {
                email: email.to_string(),
                password_hash: hash_password(PASSWORD).expect("hash"),
                role,
                status: UserStatus::Active,
                first_name,
                last_name,
                phone: None,
                expertise: None,
                experience: None,
                college: None,
                education: None,
                resume_path: None,
                must_change_password: false,
            })
            .await
            .expect("create user")
    }
}

/// 构造完整路由的测试服务
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($ctx.storage.clone()))
                .app_data(actix_web::web::Data::new($ctx.cache.clone()))
                .app_data(actix_web::web::Data::new($ctx.mailer()))
                .app_data(
                    actix_web::web::JsonConfig::default()
                        .error_handler(parc_platform::utils::json_error_handler),
                )
                .app_data(
                    actix_web::web::QueryConfig::default()
                        .error_handler(parc_platform::utils::query_error_handler),
                )
                .configure(parc_platform::routes::configure_routes),
        )
        .await
    };
}

/// 登录并返回访问令牌
macro_rules! login {
    ($app:expr, $email:expr) => {
        login!($app, $email, common::PASSWORD)
    };
    ($app:expr, $email:expr, $password:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/v1/auth/token")
            .peer_addr(common::next_peer())
            .set_json(serde_json::json!({ "username": $email, "password": $password }))
            .to_request();
        let resp = actix_web::test::call_service($app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK, "login {}", $email);
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        body["data"]["access"]
            .as_str()
            .expect("access token")
            .to_string()
    }};
}

/// 带令牌发送 JSON 请求，返回状态码与响应体
macro_rules! call {
    ($app:expr, $method:ident, $uri:expr, $token:expr) => {{
        let req = actix_web::test::TestRequest::$method()
            .uri(&$uri)
            .insert_header(("Authorization", format!("Bearer {}", $token)))
            .to_request();
        common::read_response(actix_web::test::call_service($app, req).await).await
    }};
    ($app:expr, $method:ident, $uri:expr, $token:expr, $body:expr) => {{
        let req = actix_web::test::TestRequest::$method()
            .uri(&$uri)
            .insert_header(("Authorization", format!("Bearer {}", $token)))
            .set_json($body)
            .to_request();
        common::read_response(actix_web::test::call_service($app, req).await).await
    }};
}

/// 发送 multipart 表单，`$token` 为 `None` 时不带令牌
macro_rules! upload {
    ($app:expr, $uri:expr, $token:expr, $fields:expr, $file:expr) => {{
        let boundary = "parc-test-boundary";
        let mut req = actix_web::test::TestRequest::post()
            .uri(&$uri)
            .peer_addr(common::next_peer())
            .insert_header((
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            ))
            .set_payload(common::multipart_body(boundary, $fields, $file));
        let token: Option<&str> = $token;
        if let Some(token) = token {
            req = req.insert_header(("Authorization", format!("Bearer {token}")));
        }
        common::read_response(actix_web::test::call_service($app, req.to_request()).await).await
    }};
}

pub async fn read_response<B: actix_web::body::MessageBody>(
    resp: actix_web::dev::ServiceResponse<B>,
) -> (actix_web::http::StatusCode, serde_json::Value) {
    let status = resp.status();
    let bytes = actix_web::test::read_body(resp).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

/// 手工拼装 multipart 请求体
pub fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, file_name, content_type, data)) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
