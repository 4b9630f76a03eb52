//! REST 客户端
//!
//! 持有令牌对，所有请求带 `Authorization: Bearer`。`*_once` 系列不做刷新重试，
//! 供批量同步自行决定何时刷新；其余请求遇到 401 时刷新一次后重放。

use reqwest::{Method, StatusCode, multipart};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::RwLock;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::{ClientError, ClientResult};
use crate::models::auth::requests::{LoginRequest, RefreshTokenRequest};
use crate::models::auth::responses::{LoginResponse, RefreshTokenResponse};

pub const API_PREFIX: &str = "/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Default)]
struct Tokens {
    access: Option<String>,
    refresh: Option<String>,
}

/// 待上传的文件及附带的表单字段，重放时重新构造 multipart
#[derive(Debug, Clone)]
pub struct Upload {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
    pub fields: Vec<(String, String)>,
}

impl Upload {
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
            fields: Vec::new(),
        }
    }

    pub fn text(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((name.into(), value.to_string()));
        self
    }

    fn to_form(&self) -> ClientResult<multipart::Form> {
        let part = multipart::Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime)
            .map_err(ClientError::from)?;
        let form = self
            .fields
            .iter()
            .fold(multipart::Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            });
        Ok(form.part(self.field.clone(), part))
    }
}

/// 响应信封，只取客户端关心的字段
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

enum Body<'a> {
    Empty,
    Json(Value),
    Multipart(&'a Upload),
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: RwLock<Tokens>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens: RwLock::new(Tokens::default()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    fn read_tokens(&self) -> Tokens {
        self.tokens
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn write_tokens(&self, update: impl FnOnce(&mut Tokens)) {
        let mut tokens = self
            .tokens
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        update(&mut tokens);
    }

    pub fn access_token(&self) -> Option<String> {
        self.read_tokens().access
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    pub fn set_tokens(&self, access: impl Into<String>, refresh: Option<String>) {
        let access = access.into();
        self.write_tokens(|tokens| {
            tokens.access = Some(access);
            tokens.refresh = refresh;
        });
    }

    pub fn clear_tokens(&self) {
        self.write_tokens(|tokens| *tokens = Tokens::default());
    }

    /// 登录并保存令牌对
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = serde_json::to_value(LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        let data = self
            .execute(Method::POST, "/auth/token", Body::Json(body), false)
            .await?;
        let login: LoginResponse = serde_json::from_value(data)?;
        self.set_tokens(login.access.clone(), Some(login.refresh.clone()));
        Ok(login)
    }

    /// 用刷新令牌换新的访问令牌，失败时清空令牌
    pub async fn refresh(&self) -> ClientResult<()> {
        let Some(refresh) = self.read_tokens().refresh else {
            return Err(ClientError::Unauthorized(
                "No refresh token available.".to_string(),
            ));
        };

        let body = serde_json::to_value(RefreshTokenRequest {
            refresh: Some(refresh),
        })?;
        match self
            .execute(Method::POST, "/auth/refresh", Body::Json(body), false)
            .await
            .and_then(|data| Ok(serde_json::from_value::<RefreshTokenResponse>(data)?))
        {
            Ok(refreshed) => {
                debug!("Access token refreshed");
                self.write_tokens(|tokens| tokens.access = Some(refreshed.access));
                Ok(())
            }
            Err(e) => {
                warn!("Token refresh failed: {}", e);
                self.clear_tokens();
                Err(match e {
                    ClientError::Api { message, .. } => ClientError::Unauthorized(message),
                    other => other,
                })
            }
        }
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Body<'_>,
        authorized: bool,
    ) -> ClientResult<Value> {
        let mut request = self.http.request(method.clone(), self.url(path));
        if authorized && let Some(access) = self.access_token() {
            request = request.bearer_auth(access);
        }
        request = match body {
            Body::Empty => request,
            Body::Json(value) => request.json(&value),
            Body::Multipart(upload) => request.multipart(upload.to_form()?),
        };

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!("{} {} -> {}", method, path, status);

        let envelope = serde_json::from_str::<Envelope>(&text).ok();
        if status.is_success() {
            let envelope = envelope.ok_or_else(|| {
                ClientError::Decode(format!("{method} {path} returned a non-JSON body"))
            })?;
            return Ok(envelope.data.unwrap_or(Value::Null));
        }

        let message = envelope
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
        if status == StatusCode::UNAUTHORIZED {
            Err(ClientError::Unauthorized(message))
        } else {
            Err(ClientError::Api { status, message })
        }
    }

    /// 401 时刷新一次并重放
    async fn execute_with_refresh(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        upload: Option<&Upload>,
    ) -> ClientResult<Value> {
        let make_body = || match (body, upload) {
            (_, Some(upload)) => Body::Multipart(upload),
            (Some(value), None) => Body::Json(value.clone()),
            (None, None) => Body::Empty,
        };

        match self.execute(method.clone(), path, make_body(), true).await {
            Err(ClientError::Unauthorized(_)) if self.read_tokens().refresh.is_some() => {
                self.refresh().await?;
                self.execute(method, path, make_body(), true).await
            }
            other => other,
        }
    }

    /// 单次 GET，不刷新令牌
    pub async fn get_value_once(&self, path: &str) -> ClientResult<Value> {
        self.execute(Method::GET, path, Body::Empty, true).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let data = self
            .execute_with_refresh(Method::GET, path, None, None)
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    pub async fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<Value> {
        let body = serde_json::to_value(body)?;
        self.execute_with_refresh(method, path, Some(&body), None)
            .await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let data = self.send_json(Method::POST, path, body).await?;
        Ok(serde_json::from_value(data)?)
    }

    pub async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let data = self.send_json(Method::PATCH, path, body).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// 无请求体的 POST（审批、付款等动作）
    pub async fn post_action(&self, path: &str) -> ClientResult<Value> {
        self.execute_with_refresh(Method::POST, path, None, None)
            .await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.execute_with_refresh(Method::DELETE, path, None, None)
            .await
            .map(|_| ())
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        upload: &Upload,
    ) -> ClientResult<T> {
        let data = self
            .execute_with_refresh(Method::POST, path, None, Some(upload))
            .await?;
        Ok(serde_json::from_value(data)?)
    }
}
