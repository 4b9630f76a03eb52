use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 登录请求
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct LoginRequest {
    /// 用户名或邮箱
    pub username: String,
    pub password: String,
}

// 刷新令牌请求，body 为空时从 `refresh_token` cookie 读取
#[derive(Debug, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct RefreshTokenRequest {
    pub refresh: Option<String>,
}

// 首次登录设置密码
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct SetPasswordRequest {
    pub password: String,
}
