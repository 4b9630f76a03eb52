use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN: &str = "access";
pub const REFRESH_TOKEN: &str = "refresh";
pub const REFRESH_COOKIE: &str = "refresh_token";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // 用户 ID
    pub role: String,       // 用户角色（大写）
    pub token_type: String, // "access" 或 "refresh"
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub must_change_password: bool,
    /// 学员所在批次
    #[serde(default)]
    pub batches: Vec<i64>,
    /// 学员所学课程名称
    #[serde(default)]
    pub courses: Vec<String>,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// 签发 access token 需要的用户信息
#[derive(Debug, Clone, Default)]
pub struct TokenSubject {
    pub user_id: i64,
    pub role: String,
    pub username: String,
    pub name: String,
    pub must_change_password: bool,
    pub batches: Vec<i64>,
    pub courses: Vec<String>,
}

pub struct JwtUtils;

impl JwtUtils {
    fn secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    /// access token 有效期（秒）
    pub fn access_token_ttl() -> i64 {
        AppConfig::get().jwt.access_token_expiry * 60
    }

    pub fn generate_access_token(
        subject: &TokenSubject,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: subject.user_id.to_string(),
            role: subject.role.clone(),
            token_type: ACCESS_TOKEN.to_string(),
            username: subject.username.clone(),
            name: subject.name.clone(),
            must_change_password: subject.must_change_password,
            batches: subject.batches.clone(),
            courses: subject.courses.clone(),
            exp: (now + chrono::Duration::seconds(Self::access_token_ttl())).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        Self::sign(&claims)
    }

    /// refresh token 只携带身份，刷新时重新读取用户
    pub fn generate_refresh_token(
        user_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiry = chrono::Duration::days(AppConfig::get().jwt.refresh_token_expiry);
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: REFRESH_TOKEN.to_string(),
            username: String::new(),
            name: String::new(),
            must_change_password: false,
            batches: Vec::new(),
            courses: Vec::new(),
            exp: (now + expiry).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        Self::sign(&claims)
    }

    fn sign(claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        let secret = Self::secret();
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
    }

    pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let secret = Self::secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());

        decode::<Claims>(token, &decoding_key, &Validation::default()).map(|data| data.claims)
    }

    fn verify_token_type(
        token: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = Self::verify_token(token)?;
        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token_type(token, ACCESS_TOKEN)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token_type(token, REFRESH_TOKEN)
    }

    /// 创建 Refresh Token Cookie
    pub fn create_refresh_token_cookie(refresh_token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE, refresh_token.to_string())
            .path("/api/v1/auth")
            .max_age(actix_web::cookie::time::Duration::days(
                config.jwt.refresh_token_expiry,
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> TokenSubject {
        TokenSubject {
            user_id: 42,
            role: "STUDENT".to_string(),
            username: "ada@example.com".to_string(),
            name: "Ada Lovelace".to_string(),
            must_change_password: true,
            batches: vec![3, 5],
            courses: vec!["Rust Basics".to_string()],
        }
    }

    #[test]
    fn test_access_token_carries_profile_claims() {
        let token = JwtUtils::generate_access_token(&student()).unwrap();
        let claims = JwtUtils::verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.role, "STUDENT");
        assert_eq!(claims.batches, vec![3, 5]);
        assert_eq!(claims.courses, vec!["Rust Basics".to_string()]);
        assert!(claims.must_change_password);
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let access = JwtUtils::generate_access_token(&student()).unwrap();
        let refresh = JwtUtils::generate_refresh_token(42, "STUDENT").unwrap();
        assert!(JwtUtils::verify_refresh_token(&access).is_err());
        assert!(JwtUtils::verify_access_token(&refresh).is_err());
        assert!(JwtUtils::verify_refresh_token(&refresh).is_ok());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let mut token = JwtUtils::generate_access_token(&student()).unwrap();
        token.push('x');
        assert!(JwtUtils::verify_token(&token).is_err());
    }
}
