//! onyx-auth-core - 认证核心库
//!
//! JWT/Claims/RBAC 核心逻辑

mod policy;

pub use policy::*;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use onyx_errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Expiration time
    pub exp: i64,
    /// Issued at
    pub iat: i64,
    /// JWT ID
    pub jti: String,
    /// Issuer
    #[serde(default)]
    pub iss: String,
    /// Audience
    #[serde(default)]
    pub aud: String,
    /// Roles
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Claims {
    pub fn new(
        username: &str,
        roles: &[Role],
        expires_in_secs: i64,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: username.to_string(),
            name: username.to_string(),
            exp: (now + Duration::seconds(expires_in_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            roles: roles.iter().map(|r| r.as_str().to_string()).collect(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }

    /// 可识别的角色，未知角色名被忽略
    pub fn known_roles(&self) -> Vec<Role> {
        self.roles.iter().filter_map(|r| r.parse().ok()).collect()
    }
}

/// Token 服务
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: i64,
    issuer: String,
    audience: String,
}

impl TokenService {
    pub fn new(secret: &str, expires_in: i64, issuer: String, audience: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
            issuer,
            audience,
        }
    }

    /// 生成访问令牌
    pub fn generate_token(&self, username: &str, roles: &[Role]) -> AppResult<String> {
        let claims = Claims::new(
            username,
            roles,
            self.expires_in,
            &self.issuer,
            &self.audience,
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))
    }

    /// 验证令牌
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 0; // 不允许时间偏差

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::unauthenticated(format!("Invalid token: {}", e)))?;

        let claims = token_data.claims;

        if claims.jti.is_empty() {
            return Err(AppError::unauthenticated("Token ID (jti) missing"));
        }

        if claims.sub.is_empty() {
            return Err(AppError::unauthenticated("Token subject missing"));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn service(expires_in: i64) -> TokenService {
        TokenService::new(
            SECRET,
            expires_in,
            "onyx-products".to_string(),
            "onyx-products-api".to_string(),
        )
    }

    #[test]
    fn test_generate_and_validate() {
        let tokens = service(3600);
        let token = tokens
            .generate_token("writeuser", &[Role::ProductRead, Role::ProductWrite])
            .unwrap();

        let claims = tokens.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "writeuser");
        assert_eq!(claims.iss, "onyx-products");
        assert_eq!(claims.aud, "onyx-products-api");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(claims.has_role(Role::ProductWrite));
        assert!(!claims.has_role(Role::ProductAdmin));
        assert_eq!(
            claims.known_roles(),
            vec![Role::ProductRead, Role::ProductWrite]
        );
    }

    #[test]
    fn test_each_token_has_unique_id() {
        let tokens = service(3600);
        let a = tokens.generate_token("readuser", &[Role::ProductRead]).unwrap();
        let b = tokens.generate_token("readuser", &[Role::ProductRead]).unwrap();

        let a = tokens.validate_token(&a).unwrap();
        let b = tokens.validate_token(&b).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = service(-3600);
        let token = tokens.generate_token("readuser", &[Role::ProductRead]).unwrap();

        let err = tokens.validate_token(&token).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let other = TokenService::new(
            "fedcba9876543210fedcba9876543210",
            3600,
            "onyx-products".to_string(),
            "onyx-products-api".to_string(),
        );
        let token = other.generate_token("adminuser", &[Role::ProductAdmin]).unwrap();

        assert!(service(3600).validate_token(&token).is_err());
    }

    #[test]
    fn test_wrong_audience_is_rejected() {
        let other = TokenService::new(
            SECRET,
            3600,
            "onyx-products".to_string(),
            "someone-else".to_string(),
        );
        let token = other.generate_token("adminuser", &[Role::ProductAdmin]).unwrap();

        assert!(service(3600).validate_token(&token).is_err());
    }

    #[test]
    fn test_unknown_roles_are_ignored_by_policy() {
        let mut claims = Claims::new("x", &[], 60, "i", "a");
        claims.roles = vec!["SomethingElse".to_string()];

        assert!(claims.known_roles().is_empty());
        assert!(Policy::Read.authorize(&claims).is_err());
    }
}
