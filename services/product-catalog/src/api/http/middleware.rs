//! 认证中间件

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use onyx_auth_core::{Claims, TokenService};
use onyx_errors::AppError;
use tracing::{debug, warn};

/// 认证 Claims 提取器
///
/// 必须在 auth_middleware 之后使用
pub struct AuthClaims(pub Claims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthClaims)
            .ok_or_else(|| AppError::unauthenticated("Missing claims in request extensions"))
    }
}

/// JWT 认证中间件
///
/// 校验 Bearer 令牌并将 Claims 注入请求扩展
pub async fn auth_middleware(
    State(token_service): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        warn!("Missing or invalid authorization header");
        return Err(AppError::unauthenticated("Bearer token required"));
    };

    let claims = token_service.validate_token(token).map_err(|e| {
        warn!(error = %e, "Token validation failed");
        e
    })?;

    debug!(user = %claims.sub, "Token validated");
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
    };
    use onyx_auth_core::Role;
    use tower::ServiceExt;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn token_service(expires_in: i64) -> Arc<TokenService> {
        Arc::new(TokenService::new(
            SECRET,
            expires_in,
            "onyx-products".to_string(),
            "onyx-products-api".to_string(),
        ))
    }

    async fn whoami(AuthClaims(claims): AuthClaims) -> String {
        claims.sub
    }

    fn app(tokens: Arc<TokenService>) -> Router {
        Router::new()
            .route("/", get(whoami))
            .layer(middleware::from_fn_with_state(tokens, auth_middleware))
    }

    async fn call(app: Router, auth: Option<String>) -> StatusCode {
        let mut builder = Request::builder().uri("/");
        if let Some(auth) = auth {
            builder = builder.header("Authorization", auth);
        }
        app.oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_valid_token_passes_claims_through() {
        let tokens = token_service(3600);
        let token = tokens.generate_token("readuser", &[Role::ProductRead]).unwrap();

        let status = call(app(tokens), Some(format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        assert_eq!(call(app(token_service(3600)), None).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_unauthorized() {
        let status = call(app(token_service(3600)), Some("Basic dXNlcjpwYXNz".into())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthorized() {
        let status = call(app(token_service(3600)), Some("Bearer invalid_token".into())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let expired = token_service(-3600);
        let token = expired.generate_token("readuser", &[Role::ProductRead]).unwrap();

        let status = call(app(token_service(3600)), Some(format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
