//! 演示令牌签发

use std::sync::Arc;

use metrics::counter;
use onyx_auth_core::TokenService;
use onyx_telemetry::TOKENS_ISSUED_TOTAL;
use tracing::{error, info, warn};

use crate::domain::IdentityDirectory;
use crate::error::TokenError;

/// 用户名 → 角色 → 签名令牌；未知用户直接拒绝
#[derive(Clone)]
pub struct TokenIssuer {
    directory: Arc<IdentityDirectory>,
    tokens: Arc<TokenService>,
}

impl TokenIssuer {
    pub fn new(directory: IdentityDirectory, tokens: Arc<TokenService>) -> Self {
        Self {
            directory: Arc::new(directory),
            tokens,
        }
    }

    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        let Some(roles) = self.directory.roles_for(username) else {
            warn!(username, "Token requested for unknown user");
            return Err(TokenError::UnknownUser);
        };

        let token = self.tokens.generate_token(username, roles).map_err(|e| {
            error!(error = %e, "Failed to sign token");
            TokenError::Signing
        })?;

        counter!(TOKENS_ISSUED_TOTAL).increment(1);
        info!(username, roles = roles.len(), "Token issued");
        Ok(token)
    }
}
