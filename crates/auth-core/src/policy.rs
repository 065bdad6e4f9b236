//! 角色与授权策略
//!
//! 写权限蕴含读权限：持有 Write 或 Admin 的调用方同样满足 Read 策略。

use std::fmt;
use std::str::FromStr;

use onyx_errors::{AppError, AppResult};

use crate::Claims;

/// 产品目录角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    ProductRead,
    ProductWrite,
    ProductAdmin,
}

impl Role {
    /// 令牌中的角色名
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::ProductRead => "ProductReadAccess",
            Role::ProductWrite => "ProductWriteAccess",
            Role::ProductAdmin => "ProductAdminAccess",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ProductReadAccess" => Ok(Role::ProductRead),
            "ProductWriteAccess" => Ok(Role::ProductWrite),
            "ProductAdminAccess" => Ok(Role::ProductAdmin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// 授权策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Read,
    Write,
    Admin,
}

const READ_ROLES: &[Role] = &[Role::ProductRead, Role::ProductWrite, Role::ProductAdmin];
const WRITE_ROLES: &[Role] = &[Role::ProductWrite, Role::ProductAdmin];
const ADMIN_ROLES: &[Role] = &[Role::ProductAdmin];

impl Policy {
    /// 满足该策略的角色集合
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Policy::Read => READ_ROLES,
            Policy::Write => WRITE_ROLES,
            Policy::Admin => ADMIN_ROLES,
        }
    }

    /// 任一角色落在允许集合中即放行
    pub fn is_satisfied_by(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.allowed_roles().contains(role))
    }

    /// 基于令牌 Claims 做授权检查
    pub fn authorize(&self, claims: &Claims) -> AppResult<()> {
        if self.is_satisfied_by(&claims.known_roles()) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Missing capability for {:?} policy",
                self
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names_round_trip() {
        for role in [Role::ProductRead, Role::ProductWrite, Role::ProductAdmin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("ProductDeleteAccess".parse::<Role>().is_err());
    }

    #[test]
    fn test_write_policy() {
        assert!(!Policy::Write.is_satisfied_by(&[Role::ProductRead]));
        assert!(Policy::Write.is_satisfied_by(&[Role::ProductWrite]));
        assert!(Policy::Write.is_satisfied_by(&[Role::ProductAdmin]));
        assert!(!Policy::Write.is_satisfied_by(&[]));
    }

    #[test]
    fn test_read_policy() {
        assert!(Policy::Read.is_satisfied_by(&[Role::ProductRead]));
        assert!(Policy::Read.is_satisfied_by(&[Role::ProductWrite]));
        assert!(Policy::Read.is_satisfied_by(&[Role::ProductAdmin]));
        assert!(!Policy::Read.is_satisfied_by(&[]));
    }

    #[test]
    fn test_writers_are_readers() {
        for role in Policy::Write.allowed_roles() {
            assert!(Policy::Read.allowed_roles().contains(role));
        }
    }

    #[test]
    fn test_admin_policy() {
        assert!(Policy::Admin.is_satisfied_by(&[Role::ProductAdmin]));
        assert!(!Policy::Admin.is_satisfied_by(&[Role::ProductRead, Role::ProductWrite]));
    }
}
