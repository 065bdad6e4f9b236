//! 演示身份目录
//!
//! 启动时构建、之后只读的用户名到角色映射

use std::collections::{BTreeMap, HashMap, hash_map::Entry};

use onyx_auth_core::{Role, UnknownRole};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityConfigError {
    #[error(transparent)]
    UnknownRole(#[from] UnknownRole),

    /// 用户名查找不区分大小写，仅大小写不同的两个条目会互相覆盖
    #[error("Duplicate identity '{0}' (usernames are case-insensitive)")]
    DuplicateUser(String),
}

#[derive(Debug, Clone)]
pub struct IdentityDirectory {
    users: HashMap<String, Vec<Role>>,
}

impl IdentityDirectory {
    /// 默认的三个演示用户
    pub fn demo() -> Self {
        let users = HashMap::from([
            ("readuser".to_string(), vec![Role::ProductRead]),
            (
                "writeuser".to_string(),
                vec![Role::ProductRead, Role::ProductWrite],
            ),
            (
                "adminuser".to_string(),
                vec![Role::ProductRead, Role::ProductWrite, Role::ProductAdmin],
            ),
        ]);
        Self { users }
    }

    /// 从配置覆盖构建，角色名必须可识别
    pub fn from_config(
        entries: &BTreeMap<String, Vec<String>>,
    ) -> Result<Self, IdentityConfigError> {
        let mut users = HashMap::with_capacity(entries.len());
        for (username, role_names) in entries {
            let roles = role_names
                .iter()
                .map(|name| name.parse::<Role>())
                .collect::<Result<Vec<_>, _>>()?;

            match users.entry(username.to_lowercase()) {
                Entry::Occupied(_) => {
                    return Err(IdentityConfigError::DuplicateUser(username.clone()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(roles);
                }
            }
        }
        Ok(Self { users })
    }

    /// 配置了覆盖则使用覆盖，否则使用演示用户
    pub fn from_optional_config(
        entries: Option<&BTreeMap<String, Vec<String>>>,
    ) -> Result<Self, IdentityConfigError> {
        match entries {
            Some(entries) => Self::from_config(entries),
            None => Ok(Self::demo()),
        }
    }

    /// 不区分大小写查找
    pub fn roles_for(&self, username: &str) -> Option<&[Role]> {
        self.users
            .get(&username.to_lowercase())
            .map(|roles| roles.as_slice())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for IdentityDirectory {
    fn default() -> Self {
        Self::demo()
    }
}
