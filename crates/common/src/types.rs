//! 通用类型定义

use serde::{Deserialize, Serialize};

/// 分页参数
///
/// 页码从 1 开始。只有页码和页大小同时给出且都为正数时才会构造，
/// 否则调用方应当按不分页处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Pagination {
    /// 从可选的查询参数构造分页
    pub fn from_optional(page: Option<i32>, page_size: Option<i32>) -> Option<Self> {
        match (page, page_size) {
            (Some(page), Some(page_size)) if page > 0 && page_size > 0 => Some(Self {
                page: page as u32,
                page_size: page_size as u32,
            }),
            _ => None,
        }
    }

    /// 跳过的记录数
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// 取出的记录数
    pub fn take(&self) -> u64 {
        u64::from(self.page_size)
    }
}
