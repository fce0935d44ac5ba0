//! 域名列表查询参数

use serde::{Deserialize, Serialize};

use super::DomainStatus;

/// 排序字段
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    Registrar,
    #[default]
    ExpiryDate,
}

/// 排序方向
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// 切换方向
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// 域名列表筛选与排序
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainQuery {
    /// Case-insensitive match on name, registrar or DNS provider
    pub search: Option<String>,
    /// `None` means all statuses
    pub status: Option<DomainStatus>,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}
