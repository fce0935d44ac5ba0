//! Domain record type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derived lifecycle status of a domain (or SSL certificate)
///
/// Never authoritative: always recomputed from the expiry date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DomainStatus {
    /// More than the horizon away from expiry
    #[default]
    Active,
    /// Inside the expiry window (today included)
    ExpiringSoon,
    /// Expiry date already passed
    Expired,
    /// Stored expiry date does not parse
    Unknown,
}

impl DomainStatus {
    /// Statuses a readable date can produce, in display order
    pub const ALL: [Self; 3] = [Self::Active, Self::ExpiringSoon, Self::Expired];

    /// Dashboard label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "活跃",
            Self::ExpiringSoon => "即将到期",
            Self::Expired => "已过期",
            Self::Unknown => "日期无效",
        }
    }
}

/// ICP 备案状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IcpRecordStatus {
    Verified,
    Pending,
    Invalid,
    #[default]
    None,
}

/// SSL certificate metadata attached to a domain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SslCertificate {
    /// Issuing CA / provider
    pub provider: String,
    /// Issue date as persisted (`YYYY-MM-DD`)
    pub issue_date: String,
    /// Expiry date as persisted (`YYYY-MM-DD`)
    pub expiry_date: String,
    /// Cached status, recomputed from `expiry_date` on read
    #[serde(default)]
    pub status: DomainStatus,
    #[serde(default)]
    pub auto_renew: bool,
}

/// One tracked domain, in its persisted shape
///
/// Dates stay as strings so a single malformed entry in storage does not make
/// the whole collection unreadable; parse them through
/// [`crate::engine::parse_calendar_date`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DomainRecord {
    /// Domain ID (UUID)
    pub id: String,
    /// domain name
    pub name: String,
    /// Registrar the domain was bought from
    pub registrar: String,
    /// DNS hosting provider
    pub dns_provider: String,
    pub purchase_date: String,
    pub expiry_date: String,
    #[serde(default)]
    pub auto_renew: bool,
    /// Cached status, recomputed from `expiry_date` on read
    #[serde(default)]
    pub status: DomainStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// ICP 备案号
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icp_record_number: Option<String>,
    #[serde(default)]
    pub icp_record_status: IcpRecordStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_certificate: Option<SslCertificate>,
    /// 创建时间
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    /// 更新时间
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
}

impl DomainRecord {
    /// 刷新更新时间
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Create/edit form payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DomainDraft {
    pub name: String,
    pub registrar: String,
    pub dns_provider: String,
    pub purchase_date: String,
    pub expiry_date: String,
    #[serde(default)]
    pub auto_renew: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub icp_record_number: Option<String>,
    #[serde(default)]
    pub icp_record_status: IcpRecordStatus,
    #[serde(default)]
    pub ssl_certificate: Option<SslCertificate>,
}

/// Empty optional text fields from the form are stored as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
