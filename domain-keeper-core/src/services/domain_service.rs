//! 域名管理服务

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::engine::refresh_status;
use crate::error::{CoreError, CoreResult};
use crate::services::{analytics, listing, ServiceContext};
use crate::types::{DomainDraft, DomainQuery, DomainRecord, DomainStatus, IcpRecordStatus};
use crate::validation::ValidatedDraft;

/// 域名管理服务
///
/// Every record leaving this service carries a status recomputed for the
/// `today` passed in; the stored value is never trusted.
pub struct DomainService {
    ctx: Arc<ServiceContext>,
}

impl DomainService {
    /// 创建域名服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 列出全部域名（状态已刷新）
    pub async fn list_domains(&self, today: NaiveDate) -> CoreResult<Vec<DomainRecord>> {
        let mut records = self.ctx.domain_repository.find_all().await?;
        for record in &mut records {
            refresh_or_warn(record, today);
        }
        Ok(records)
    }

    /// 按条件筛选、排序
    pub async fn query_domains(
        &self,
        query: &DomainQuery,
        today: NaiveDate,
    ) -> CoreResult<Vec<DomainRecord>> {
        let records = self.list_domains(today).await?;
        Ok(listing::apply_query(records, query))
    }

    /// 获取域名详情
    pub async fn get_domain(&self, id: &str, today: NaiveDate) -> CoreResult<DomainRecord> {
        let mut record = self
            .ctx
            .domain_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::DomainNotFound(id.to_string()))?;
        refresh_or_warn(&mut record, today);
        Ok(record)
    }

    /// 添加域名
    pub async fn create_domain(
        &self,
        draft: &DomainDraft,
        today: NaiveDate,
    ) -> CoreResult<DomainRecord> {
        let validated = draft.validate()?;
        let now = Utc::now();
        let mut record = build_record(uuid::Uuid::new_v4().to_string(), validated, now, now);
        refresh_status(&mut record, today)?;

        self.ctx.domain_repository.save(&record).await?;
        log::info!("Domain {} ({}) created", record.name, record.id);
        Ok(record)
    }

    /// 编辑域名（整条替换，保留 ID 与创建时间）
    pub async fn update_domain(
        &self,
        id: &str,
        draft: &DomainDraft,
        today: NaiveDate,
    ) -> CoreResult<DomainRecord> {
        let existing = self
            .ctx
            .domain_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::DomainNotFound(id.to_string()))?;
        let validated = draft.validate()?;

        let mut record = build_record(existing.id, validated, existing.created_at, Utc::now());
        refresh_status(&mut record, today)?;

        self.ctx.domain_repository.save(&record).await?;
        log::info!("Domain {} ({}) updated", record.name, record.id);
        Ok(record)
    }

    /// 删除域名
    pub async fn delete_domain(&self, id: &str) -> CoreResult<()> {
        if self.ctx.domain_repository.delete(id).await? {
            log::info!("Domain {id} deleted");
            Ok(())
        } else {
            Err(CoreError::DomainNotFound(id.to_string()))
        }
    }

    /// 重新计算并持久化所有缓存状态
    ///
    /// Returns how many records changed. Nothing is written when none did.
    pub async fn refresh_statuses(&self, today: NaiveDate) -> CoreResult<usize> {
        let stored = self.ctx.domain_repository.find_all().await?;
        let mut refreshed = stored.clone();
        for record in &mut refreshed {
            refresh_or_warn(record, today);
        }

        let changed = stored
            .iter()
            .zip(&refreshed)
            .filter(|(before, after)| before != after)
            .count();
        if changed > 0 {
            self.ctx.domain_repository.save_all(&refreshed).await?;
            log::debug!("Refreshed status of {changed} domains");
        }
        Ok(changed)
    }

    /// 仪表盘汇总
    pub async fn summary(&self, today: NaiveDate) -> CoreResult<analytics::PortfolioSummary> {
        Ok(analytics::summarize(&self.list_domains(today).await?))
    }

    /// 首次运行时写入示例数据
    ///
    /// Returns `true` when the sample set was written.
    pub async fn seed_if_empty(&self, today: NaiveDate) -> CoreResult<bool> {
        if !self.ctx.domain_repository.find_all().await?.is_empty() {
            return Ok(false);
        }

        let mut records = sample_records();
        for record in &mut records {
            refresh_status(record, today)?;
        }
        self.ctx.domain_repository.save_all(&records).await?;
        log::info!("Seeded {} sample domains", records.len());
        Ok(true)
    }
}

fn refresh_or_warn(record: &mut DomainRecord, today: NaiveDate) {
    if let Err(e) = refresh_status(record, today) {
        log::warn!("Cannot derive status of domain {}: {e}", record.id);
    }
}

fn build_record(
    id: String,
    validated: ValidatedDraft,
    created_at: chrono::DateTime<Utc>,
    updated_at: chrono::DateTime<Utc>,
) -> DomainRecord {
    let draft = validated.draft;
    DomainRecord {
        id,
        name: draft.name,
        registrar: draft.registrar,
        dns_provider: draft.dns_provider,
        purchase_date: validated.purchase_date.format("%Y-%m-%d").to_string(),
        expiry_date: validated.expiry_date.format("%Y-%m-%d").to_string(),
        auto_renew: draft.auto_renew,
        status: DomainStatus::default(),
        notes: draft.notes,
        icp_record_number: draft.icp_record_number,
        icp_record_status: draft.icp_record_status,
        ssl_certificate: draft.ssl_certificate,
        created_at,
        updated_at,
    }
}

fn sample_records() -> Vec<DomainRecord> {
    const SAMPLES: [(&str, &str, &str, &str, &str, &str, bool); 3] = [
        ("1", "example.com", "阿里云", "Cloudflare", "2024-01-15", "2025-01-15", true),
        ("2", "test.org", "GoDaddy", "GoDaddy", "2023-06-20", "2024-12-20", false),
        ("3", "demo.net", "Namecheap", "Cloudflare", "2022-03-10", "2024-03-10", false),
    ];

    let now = Utc::now();
    SAMPLES
        .iter()
        .map(
            |&(id, name, registrar, dns_provider, purchase, expiry, auto_renew)| DomainRecord {
                id: id.to_string(),
                name: name.to_string(),
                registrar: registrar.to_string(),
                dns_provider: dns_provider.to_string(),
                purchase_date: purchase.to_string(),
                expiry_date: expiry.to_string(),
                auto_renew,
                status: DomainStatus::default(),
                notes: None,
                icp_record_number: None,
                icp_record_status: IcpRecordStatus::None,
                ssl_certificate: None,
                created_at: now,
                updated_at: now,
            },
        )
        .collect()
}
