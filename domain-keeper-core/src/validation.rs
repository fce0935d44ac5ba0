//! Domain form validation

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::engine::parse_calendar_date;
use crate::types::{non_blank, DomainDraft};

/// First label 3-63 chars, then one or more alphabetic labels of 2+ chars.
static DOMAIN_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]{1,61}[a-zA-Z0-9](?:\.[a-zA-Z]{2,})+$")
        .unwrap_or_else(|e| unreachable!("domain name pattern is valid: {e}"))
});

const MAX_DOMAIN_NAME_LEN: usize = 253;
const MAX_NOTES_LEN: usize = 1000;

/// A single field-level failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// camelCase field name, matching the form
    pub field: &'static str,
    pub message: String,
}

/// All failures of one form submission, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Records a failure unless the field already has one.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.0.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// First message, as shown in the toast
    pub fn first_message(&self) -> Option<&str> {
        self.0.first().map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// A draft that passed validation, with its dates parsed
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    /// Trimmed copy of the submitted draft
    pub draft: DomainDraft,
    pub purchase_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

/// 校验域名格式
pub fn is_valid_domain_name(name: &str) -> bool {
    name.len() <= MAX_DOMAIN_NAME_LEN && DOMAIN_NAME_RE.is_match(name)
}

impl DomainDraft {
    /// Checks the draft against the form schema.
    pub fn validate(&self) -> Result<ValidatedDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let draft = self.trimmed();

        if draft.name.chars().count() < 3 {
            errors.add("name", "域名至少需要3个字符");
        } else if draft.name.len() > MAX_DOMAIN_NAME_LEN {
            errors.add("name", "域名长度超出限制");
        } else if !is_valid_domain_name(&draft.name) {
            errors.add("name", "请输入有效的域名格式");
        }

        if draft.registrar.is_empty() {
            errors.add("registrar", "请输入服务商名称");
        }
        if draft.dns_provider.is_empty() {
            errors.add("dnsProvider", "请输入DNS托管商名称");
        }

        let purchase = required_date(
            &draft.purchase_date,
            "purchaseDate",
            "请选择购买日期",
            &mut errors,
        );
        let expiry = required_date(
            &draft.expiry_date,
            "expiryDate",
            "请选择到期日期",
            &mut errors,
        );
        if let (Some(p), Some(e)) = (purchase, expiry) {
            if e <= p {
                errors.add("expiryDate", "到期日期必须晚于购买日期");
            }
        }

        if draft.notes.as_ref().is_some_and(|n| n.chars().count() > MAX_NOTES_LEN) {
            errors.add("notes", format!("备注不能超过{MAX_NOTES_LEN}个字符"));
        }

        if let Some(ref cert) = draft.ssl_certificate {
            if cert.provider.trim().is_empty() {
                errors.add("sslCertificate", "请输入证书颁发机构");
            }
            let issued = parse_calendar_date(&cert.issue_date).ok();
            let expires = parse_calendar_date(&cert.expiry_date).ok();
            match (issued, expires) {
                (Some(i), Some(e)) if e <= i => {
                    errors.add("sslCertificate", "证书到期日期必须晚于签发日期");
                }
                (Some(_), Some(_)) => {}
                _ => errors.add("sslCertificate", "证书日期格式无效"),
            }
        }

        match (purchase, expiry) {
            (Some(purchase_date), Some(expiry_date)) if errors.is_empty() => Ok(ValidatedDraft {
                draft,
                purchase_date,
                expiry_date,
            }),
            _ => Err(errors),
        }
    }

    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_lowercase(),
            registrar: self.registrar.trim().to_string(),
            dns_provider: self.dns_provider.trim().to_string(),
            purchase_date: self.purchase_date.trim().to_string(),
            expiry_date: self.expiry_date.trim().to_string(),
            auto_renew: self.auto_renew,
            notes: non_blank(self.notes.clone()),
            icp_record_number: non_blank(self.icp_record_number.clone()),
            icp_record_status: self.icp_record_status,
            ssl_certificate: self.ssl_certificate.clone(),
        }
    }
}

fn required_date(
    raw: &str,
    field: &'static str,
    missing: &str,
    errors: &mut ValidationErrors,
) -> Option<NaiveDate> {
    if raw.is_empty() {
        errors.add(field, missing);
        return None;
    }
    match parse_calendar_date(raw) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, "日期格式无效");
            None
        }
    }
}
