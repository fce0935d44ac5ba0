#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppStateBuilder` and `AppState` over real adapters.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use domain_keeper_app::adapters::{JsonFileStore, MemoryStore};
use domain_keeper_app::{AppState, AppStateBuilder};
use domain_keeper_core::error::{CoreError, CoreResult};
use domain_keeper_core::reminder::{ReminderEvent, ReminderKind};
use domain_keeper_core::traits::{KeyValueStore, NotificationSink, DOMAINS_KEY, USER_SETTINGS_KEY};
use domain_keeper_core::types::{DomainDraft, DomainStatus, UserSettings};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn draft(name: &str, expiry: &str) -> DomainDraft {
    DomainDraft {
        name: name.to_string(),
        registrar: "阿里云".to_string(),
        dns_provider: "Cloudflare".to_string(),
        purchase_date: "2024-01-15".to_string(),
        expiry_date: expiry.to_string(),
        ..DomainDraft::default()
    }
}

/// Collects delivered reminders
#[derive(Default)]
struct CollectingSink {
    events: RwLock<Vec<(String, ReminderEvent)>>,
}

#[async_trait]
impl NotificationSink for CollectingSink {
    async fn notify(&self, recipient: &str, event: &ReminderEvent) -> CoreResult<()> {
        self.events
            .write()
            .await
            .push((recipient.to_string(), event.clone()));
        Ok(())
    }
}

fn file_state(path: &std::path::Path) -> AppState {
    AppStateBuilder::new()
        .store(Arc::new(JsonFileStore::new(path)))
        .build()
}

#[tokio::test]
async fn domains_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("domain-keeper.json");
    let today = date("2025-01-01");

    let created = file_state(&path)
        .domain_service
        .create_domain(&draft("Example.com", "2025-01-20"), today)
        .await
        .unwrap();
    assert_eq!(created.name, "example.com");
    assert_eq!(created.status, DomainStatus::ExpiringSoon);

    let reopened = file_state(&path);
    let listed = reopened.domain_service.list_domains(today).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].created_at, created.created_at);

    // a later day re-derives the cached status
    let later = reopened
        .domain_service
        .get_domain(&created.id, date("2025-02-01"))
        .await
        .unwrap();
    assert_eq!(later.status, DomainStatus::Expired);
}

#[tokio::test]
async fn stale_stored_status_is_overwritten() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(
            DOMAINS_KEY,
            r#"[{"id":"1","name":"old.com","registrar":"GoDaddy","dnsProvider":"Cloudflare",
                "purchaseDate":"2020-01-01","expiryDate":"2024-03-10","status":"active",
                "createdAt":"2020-01-01T00:00:00Z","updatedAt":"2020-01-01T00:00:00Z"}]"#
                .to_string(),
        )
        .await
        .unwrap();

    let state = AppStateBuilder::new().store(store).build();
    let listed = state
        .domain_service
        .list_domains(date("2024-12-18"))
        .await
        .unwrap();
    assert_eq!(listed[0].status, DomainStatus::Expired);
}

#[tokio::test]
async fn startup_seeds_once() {
    let state = AppStateBuilder::new().build();
    state.run_startup().await.unwrap();
    let first = state.domain_service.list_domains(date("2025-01-01")).await.unwrap();
    assert_eq!(first.len(), 3);

    state.run_startup().await.unwrap();
    let second = state.domain_service.list_domains(date("2025-01-01")).await.unwrap();
    assert_eq!(second.len(), 3);
}

#[tokio::test]
async fn delete_unknown_domain_fails() {
    let state = AppStateBuilder::new().build();
    let err = state.domain_service.delete_domain("nope").await.unwrap_err();
    assert!(matches!(err, CoreError::DomainNotFound(_)));
}

#[tokio::test]
async fn reminders_reach_the_configured_address() {
    let sink = Arc::new(CollectingSink::default());
    let state = AppStateBuilder::new()
        .notification_sink(sink.clone())
        .build();
    let today = date("2025-01-01");

    let mut settings = UserSettings::default();
    settings.email = "ops@example.com".to_string();
    state.settings_service.save(settings).await.unwrap();
    state
        .domain_service
        .create_domain(&draft("soon.com", "2025-01-08"), today)
        .await
        .unwrap();
    state
        .domain_service
        .create_domain(&draft("later.com", "2026-01-08"), today)
        .await
        .unwrap();

    let report = state.reminder_service.run(today).await.unwrap();
    assert_eq!(report.delivered.len(), 1);
    assert_eq!(state.reminder_service.run(today).await.unwrap().duplicates, 1);

    let events = sink.events.read().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, "ops@example.com");
    assert_eq!(events[0].1.kind, ReminderKind::DomainExpiry);
    assert_eq!(events[0].1.threshold_days, 7);
}

#[tokio::test]
async fn reminders_are_not_resent_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("domain-keeper.json");
    let today = date("2025-01-01");

    let first_sink = Arc::new(CollectingSink::default());
    let first = AppStateBuilder::new()
        .store(Arc::new(JsonFileStore::new(&path)))
        .notification_sink(first_sink.clone())
        .build();
    first
        .domain_service
        .create_domain(&draft("soon.com", "2025-01-08"), today)
        .await
        .unwrap();
    assert_eq!(first.reminder_service.run(today).await.unwrap().delivered.len(), 1);

    let second_sink = Arc::new(CollectingSink::default());
    let second = AppStateBuilder::new()
        .store(Arc::new(JsonFileStore::new(&path)))
        .notification_sink(second_sink.clone())
        .build();
    let report = second.reminder_service.run(today).await.unwrap();
    assert!(report.delivered.is_empty());
    assert_eq!(report.duplicates, 1);
    assert!(second_sink.events.read().await.is_empty());

    // next threshold still fires on a later day
    let later = second.reminder_service.run(date("2025-01-05")).await.unwrap();
    assert_eq!(later.delivered.len(), 1);
    assert_eq!(later.delivered[0].threshold_days, 3);
}

#[tokio::test]
async fn corrupt_settings_fall_back_to_defaults() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(USER_SETTINGS_KEY, "not json".to_string())
        .await
        .unwrap();

    let state = AppStateBuilder::new().store(store).build();
    assert_eq!(
        state.settings_service.load().await.unwrap(),
        UserSettings::default()
    );
}
