//! Audit log behaviour: dedup window, hydration suppression, host CRUD entries

use adminboard_config::KanbanConfig;
use adminboard_kanban::test_support::{MemoryAuditLog, RecordingNotifier, ScriptedPersistence};
use adminboard_kanban::{
    AuditAction, AuditDisposition, AuditLogEntry, BoardEvent, KanbanOrchestrator, Ports, Record,
    RecordBoard, RecordId, RecordKind, Status, Viewer,
};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

const REVISION_DATE: &str = "최신 개정일";
const REVISION: &str = "최신 개정";

fn document() -> Record {
    Record::new(31u64, RecordKind::RegulationDocument, "SEC-2024-031", "정보보호 관리지침")
        .with_team("정보보호팀")
        .with_assignee("최보안")
        .with_date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
}

fn setup() -> (KanbanOrchestrator, Arc<MemoryAuditLog>) {
    let audit_log = Arc::new(MemoryAuditLog::new());
    let ports = Ports::new(
        Arc::new(ScriptedPersistence::new()),
        audit_log.clone(),
        Arc::new(RecordingNotifier::new()),
    );
    let board = Arc::new(RecordBoard::with_records([document()]));
    let kanban = KanbanOrchestrator::new(
        &KanbanConfig::default(),
        board,
        ports,
        Viewer::new("최보안"),
    )
    .unwrap();
    (kanban, audit_log)
}

#[tokio::test(start_paused = true)]
async fn test_identical_entries_within_window_written_once() {
    let (kanban, audit_log) = setup();
    let entry = AuditLogEntry::status_change(&document(), Status::Done, "최보안");

    assert!(kanban.audit().submit(entry.clone()).await.is_written());
    tokio::time::advance(Duration::from_millis(1000)).await;
    assert_eq!(
        kanban.audit().submit(entry.clone()).await,
        AuditDisposition::Suppressed
    );
    tokio::time::advance(Duration::from_millis(999)).await;
    assert_eq!(
        kanban.audit().submit(entry).await,
        AuditDisposition::Suppressed
    );

    assert_eq!(audit_log.entries().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_identical_entries_2100ms_apart_both_written() {
    let (kanban, audit_log) = setup();
    let entry = AuditLogEntry::status_change(&document(), Status::Done, "최보안");

    assert!(kanban.audit().submit(entry.clone()).await.is_written());
    tokio::time::advance(Duration::from_millis(2100)).await;
    assert!(kanban.audit().submit(entry).await.is_written());

    assert_eq!(audit_log.entries().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_bulk_creates_do_not_evict_live_key() {
    let (kanban, audit_log) = setup();
    let audit = kanban.audit();
    let entry = AuditLogEntry::status_change(&document(), Status::Done, "최보안");

    assert!(audit.submit(entry.clone()).await.is_written());
    for n in 0..16u64 {
        let record = Record::new(100 + n, RecordKind::KpiTask, format!("KPI-{:03}", n), "일괄 등록");
        assert!(audit.record_created(&record, "최보안").await.is_written());
    }
    assert_eq!(audit.submit(entry).await, AuditDisposition::Suppressed);

    let for_document = audit_log
        .entries()
        .iter()
        .filter(|e| e.record_id == RecordId::from(31u64))
        .count();
    assert_eq!(for_document, 1);
}

#[tokio::test(start_paused = true)]
async fn test_two_watchers_reporting_one_upload() {
    let (kanban, audit_log) = setup();
    let doc = document();
    let audit = kanban.audit();

    // Hydration on load
    audit.observe_derived(&doc, REVISION_DATE, Some("2024-01-10"), "최보안").await;

    // Revision upload: two effects observe the same derived change
    let first = audit
        .observe_derived(&doc, REVISION_DATE, Some("2024-03-04"), "최보안")
        .await;
    let duplicate = AuditLogEntry::field_change(&doc, REVISION_DATE, "2024-01-10", "2024-03-04", "최보안");
    let second = audit.submit(duplicate).await;

    assert!(first.unwrap().is_written());
    assert_eq!(second, AuditDisposition::Suppressed);
    assert_eq!(audit_log.entries().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_initial_load_not_logged() {
    let (kanban, audit_log) = setup();
    let doc = document();
    let audit = kanban.audit();

    // Detail view opens: values are empty, then hydrate
    assert!(audit.observe_derived(&doc, REVISION, None, "최보안").await.is_none());
    assert!(audit.observe_derived(&doc, REVISION_DATE, None, "최보안").await.is_none());
    assert!(audit.observe_derived(&doc, REVISION, Some("v3"), "최보안").await.is_none());
    assert!(audit
        .observe_derived(&doc, REVISION_DATE, Some("2024-01-10"), "최보안")
        .await
        .is_none());
    assert!(audit_log.entries().is_empty());

    // Real upload afterwards is logged
    let written = audit.observe_derived(&doc, REVISION, Some("v4"), "최보안").await;
    assert!(written.unwrap().is_written());

    let entries = audit_log.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].changed_field, REVISION);
    assert_eq!(entries[0].before_value, "v3");
    assert_eq!(entries[0].after_value, "v4");
    assert_eq!(
        entries[0].description,
        "문서 '정보보호 관리지침'(SEC-2024-031) 최신 개정 변경: v3 → v4"
    );
}

#[tokio::test(start_paused = true)]
async fn test_reselecting_record_hydrates_again() {
    let (kanban, audit_log) = setup();
    let doc = document();
    let audit = kanban.audit();

    audit.observe_derived(&doc, REVISION, Some("v3"), "최보안").await;
    audit.forget(&doc.id);

    // Reopening the detail view hydrates again
    assert!(audit.observe_derived(&doc, REVISION, Some("v9"), "최보안").await.is_none());
    assert!(audit_log.entries().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_host_create_and_delete_are_audited() {
    let (kanban, audit_log) = setup();
    let mut events = kanban.subscribe();

    let record = Record::new(32u64, RecordKind::RegulationDocument, "SEC-2024-032", "원격근무 보안수칙")
        .with_team("정보보호팀");
    kanban.board().insert(record.clone());
    assert!(kanban.audit().record_created(&record, "최보안").await.is_written());

    let removed = kanban.board().remove(&record.id).unwrap();
    assert!(kanban.audit().record_deleted(&removed, "최보안").await.is_written());

    let actions: Vec<AuditAction> = audit_log.entries().iter().map(|e| e.action).collect();
    assert_eq!(actions, vec![AuditAction::Create, AuditAction::Delete]);
    assert_eq!(audit_log.entries()[1].description, "문서 '원격근무 보안수칙'(SEC-2024-032) 삭제");

    let mut refreshed = 0;
    while let Ok(event) = events.try_recv() {
        if matches!(event, BoardEvent::AuditLogAppended { record_id, .. } if record_id == RecordId::from(32u64)) {
            refreshed += 1;
        }
    }
    assert_eq!(refreshed, 2);
}

#[tokio::test(start_paused = true)]
async fn test_dedup_window_from_config() {
    let audit_log = Arc::new(MemoryAuditLog::new());
    let ports = Ports::new(
        Arc::new(ScriptedPersistence::new()),
        audit_log.clone(),
        Arc::new(RecordingNotifier::new()),
    );
    let mut config = KanbanConfig::default();
    config.audit.dedup_window_ms = 500;
    let kanban = KanbanOrchestrator::new(
        &config,
        Arc::new(RecordBoard::with_records([document()])),
        ports,
        Viewer::new("최보안"),
    )
    .unwrap();

    let entry = AuditLogEntry::status_change(&document(), Status::OnHold, "최보안");
    kanban.audit().submit(entry.clone()).await;
    tokio::time::advance(Duration::from_millis(600)).await;
    kanban.audit().submit(entry).await;

    assert_eq!(audit_log.entries().len(), 2);
}
