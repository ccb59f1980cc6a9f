//! Configuration files flowing into a live board

use adminboard_config::{ConfigProvider, FileDiscovery};
use adminboard_kanban::test_support::{MemoryAuditLog, RecordingNotifier, ScriptedPersistence};
use adminboard_kanban::{
    KanbanError, KanbanOrchestrator, Point, Ports, Record, RecordBoard, RecordKind, Viewer,
};
use serial_test::serial;
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn ports() -> Ports {
    Ports::new(
        Arc::new(ScriptedPersistence::new()),
        Arc::new(MemoryAuditLog::new()),
        Arc::new(RecordingNotifier::new()),
    )
}

fn board() -> Arc<RecordBoard> {
    Arc::new(RecordBoard::with_records([Record::new(
        1u64,
        RecordKind::KpiTask,
        "KPI-001",
        "월간 보고",
    )
    .with_assignee("김담당")]))
}

fn provider(global: &TempDir, project: &TempDir) -> ConfigProvider {
    ConfigProvider::with_discovery(FileDiscovery::with_dirs(
        Some(global.path().to_path_buf()),
        Some(project.path().to_path_buf()),
    ))
}

#[test]
#[serial]
fn test_project_file_tunes_board() {
    let global = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::write(
        global.path().join("kanban.toml"),
        "[drag]\nactivation_distance = 30.0\n\n[audit]\ndedup_window_ms = 5000\n",
    )
    .unwrap();
    fs::write(
        project.path().join("kanban.yaml"),
        "audit:\n  dedup_window_ms: 300\n",
    )
    .unwrap();

    let config = provider(&global, &project).load().unwrap();
    let kanban = KanbanOrchestrator::new(&config, board(), ports(), Viewer::new("김담당")).unwrap();

    assert_eq!(
        kanban.audit().deduplicator().window(),
        Duration::from_millis(300)
    );

    // Global activation distance still applies
    kanban.pointer_down(&1u64.into(), Point::new(0.0, 0.0));
    assert!(!kanban.pointer_move(Point::new(20.0, 0.0), None));
    assert!(kanban.pointer_move(Point::new(30.0, 0.0), None));
}

#[test]
#[serial]
fn test_env_override_reaches_board() {
    let global = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    std::env::set_var("ADMINBOARD_AUDIT__DEDUP_WINDOW_MS", "750");
    let result = provider(&global, &project).load();
    std::env::remove_var("ADMINBOARD_AUDIT__DEDUP_WINDOW_MS");

    let kanban =
        KanbanOrchestrator::new(&result.unwrap(), board(), ports(), Viewer::new("김담당")).unwrap();
    assert_eq!(
        kanban.audit().deduplicator().window(),
        Duration::from_millis(750)
    );
}

#[test]
#[serial]
fn test_hand_built_invalid_config_rejected() {
    let mut config = adminboard_config::KanbanConfig::default();
    config.drag.dragging_opacity = 0.0;

    let result = KanbanOrchestrator::new(&config, board(), ports(), Viewer::new("김담당"));
    assert!(matches!(result, Err(KanbanError::Config(_))));
}
