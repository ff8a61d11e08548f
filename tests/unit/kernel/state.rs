use super::*;
use crate::models::FileRecord;

#[test]
fn default_state_is_empty() {
    let state = AppState::default();
    assert!(state.files.is_empty());
    assert!(state.current_file.is_none());
    assert!(state.settings.auto_detect);
    assert_eq!(state.base_branch, "main");
    assert!(!state.ui.deploy_in_flight);
    assert!(!state.ui.confirm_dialog.visible);
}

#[test]
fn current_content_reads_open_file() {
    let mut files = FileStore::new();
    files.create(FileRecord::file("intro.md", "hello")).unwrap();
    let mut state = AppState::new(files);
    assert_eq!(state.current_content(), None);

    state.current_file = Some("intro.md".to_string());
    assert_eq!(state.current_content(), Some("hello"));
}

#[test]
fn tree_reflects_files() {
    let mut files = FileStore::new();
    files.create(FileRecord::file("step1/text.md", "")).unwrap();
    let state = AppState::new(files);
    let tree = state.tree();
    let step = tree.find("step1").unwrap();
    assert!(step.is_directory);
    assert!(step.find("step1/text.md").is_some());
}

#[test]
fn notice_constructors_set_level() {
    assert_eq!(Notice::info("ok").level, NoticeLevel::Info);
    assert_eq!(Notice::error("bad").level, NoticeLevel::Error);
}
