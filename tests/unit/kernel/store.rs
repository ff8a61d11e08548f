use super::*;
use crate::kernel::action::{DeployRequest, FileOp};
use crate::kernel::effect::PersistKey;
use crate::kernel::markup::Template;
use crate::kernel::services::ports::{
    ArchiveBlob, ArchiveError, DeployError, DeployOutcome, Theme,
};
use crate::kernel::state::{NoticeLevel, PendingAction};
use crate::models::{FileRecord, FileStore};

fn new_store() -> Store {
    let mut files = FileStore::new();
    files.create(FileRecord::file("intro.md", "{{h1}} Intro")).unwrap();
    files.create(FileRecord::directory("step1")).unwrap();
    files.create(FileRecord::file("step1/text.md", "step one")).unwrap();
    files.create(FileRecord::file("step1/verify.sh", "exit 0")).unwrap();
    files.create(FileRecord::directory("step10")).unwrap();
    files.create(FileRecord::file("step10/text.md", "step ten")).unwrap();
    Store::new(AppState::new(files))
}

fn file_op(op: FileOp) -> Action {
    Action::File(op)
}

fn open(store: &mut Store, path: &str) {
    let result = store.dispatch(file_op(FileOp::Open {
        path: path.to_string(),
    }));
    assert!(result.state_changed);
}

fn persisted(result: &DispatchResult) -> Vec<PersistKey> {
    let mut keys: Vec<PersistKey> = result
        .effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Persist(key) => Some(*key),
            _ => None,
        })
        .collect();
    keys.sort();
    keys
}

fn error_notice(store: &Store) -> Option<&str> {
    store
        .state()
        .ui
        .notice
        .as_ref()
        .filter(|n| n.level == NoticeLevel::Error)
        .map(|n| n.message.as_str())
}

#[test]
fn create_file_opens_it_and_persists() {
    let mut store = new_store();

    let result = store.dispatch(file_op(FileOp::CreateFile {
        path: "step2/text.md".to_string(),
        content: "{{h2}} Two".to_string(),
    }));

    assert!(result.state_changed);
    assert_eq!(
        persisted(&result),
        vec![
            PersistKey::Files,
            PersistKey::CurrentFile,
            PersistKey::FolderExpansionState
        ]
    );
    assert_eq!(store.state().current_file.as_deref(), Some("step2/text.md"));
    assert_eq!(store.state().output, "## Two");
    assert!(store.state().expansion.is_expanded("step2"));
}

#[test]
fn create_rejects_empty_invalid_and_duplicate() {
    let mut store = new_store();
    let before = store.state().files.to_entries();

    store.dispatch(file_op(FileOp::CreateFile {
        path: "   ".to_string(),
        content: String::new(),
    }));
    assert_eq!(error_notice(&store), Some("file path must not be empty"));

    let result = store.dispatch(file_op(FileOp::CreateFile {
        path: "x.exe".to_string(),
        content: String::new(),
    }));
    assert!(result.effects.is_empty());
    assert!(error_notice(&store).is_some());

    store.dispatch(file_op(FileOp::CreateFile {
        path: "intro.md".to_string(),
        content: String::new(),
    }));
    assert!(error_notice(&store).is_some());

    assert_eq!(store.state().files.to_entries(), before);
    assert!(store.state().current_file.is_none());
}

#[test]
fn create_folder_does_not_change_open_file() {
    let mut store = new_store();
    open(&mut store, "intro.md");

    let result = store.dispatch(file_op(FileOp::CreateFolder {
        path: "assets".to_string(),
    }));

    assert_eq!(persisted(&result), vec![PersistKey::Files]);
    assert!(store.state().files.is_dir("assets"));
    assert_eq!(store.state().current_file.as_deref(), Some("intro.md"));
}

#[test]
fn open_generates_output() {
    let mut store = new_store();
    open(&mut store, "intro.md");
    assert_eq!(store.state().output, "# Intro");

    let again = store.dispatch(file_op(FileOp::Open {
        path: "intro.md".to_string(),
    }));
    assert!(!again.state_changed);
}

#[test]
fn open_directory_fails() {
    let mut store = new_store();
    store.dispatch(file_op(FileOp::Open {
        path: "step1".to_string(),
    }));
    assert!(error_notice(&store).is_some());
    assert!(store.state().current_file.is_none());
}

#[test]
fn edit_current_rewrites_output() {
    let mut store = new_store();
    open(&mut store, "step1/text.md");

    let result = store.dispatch(Action::EditCurrent {
        content: "{{exec}}\nls -la".to_string(),
    });

    assert_eq!(persisted(&result), vec![PersistKey::Files]);
    assert_eq!(store.state().output, "````bash\nls -la\n````{{exec}}");
    assert_eq!(
        store.state().files.read("step1/text.md").unwrap(),
        "{{exec}}\nls -la"
    );

    let same = store.dispatch(Action::EditCurrent {
        content: "{{exec}}\nls -la".to_string(),
    });
    assert!(!same.state_changed);
}

#[test]
fn edit_without_open_file_is_no_selection() {
    let mut store = new_store();
    store.dispatch(Action::EditCurrent {
        content: "x".to_string(),
    });
    assert_eq!(error_notice(&store), Some("no file selected"));
}

#[test]
fn rename_ancestor_moves_open_file_pointer() {
    let mut store = new_store();
    open(&mut store, "step1/text.md");
    store.dispatch(Action::ToggleFolder {
        path: "step1".to_string(),
    });

    let result = store.dispatch(file_op(FileOp::Rename {
        path: "step1".to_string(),
        new_name: "step01".to_string(),
    }));

    assert_eq!(
        persisted(&result),
        vec![
            PersistKey::Files,
            PersistKey::CurrentFile,
            PersistKey::FolderExpansionState
        ]
    );
    assert_eq!(store.state().current_file.as_deref(), Some("step01/text.md"));
    assert!(store.state().expansion.is_expanded("step01"));
    assert!(store.state().files.contains("step01/verify.sh"));
    assert!(store.state().files.contains("step10/text.md"));
}

#[test]
fn rename_to_same_name_is_noop() {
    let mut store = new_store();
    let result = store.dispatch(file_op(FileOp::Rename {
        path: "intro.md".to_string(),
        new_name: "intro.md".to_string(),
    }));
    assert!(!result.state_changed);
    assert!(result.effects.is_empty());
}

#[test]
fn move_into_descendant_reports_error() {
    let mut store = new_store();
    store.dispatch(file_op(FileOp::CreateFolder {
        path: "step1/sub".to_string(),
    }));
    let before = store.state().files.to_entries();

    let result = store.dispatch(file_op(FileOp::Move {
        source: "step1".to_string(),
        target_dir: "step1/sub".to_string(),
    }));

    assert!(result.effects.is_empty());
    assert!(error_notice(&store).is_some());
    assert_eq!(store.state().files.to_entries(), before);
}

#[test]
fn move_to_root_follows_open_file() {
    let mut store = new_store();
    open(&mut store, "step10/text.md");
    store.dispatch(file_op(FileOp::CreateFolder {
        path: "archive".to_string(),
    }));

    store.dispatch(file_op(FileOp::Move {
        source: "step10".to_string(),
        target_dir: "archive".to_string(),
    }));
    assert_eq!(
        store.state().current_file.as_deref(),
        Some("archive/step10/text.md")
    );

    store.dispatch(file_op(FileOp::Move {
        source: "archive/step10".to_string(),
        target_dir: String::new(),
    }));
    assert_eq!(store.state().current_file.as_deref(), Some("step10/text.md"));
}

#[test]
fn delete_waits_for_confirmation() {
    let mut store = new_store();
    open(&mut store, "step1/text.md");

    let request = store.dispatch(file_op(FileOp::RequestDelete {
        path: "step1".to_string(),
    }));
    assert!(request.effects.is_empty());
    let dialog = &store.state().ui.confirm_dialog;
    assert!(dialog.visible);
    assert_eq!(
        dialog.on_confirm,
        Some(PendingAction::DeletePath {
            path: "step1".to_string(),
            is_dir: true
        })
    );
    assert!(store.state().files.contains("step1"));

    let result = store.dispatch(Action::Confirm);

    assert!(persisted(&result).contains(&PersistKey::CurrentFile));
    assert!(!store.state().ui.confirm_dialog.visible);
    assert!(!store.state().files.contains("step1"));
    assert!(!store.state().files.contains("step1/text.md"));
    assert!(store.state().files.contains("step10/text.md"));
    assert!(store.state().current_file.is_none());
    assert!(store.state().output.is_empty());
}

#[test]
fn delete_forgets_expansion_of_implicit_subfolders() {
    let mut store = new_store();
    store.dispatch(file_op(FileOp::CreateFolder {
        path: "a".to_string(),
    }));
    store.dispatch(file_op(FileOp::CreateFile {
        path: "a/b/c.md".to_string(),
        content: String::new(),
    }));
    assert!(store.state().expansion.is_expanded("a/b"));

    store.dispatch(file_op(FileOp::RequestDelete {
        path: "a".to_string(),
    }));
    let result = store.dispatch(Action::Confirm);

    assert!(persisted(&result).contains(&PersistKey::FolderExpansionState));
    assert!(!store.state().expansion.is_expanded("a"));
    assert!(!store.state().expansion.is_expanded("a/b"));

    store.dispatch(file_op(FileOp::CreateFolder {
        path: "a".to_string(),
    }));
    store.dispatch(file_op(FileOp::CreateFolder {
        path: "a/b".to_string(),
    }));
    let tree = store.state().tree();
    assert!(!tree.find("a/b").unwrap().is_expanded);
}

#[test]
fn cancel_discards_pending_delete() {
    let mut store = new_store();
    store.dispatch(file_op(FileOp::RequestDelete {
        path: "intro.md".to_string(),
    }));

    let cancel = store.dispatch(Action::Cancel);
    assert!(cancel.state_changed);
    let confirm = store.dispatch(Action::Confirm);
    assert!(!confirm.state_changed);
    assert!(store.state().files.contains("intro.md"));
}

#[test]
fn request_delete_missing_path_fails() {
    let mut store = new_store();
    store.dispatch(file_op(FileOp::RequestDelete {
        path: "nope.md".to_string(),
    }));
    assert!(error_notice(&store).is_some());
    assert!(!store.state().ui.confirm_dialog.visible);
}

#[test]
fn toggle_folder_flips_expansion() {
    let mut store = new_store();
    let result = store.dispatch(Action::ToggleFolder {
        path: "step1".to_string(),
    });
    assert_eq!(persisted(&result), vec![PersistKey::FolderExpansionState]);
    assert!(store.state().expansion.is_expanded("step1"));

    store.dispatch(Action::ToggleFolder {
        path: "step1".to_string(),
    });
    assert!(!store.state().expansion.is_expanded("step1"));

    store.dispatch(Action::ToggleFolder {
        path: "intro.md".to_string(),
    });
    assert!(error_notice(&store).is_some());
}

#[test]
fn auto_detect_setting_reflows_output() {
    let mut store = new_store();
    store.dispatch(file_op(FileOp::CreateFile {
        path: "notes.md".to_string(),
        content: "Install\n\n$ apt install nginx".to_string(),
    }));
    let detected = store.state().output.clone();
    assert!(detected.contains("{{exec}}"));

    let result = store.dispatch(Action::SetAutoDetect(false));
    assert_eq!(persisted(&result), vec![PersistKey::UserSettings]);
    assert_ne!(store.state().output, detected);
    assert!(!store.state().output.contains("{{exec}}"));

    let again = store.dispatch(Action::SetAutoDetect(false));
    assert!(!again.state_changed);
}

#[test]
fn set_theme_persists_settings() {
    let mut store = new_store();
    let result = store.dispatch(Action::SetTheme(Theme::Dark));
    assert_eq!(persisted(&result), vec![PersistKey::UserSettings]);
    assert_eq!(store.state().settings.theme, Theme::Dark);
}

#[test]
fn insert_template_prepends_to_open_file() {
    let mut store = new_store();
    open(&mut store, "step1/text.md");

    store.dispatch(Action::InsertTemplate(Template::CodeExample));

    let content = store.state().files.read("step1/text.md").unwrap();
    assert!(content.starts_with("{{h2}} Code Example"));
    assert!(content.ends_with("\n\nstep one"));
    assert!(store.state().output.starts_with("## Code Example"));
}

fn deploy_request() -> DeployRequest {
    DeployRequest {
        lab_name: "Docker Lab".to_string(),
        author_name: String::new(),
        selected: vec!["intro.md".to_string(), "step1".to_string()],
        message: "publish".to_string(),
    }
}

#[test]
fn deploy_starts_task_and_blocks_reentry() {
    let mut store = new_store();

    let result = store.dispatch(Action::Deploy(deploy_request()));

    let plan = match result.effects.as_slice() {
        [Effect::StartDeploy(plan)] => plan.clone(),
        other => panic!("unexpected effects: {other:?}"),
    };
    assert_eq!(plan.namespace, "Docker_Lab/");
    assert_eq!(plan.blobs.len(), 3);
    assert!(store.state().ui.deploy_in_flight);

    let again = store.dispatch(Action::Deploy(deploy_request()));
    assert!(again.effects.is_empty());
    assert_eq!(error_notice(&store), Some("deployment already in progress"));
}

#[test]
fn deploy_success_records_submission() {
    let mut store = new_store();
    store.dispatch(Action::Deploy(deploy_request()));

    let result = store.dispatch(Action::DeployFinished(Ok(DeployOutcome {
        lab_name: "Docker Lab".to_string(),
        author_name: String::new(),
        commit: "abcdef0123".to_string(),
        files: 3,
    })));

    assert_eq!(persisted(&result), vec![PersistKey::PreviousSubmissions]);
    assert!(!store.state().ui.deploy_in_flight);
    assert_eq!(store.state().history.len(), 1);
    let submission = store.state().history.iter().next().unwrap();
    assert_eq!(submission.lab_name, "Docker Lab");
    assert_eq!(submission.files.len(), store.state().files.len());
    let notice = store.state().ui.notice.as_ref().unwrap();
    assert_eq!(notice.level, NoticeLevel::Info);
    assert!(notice.message.contains("abcdef0"));
}

#[test]
fn submission_snapshots_files_when_deploy_starts() {
    let mut store = new_store();
    open(&mut store, "intro.md");
    store.dispatch(Action::Deploy(deploy_request()));
    assert!(store.state().ui.pending_submission.is_some());

    store.dispatch(Action::EditCurrent {
        content: "edited while deploying".to_string(),
    });
    store.dispatch(file_op(FileOp::CreateFile {
        path: "late.md".to_string(),
        content: String::new(),
    }));
    store.dispatch(Action::DeployFinished(Ok(DeployOutcome {
        lab_name: "Docker Lab".to_string(),
        author_name: String::new(),
        commit: "abcdef0123".to_string(),
        files: 3,
    })));

    assert!(store.state().ui.pending_submission.is_none());
    let submission = store.state().history.iter().next().unwrap();
    let intro = submission
        .files
        .iter()
        .find(|(path, _)| path == "intro.md")
        .map(|(_, record)| record.content.as_str());
    assert_eq!(intro, Some("{{h1}} Intro"));
    assert!(submission.files.iter().all(|(path, _)| path != "late.md"));
    assert_eq!(
        store.state().files.read("intro.md").unwrap(),
        "edited while deploying"
    );
}

#[test]
fn failed_deploy_drops_pending_snapshot() {
    let mut store = new_store();
    store.dispatch(Action::Deploy(deploy_request()));
    store.dispatch(Action::DeployFinished(Err(DeployError::Network(
        "timeout".to_string(),
    ))));
    assert!(store.state().ui.pending_submission.is_none());

    store.dispatch(file_op(FileOp::CreateFile {
        path: "second.md".to_string(),
        content: String::new(),
    }));
    store.dispatch(Action::Deploy(deploy_request()));
    store.dispatch(Action::DeployFinished(Ok(DeployOutcome {
        lab_name: "Docker Lab".to_string(),
        author_name: String::new(),
        commit: "c2".to_string(),
        files: 3,
    })));

    assert_eq!(store.state().history.len(), 1);
    let submission = store.state().history.iter().next().unwrap();
    assert!(submission.files.iter().any(|(path, _)| path == "second.md"));
}

#[test]
fn deploy_failure_keeps_local_state() {
    let mut store = new_store();
    store.dispatch(Action::Deploy(deploy_request()));
    let before = store.state().files.to_entries();

    let result = store.dispatch(Action::DeployFinished(Err(DeployError::Network(
        "timeout".to_string(),
    ))));

    assert!(result.effects.is_empty());
    assert!(!store.state().ui.deploy_in_flight);
    assert!(store.state().history.is_empty());
    assert_eq!(store.state().files.to_entries(), before);
    assert_eq!(
        error_notice(&store),
        Some("deployment failed: network failure: timeout")
    );
}

#[test]
fn deploy_without_selection_is_rejected() {
    let mut store = new_store();
    let mut request = deploy_request();
    request.selected.clear();

    let result = store.dispatch(Action::Deploy(request));

    assert!(result.effects.is_empty());
    assert!(!store.state().ui.deploy_in_flight);
    assert!(error_notice(&store).is_some());
}

#[test]
fn history_is_capped_at_twenty() {
    let mut store = new_store();
    for i in 0..25 {
        let mut request = deploy_request();
        request.lab_name = format!("lab{i}");
        store.dispatch(Action::Deploy(request));
        store.dispatch(Action::DeployFinished(Ok(DeployOutcome {
            lab_name: format!("lab{i}"),
            author_name: String::new(),
            commit: format!("c{i}"),
            files: 1,
        })));
    }
    assert_eq!(store.state().history.len(), 20);
    assert_eq!(store.state().history.iter().next().unwrap().lab_name, "lab24");
}

#[test]
fn restore_submission_replaces_files() {
    let mut store = new_store();
    store.dispatch(Action::Deploy(deploy_request()));
    store.dispatch(Action::DeployFinished(Ok(DeployOutcome {
        lab_name: "Docker Lab".to_string(),
        author_name: String::new(),
        commit: "c1".to_string(),
        files: 3,
    })));
    let id = store.state().history.iter().next().unwrap().id.clone();

    store.dispatch(file_op(FileOp::CreateFile {
        path: "scratch.md".to_string(),
        content: String::new(),
    }));
    assert_eq!(store.state().current_file.as_deref(), Some("scratch.md"));

    let result = store.dispatch(Action::RestoreSubmission { id });

    assert_eq!(
        persisted(&result),
        vec![PersistKey::Files, PersistKey::CurrentFile]
    );
    assert!(!store.state().files.contains("scratch.md"));
    assert!(store.state().current_file.is_none());

    store.dispatch(Action::RestoreSubmission {
        id: "missing".to_string(),
    });
    assert_eq!(error_notice(&store), Some("submission not found: missing"));
}

#[test]
fn export_archive_round_trip() {
    let mut store = new_store();

    let result = store.dispatch(Action::ExportArchive);
    match result.effects.as_slice() {
        [Effect::StartArchive(entries)] => assert_eq!(entries.len(), 6),
        other => panic!("unexpected effects: {other:?}"),
    }
    assert!(store.state().ui.archive_in_flight);

    store.dispatch(Action::ExportArchive);
    assert_eq!(error_notice(&store), Some("archive export already in progress"));

    store.dispatch(Action::ArchiveFinished(Ok(ArchiveBlob {
        file_name: "lab.zip".to_string(),
        bytes: vec![1, 2, 3],
    })));
    assert!(!store.state().ui.archive_in_flight);
    assert_eq!(
        store.state().last_archive.as_ref().map(|b| b.file_name.as_str()),
        Some("lab.zip")
    );

    store.dispatch(Action::ExportArchive);
    store.dispatch(Action::ArchiveFinished(Err(ArchiveError::Write(
        "disk full".to_string(),
    ))));
    assert_eq!(error_notice(&store), Some("archive write failed: disk full"));
}

#[test]
fn dismiss_notice_clears_it() {
    let mut store = new_store();
    store.dispatch(Action::EditCurrent {
        content: "x".to_string(),
    });
    assert!(store.dispatch(Action::DismissNotice).state_changed);
    assert!(store.state().ui.notice.is_none());
    assert!(!store.dispatch(Action::DismissNotice).state_changed);
}
