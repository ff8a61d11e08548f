use super::*;
use crate::models::FileRecord;

fn store_with(entries: &[(&str, bool)]) -> FileStore {
    FileStore::from_entries(entries.iter().map(|(path, is_dir)| {
        let record = if *is_dir {
            FileRecord::directory(path)
        } else {
            FileRecord::file(path, "")
        };
        (path.to_string(), record)
    }))
}

#[test]
fn test_build_tree_synthesizes_ancestors() {
    let store = store_with(&[("step1/assets/logo.txt", false)]);
    let tree = build_tree(&store, &ExpansionState::new());

    let step1 = tree.find("step1").unwrap();
    assert!(step1.is_directory);
    assert_eq!(step1.path, "step1");
    let assets = tree.find("step1/assets").unwrap();
    assert!(assets.is_directory);
    assert!(!tree.find("step1/assets/logo.txt").unwrap().is_directory);
}

#[test]
fn test_file_record_is_promoted_when_used_as_folder() {
    let store = store_with(&[("notes", false), ("notes/a.md", false)]);
    let tree = build_tree(&store, &ExpansionState::new());
    assert!(tree.find("notes").unwrap().is_directory);
}

#[test]
fn test_empty_directory_record_is_folder() {
    let store = store_with(&[("empty", true)]);
    let tree = build_tree(&store, &ExpansionState::new());
    let node = tree.find("empty").unwrap();
    assert!(node.is_directory);
    assert!(node.children.is_empty());
}

#[test]
fn test_folders_collapsed_by_default() {
    let store = store_with(&[("step1", true), ("step1/text.md", false)]);
    let tree = build_tree(&store, &ExpansionState::new());
    assert!(tree.is_expanded);
    assert!(!tree.find("step1").unwrap().is_expanded);
}

#[test]
fn test_flatten_for_view_orders_folders_first() {
    let store = store_with(&[
        ("zeta.md", false),
        ("alpha.md", false),
        ("step2", true),
        ("step1", true),
        ("step1/text.md", false),
    ]);
    let mut expansion = ExpansionState::new();

    let rows = build_tree(&store, &expansion).flatten_for_view();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["step1", "step2", "alpha.md", "zeta.md"]);

    expansion.toggle("step1");
    let rows = build_tree(&store, &expansion).flatten_for_view();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["step1", "text.md", "step2", "alpha.md", "zeta.md"]
    );
    assert_eq!(rows[1].depth, 2);
    assert!(rows[0].is_expanded);
}

#[test]
fn test_toggle_expand() {
    let mut expansion = ExpansionState::new();
    assert!(!expansion.is_expanded("step1"));
    assert!(expansion.toggle("step1"));
    assert!(expansion.is_expanded("step1"));
    assert!(!expansion.toggle("step1"));
    assert!(!expansion.is_expanded("step1"));
}

#[test]
fn test_expansion_follows_rename() {
    let mut store = store_with(&[("step1", true), ("step1/sub", true)]);
    let mut expansion = ExpansionState::new();
    expansion.set("step1", true);
    expansion.set("step1/sub", true);
    expansion.set("step10", true);

    let change = store.rename("step1", "intro").unwrap();
    assert!(expansion.rebase(&change));

    assert!(expansion.is_expanded("intro"));
    assert!(expansion.is_expanded("intro/sub"));
    assert!(!expansion.is_expanded("step1"));
    assert!(expansion.is_expanded("step10"));
}

#[test]
fn test_expansion_forgets_deleted_folders() {
    let mut expansion = ExpansionState::new();
    expansion.set("step1", true);
    assert!(expansion.forget(&["step1".to_string()]));
    assert!(expansion.is_empty());
}

#[test]
fn test_expansion_forgets_everything_under_deleted_folder() {
    let mut expansion = ExpansionState::new();
    expansion.set("a", true);
    expansion.set("a/b", true);
    expansion.set("a/b/c", false);
    expansion.set("ab", true);

    assert!(expansion.forget(&["a".to_string()]));

    assert_eq!(expansion.len(), 1);
    assert!(expansion.is_expanded("ab"));
    assert!(!expansion.is_expanded("a/b"));
}

#[test]
fn test_expansion_serializes_as_map() {
    let mut expansion = ExpansionState::new();
    expansion.set("step1", true);
    let json = serde_json::to_string(&expansion).unwrap();
    assert_eq!(json, r#"{"step1":true}"#);
    let back: ExpansionState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, expansion);
}
