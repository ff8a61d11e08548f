use super::*;

#[test]
fn normalize_trims_and_collapses() {
    assert_eq!(normalize("/step1//text.md/"), "step1/text.md");
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("///"), "");
}

#[test]
fn parent_and_name() {
    assert_eq!(parent("a/b/c.md"), Some("a/b"));
    assert_eq!(parent("intro.md"), None);
    assert_eq!(name("a/b/c.md"), "c.md");
    assert_eq!(name("intro.md"), "intro.md");
}

#[test]
fn child_at_root_has_no_leading_separator() {
    assert_eq!(child("", "intro.md"), "intro.md");
    assert_eq!(child("step1", "text.md"), "step1/text.md");
}

#[test]
fn ancestor_is_segment_wise() {
    assert!(is_ancestor("step1", "step1/text.md"));
    assert!(!is_ancestor("step1", "step10/text.md"));
    assert!(!is_ancestor("step1", "step1"));
    assert!(is_ancestor("", "step1"));
    assert!(!is_ancestor("", ""));
}

#[test]
fn rebase_moves_subtree_roots() {
    assert_eq!(rebase("a/b/c.md", "a/b", "x"), Some("x/c.md".to_string()));
    assert_eq!(rebase("a/b", "a/b", "x/b"), Some("x/b".to_string()));
    assert_eq!(rebase("ab/c.md", "a", "z"), None);
    assert_eq!(rebase("abc", "a", "ab"), None);
}

#[test]
fn extension_ignores_leading_dot() {
    assert_eq!(extension("text.md"), Some("md"));
    assert_eq!(extension("archive.tar.sh"), Some("sh"));
    assert_eq!(extension(".env"), None);
    assert_eq!(extension("Makefile"), None);
}
