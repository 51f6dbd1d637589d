//! End-to-end labeling scenarios through the public API.

use policy::{reconcile, ConfigurationError, Policy, Reconciliation};

const NO_LABELS: [&str; 0] = [];

fn run(yaml: &str, files: &[&str], current: &[&str]) -> Reconciliation {
    let policy = Policy::from_yaml_str(yaml).expect("policy should load");
    reconcile(&policy, files, current)
}

#[test]
fn test_markdown_only_pull_request_gets_docs() {
    let result = run(
        r#"{"docs": ["**/*.md"]}"#,
        &["README.md", "docs/guide.md"],
        &NO_LABELS,
    );
    assert_eq!(result.to_add, vec!["docs"]);
    assert!(result.to_remove.is_empty());
}

#[test]
fn test_code_change_drops_docs() {
    let result = run(
        r#"{"docs": ["**/*.md"]}"#,
        &["README.md", "src/index.js"],
        &["docs"],
    );
    assert!(result.to_add.is_empty());
    assert_eq!(result.to_remove, vec!["docs"]);
}

#[test]
fn test_frontend_file_outside_server_tree() {
    let result = run(
        r#"{"frontend": ["src/**", "!src/server/**"]}"#,
        &["src/ui/App.tsx"],
        &NO_LABELS,
    );
    assert_eq!(result.to_add, vec!["frontend"]);
    assert!(result.to_remove.is_empty());
}

#[test]
fn test_server_file_is_excluded_from_frontend() {
    let result = run(
        r#"{"frontend": ["src/**", "!src/server/**"]}"#,
        &["src/server/api.ts"],
        &["frontend"],
    );
    assert!(result.to_add.is_empty());
    assert_eq!(result.to_remove, vec!["frontend"]);
}

#[test]
fn test_malformed_document_names_the_label() {
    let err = Policy::from_yaml_str(r#"{"broken": 42}"#).unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidValue { .. }));
    assert_eq!(err.label(), Some("broken"));
}

#[test]
fn test_realistic_policy() {
    let yaml = r"
documentation:
  - 'docs/**'
  - '**/*.md'
ci: '.github/**'
rust:
  - '**/*.rs'
  - '**/Cargo.{toml,lock}'
backend:
  - 'crates/**'
  - '!crates/**/tests/**'
";
    let current = ["ci", "documentation", "needs-review"];
    let files = [
        "crates/policy/src/glob.rs",
        "crates/policy/Cargo.toml",
        "Cargo.lock",
    ];

    let result = run(yaml, &files, &current);
    assert_eq!(result.to_add, vec!["rust"]);
    assert_eq!(result.to_remove, vec!["documentation", "ci"]);
    assert_eq!(result.new_labels(&current), vec!["rust"]);
    assert_eq!(
        result.resulting_labels(&current, true),
        vec!["needs-review", "rust"]
    );
}
