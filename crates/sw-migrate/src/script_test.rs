use super::*;
use std::fs;
use tempfile::tempdir;

fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), "SELECT 1;").unwrap();
    }
}

fn versions(scripts: &[UpdateScript]) -> Vec<&str> {
    scripts.iter().map(|s| s.version.as_str()).collect()
}

#[test]
fn test_from_path_strips_extension() {
    let script = UpdateScript::from_path(Path::new("updates/1.3.0-beta.sql")).unwrap();
    assert_eq!(script.version.as_str(), "1.3.0-beta");
    assert_eq!(script.file_name, "1.3.0-beta.sql");
}

#[test]
fn test_from_path_rejects_non_version_name() {
    let err = UpdateScript::from_path(Path::new("updates/README.md")).unwrap_err();
    assert!(matches!(err, MigrateError::InvalidScriptName { ref file, .. } if file == "README.md"));
}

#[test]
fn test_discover_missing_directory() {
    let dir = tempdir().unwrap();
    let err = discover_scripts(&dir.path().join("updates"), ScriptOrder::Semantic).unwrap_err();
    assert!(matches!(err, MigrateError::DirectoryNotFound { .. }));
}

#[test]
fn test_discover_semantic_order() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["1.10.0.sql", "1.2.0.sql", "1.0.0.sql", "1.2.0-beta.sql"]);

    let scripts = discover_scripts(dir.path(), ScriptOrder::Semantic).unwrap();

    assert_eq!(versions(&scripts), vec!["1.0.0", "1.2.0", "1.2.0-beta", "1.10.0"]);
}

#[test]
fn test_discover_lexicographic_order() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["1.10.0.sql", "1.2.0.sql", "1.0.0.sql"]);

    let scripts = discover_scripts(dir.path(), ScriptOrder::Lexicographic).unwrap();

    assert_eq!(versions(&scripts), vec!["1.0.0", "1.10.0", "1.2.0"]);
}

#[test]
fn test_discover_ignores_directories_and_dotfiles() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["1.0.0.sql", ".gitkeep"]);
    fs::create_dir(dir.path().join("archive")).unwrap();

    let scripts = discover_scripts(dir.path(), ScriptOrder::Semantic).unwrap();

    assert_eq!(versions(&scripts), vec!["1.0.0"]);
}

#[test]
fn test_discover_rejects_stray_file() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["1.0.0.sql", "notes.txt"]);

    let err = discover_scripts(dir.path(), ScriptOrder::Semantic).unwrap_err();
    assert!(matches!(err, MigrateError::InvalidScriptName { .. }));
}

#[test]
fn test_discover_rejects_duplicate_versions() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["1.0.0.sql", "1.0.0.txt"]);

    let err = discover_scripts(dir.path(), ScriptOrder::Semantic).unwrap_err();
    match err {
        MigrateError::DuplicateVersion {
            version,
            first,
            second,
        } => {
            assert_eq!(version, "1.0.0");
            assert_eq!(first, "1.0.0.sql");
            assert_eq!(second, "1.0.0.txt");
        }
        other => panic!("expected DuplicateVersion, got {other:?}"),
    }
}

#[test]
fn test_discover_empty_directory() {
    let dir = tempdir().unwrap();
    let scripts = discover_scripts(dir.path(), ScriptOrder::Semantic).unwrap();
    assert!(scripts.is_empty());
}

#[test]
fn test_skip_applied_drops_at_or_below_current() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["1.0.1.sql", "1.0.2.sql", "1.1.0.sql"]);
    let scripts = discover_scripts(dir.path(), ScriptOrder::Semantic).unwrap();

    let pending = skip_applied(scripts, &Version::parse("1.0.1").unwrap());

    assert_eq!(versions(&pending), vec!["1.0.2", "1.1.0"]);
}

#[test]
fn test_skip_applied_everything_applied() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["1.0.1.sql", "1.0.2.sql"]);
    let scripts = discover_scripts(dir.path(), ScriptOrder::Semantic).unwrap();

    let pending = skip_applied(scripts, &Version::parse("2.0.0").unwrap());

    assert!(pending.is_empty());
}

#[test]
fn test_skip_applied_keeps_equal_precedence_with_other_spelling() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["01.0.0.sql", "1.1.0.sql"]);
    let scripts = discover_scripts(dir.path(), ScriptOrder::Semantic).unwrap();

    let pending = skip_applied(scripts, &Version::parse("1.0.0").unwrap());

    assert_eq!(versions(&pending), vec!["01.0.0", "1.1.0"]);
}

#[test]
fn test_skip_applied_keeps_tag_with_other_numeric_spelling() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["1.0.0-01.sql"]);
    let scripts = discover_scripts(dir.path(), ScriptOrder::Semantic).unwrap();

    let pending = skip_applied(scripts, &Version::parse("1.0.0-1").unwrap());

    assert_eq!(versions(&pending), vec!["1.0.0-01"]);
}

#[test]
fn test_skip_applied_drops_exact_match() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["1.0.0-1.sql", "1.0.1.sql"]);
    let scripts = discover_scripts(dir.path(), ScriptOrder::Semantic).unwrap();

    let pending = skip_applied(scripts, &Version::parse("1.0.0-1").unwrap());

    assert_eq!(versions(&pending), vec!["1.0.1"]);
}

#[test]
fn test_skip_applied_lexicographic_only_inspects_head() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["1.10.0.sql", "1.2.0.sql", "1.9.0.sql"]);
    let scripts = discover_scripts(dir.path(), ScriptOrder::Lexicographic).unwrap();
    assert_eq!(versions(&scripts), vec!["1.10.0", "1.2.0", "1.9.0"]);

    // 1.10.0 is above 1.5.0, so nothing is dropped even though 1.2.0 is below
    let pending = skip_applied(scripts, &Version::parse("1.5.0").unwrap());

    assert_eq!(versions(&pending), vec!["1.10.0", "1.2.0", "1.9.0"]);
}
