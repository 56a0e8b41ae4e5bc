use std::fs;
use std::path::PathBuf;
use super::*;
use crate::config::ResultLayout;

// ============================================================================
// JobSet deduplication tests
// ============================================================================

#[test]
fn test_duplicate_names_are_collapsed() {
    let set: JobSet = vec![Job::new("a", b"one".to_vec()), Job::new("a", b"one".to_vec())]
        .into_iter()
        .collect();
    assert_eq!(set.len(), 1);
    assert_eq!(set.names(), vec!["a"]);
}

#[test]
fn test_first_duplicate_wins() {
    let mut set = JobSet::new();
    assert!(set.insert(Job::new("a", b"first".to_vec())));
    assert!(!set.insert(Job::new("a", b"second".to_vec())));
    assert_eq!(set.as_slice()[0].source, b"first".to_vec());
}

#[test]
fn test_first_seen_order_is_kept() {
    let set: JobSet = ["c.frag", "a.vert", "c.frag", "b.geom"]
        .into_iter()
        .map(|name| Job::new(name, Vec::new()))
        .collect();
    assert_eq!(set.names(), vec!["c.frag", "a.vert", "b.geom"]);
    assert!(set.contains("b.geom"));
    assert!(!set.contains("d.comp"));
}

#[test]
fn test_empty_set() {
    let set = JobSet::new();
    assert!(set.is_empty());
    assert_eq!(set.iter().count(), 0);
}

#[test]
fn test_job_stage() {
    assert_eq!(Job::new("x.frag", Vec::new()).stage(), Some(ShaderStage::Fragment));
    assert_eq!(Job::new("x.txt", Vec::new()).stage(), None);
}

// ============================================================================
// Artifact path tests
// ============================================================================

#[test]
fn test_job_artifacts_split_layout() {
    let config = RelayConfig::new("/emu");
    let artifacts = JobArtifacts::for_job(&config, "a.frag");
    assert_eq!(artifacts.request, PathBuf::from("/emu/sdcard/shaders/a.frag"));
    assert_eq!(
        artifacts.files(),
        vec![
            Path::new("/emu/sdcard/shaders/a.frag"),
            Path::new("/emu/sdcard/output/a.frag.control"),
            Path::new("/emu/sdcard/output/a.frag.code"),
        ]
    );
}

#[test]
fn test_job_artifacts_combined_layout() {
    let config = RelayConfig::new("/emu").with_layout(ResultLayout::Combined);
    let artifacts = JobArtifacts::for_job(&config, "a.frag");
    assert_eq!(artifacts.files().len(), 2);
}

#[test]
fn test_result_paths_existence() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ResultPaths::Split {
        control: dir.path().join("a.control"),
        code: dir.path().join("a.code"),
    };
    assert!(!paths.all_exist());
    assert_eq!(paths.missing().len(), 2);

    fs::write(dir.path().join("a.control"), b"c").unwrap();
    assert!(!paths.all_exist());
    assert_eq!(paths.missing(), vec![dir.path().join("a.code").as_path()]);

    fs::write(dir.path().join("a.code"), b"c").unwrap();
    assert!(paths.all_exist());
    assert!(paths.missing().is_empty());
}
