//! Integration tests for radar ingestion.

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use radar_spec::{ErrorKind, Ingester, QuadrantOrder, RadarError, SpecReader};

const SPECS: &str = r#"
rings:
  inner: { id: adopt, name: Adopt }
  mid_inner: { id: trial, name: Trial }
  mid_outer: { id: assess, name: Assess }
  outer: { id: hold, name: Hold }
quadrants:
  top_left: { id: techniques, name: Techniques }
  top_right: { id: tools, name: Tools }
  bottom_left: { id: platforms, name: Platforms }
  bottom_right: { id: languages, name: Languages }
"#;

fn write_blip(root: &Path, quadrant: &str, ring: &str, file: &str, content: &str) {
    let dir = root.join(quadrant).join(ring);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), content).unwrap();
}

/// Full ingestion over a four-ring radar with a new and an unchanged blip.
#[test]
fn test_ingest_full_radar() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::write(root.join("specs.yml"), SPECS).unwrap();

    write_blip(
        root,
        "platforms",
        "adopt",
        "kubernetes.yaml",
        "blip:\n  name: Kubernetes\n  is_new: true\n",
    );
    write_blip(
        root,
        "languages",
        "trial",
        "rust.yml",
        "blip:\n  name: Rust\n  description:\n    - Memory safety\n",
    );
    write_blip(root, "languages", "trial", "README.md", "ignored");

    let ingestion = Ingester::new(root).ingest().unwrap();
    assert_eq!(ingestion.processed, 2);
    assert_eq!(ingestion.radar.blip_count(), 2);

    let radar = &ingestion.radar;
    let kubernetes = radar.blips().iter().find(|b| b.name == "Kubernetes").unwrap();
    assert!(kubernetes.is_new());
    assert_eq!(kubernetes.previous_ring, None);
    assert_eq!(kubernetes.ring, "Adopt");
    assert_eq!(kubernetes.quadrant, "Platforms");

    let rust = radar.blips().iter().find(|b| b.name == "Rust").unwrap();
    assert!(!rust.is_new());
    assert_eq!(rust.previous_ring.as_deref(), Some("Trial"));
    assert_eq!(rust.description, vec!["Memory safety"]);
}

/// Discovery walks rings outward, so inner ring blips come first.
#[test]
fn test_ingest_orders_cells_by_ring() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::write(root.join("specs.yml"), SPECS).unwrap();

    write_blip(root, "tools", "hold", "old.yaml", "blip:\n  name: Old\n");
    write_blip(root, "tools", "adopt", "new.yaml", "blip:\n  name: New\n");

    let ingestion = Ingester::new(root).ingest().unwrap();
    let names: Vec<_> = ingestion.radar.blips().iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["New", "Old"]);
}

#[test]
fn test_ingest_empty_radar() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("specs.yaml"), SPECS).unwrap();

    let ingestion = Ingester::new(temp.path()).ingest().unwrap();
    assert_eq!(ingestion.processed, 0);
    assert_eq!(
        ingestion.radar.quadrants(QuadrantOrder::CLOCKWISE).len(),
        4
    );
}

#[test]
fn test_ingest_without_spec_fails() {
    let temp = tempdir().unwrap();
    let err = Ingester::new(temp.path()).ingest().unwrap_err();
    assert!(matches!(err, RadarError::SpecNotFound(_)));
}

#[test]
fn test_spec_yml_preferred_over_yaml() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("specs.yml"), SPECS).unwrap();
    fs::write(temp.path().join("specs.yaml"), "rings: []\nquadrants: []\n").unwrap();

    let path = SpecReader::find_spec_file(temp.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "specs.yml");
    assert!(Ingester::new(temp.path()).ingest().is_ok());
}

#[test]
fn test_ingest_rejects_two_rings() {
    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("specs.yml"),
        r#"
rings:
  inner: { id: adopt, name: Adopt }
  outer: { id: hold, name: Hold }
quadrants:
  top_left: { id: a, name: A }
  top_right: { id: b, name: B }
  bottom_left: { id: c, name: C }
  bottom_right: { id: d, name: D }
"#,
    )
    .unwrap();

    let err = Ingester::new(temp.path()).ingest().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_ingest_rejects_file_as_cell_directory() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::write(root.join("specs.yml"), SPECS).unwrap();
    fs::create_dir_all(root.join("tools")).unwrap();
    fs::write(root.join("tools").join("assess"), "oops").unwrap();

    let err = Ingester::new(root).ingest().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert!(err.to_string().contains("must be a directory"));
}

/// One bad blip aborts the whole run.
#[test]
fn test_ingest_aborts_on_bad_blip() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::write(root.join("specs.yml"), SPECS).unwrap();
    write_blip(root, "tools", "adopt", "good.yaml", "blip:\n  name: Good\n");
    write_blip(root, "tools", "trial", "bad.yaml", "blip:\n  tags: [a]\n");

    let err = Ingester::new(root).ingest().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains("bad.yaml"));
}
