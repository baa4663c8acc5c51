use portfolio::data::{
    build_manifest, file_sha256, load_graph, validate_schema, EdgePolicy, EDGE_COLUMNS,
    NODE_COLUMNS,
};
use portfolio::errors::DataSourceError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_csv(path: &Path, header: &[&str], rows: &[&str]) {
    let mut out = String::new();
    out.push_str(&header.join(","));
    out.push('\n');
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    fs::write(path, out).unwrap();
}

fn fixture(dir: &TempDir, nodes: &[&str], edges: &[&str]) -> (PathBuf, PathBuf) {
    let nodes_path = dir.path().join("nodes.csv");
    let edges_path = dir.path().join("edges.csv");
    write_csv(&nodes_path, &NODE_COLUMNS, nodes);
    write_csv(&edges_path, &EDGE_COLUMNS, edges);
    (nodes_path, edges_path)
}

#[test]
fn loads_nodes_and_edges_in_file_order() {
    let dir = TempDir::new().unwrap();
    let (n, e) = fixture(
        &dir,
        &["1,A,person", "2,B,skill", "3,\"C, the third\",project"],
        &["1,2,has", "1,3,built"],
    );
    let loaded = load_graph(&n, &e, EdgePolicy::Reject).unwrap();
    let ids: Vec<&str> = loaded.dataset.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(loaded.dataset.nodes[2].label, "C, the third");
    assert_eq!(loaded.dataset.edges[1].relation.as_deref(), Some("built"));
    assert!(loaded.warnings.is_empty());
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let dir = TempDir::new().unwrap();
    let nodes_path = dir.path().join("nodes.csv");
    fs::write(&nodes_path, "# exported nodes\nid,label,type\n\n1,A,person\n").unwrap();
    let edges_path = dir.path().join("edges.csv");
    write_csv(&edges_path, &EDGE_COLUMNS, &[]);
    let loaded = load_graph(&nodes_path, &edges_path, EdgePolicy::Reject).unwrap();
    assert_eq!(loaded.dataset.nodes.len(), 1);
    assert!(loaded.dataset.edges.is_empty());
}

#[test]
fn byte_order_mark_before_header_is_accepted() {
    let dir = TempDir::new().unwrap();
    let nodes_path = dir.path().join("nodes.csv");
    let edges_path = dir.path().join("edges.csv");
    fs::write(&nodes_path, "\u{feff}id,label,type\n1,A,person\n2,B,skill\n").unwrap();
    fs::write(&edges_path, "\u{feff}source,target,relation\n1,2,has\n").unwrap();

    assert!(validate_schema(&nodes_path, &NODE_COLUMNS).unwrap().ok);
    let loaded = load_graph(&nodes_path, &edges_path, EdgePolicy::Reject).unwrap();
    assert_eq!(loaded.dataset.nodes[0].id, "1");
    assert_eq!(loaded.dataset.edges.len(), 1);
}

#[test]
fn missing_file_is_data_source_error() {
    let dir = TempDir::new().unwrap();
    let nodes_path = dir.path().join("nodes.csv");
    write_csv(&nodes_path, &NODE_COLUMNS, &["1,A,person"]);
    let edges_path = dir.path().join("edges.csv");
    let err = load_graph(&nodes_path, &edges_path, EdgePolicy::Reject).unwrap_err();
    assert!(matches!(err, DataSourceError::Missing { .. }));
}

#[test]
fn wrong_header_is_schema_mismatch() {
    let dir = TempDir::new().unwrap();
    let nodes_path = dir.path().join("nodes.csv");
    write_csv(&nodes_path, &["id", "name", "kind"], &["1,A,person"]);
    let edges_path = dir.path().join("edges.csv");
    write_csv(&edges_path, &EDGE_COLUMNS, &[]);
    let err = load_graph(&nodes_path, &edges_path, EdgePolicy::Reject).unwrap_err();
    match err {
        DataSourceError::SchemaMismatch { found, .. } => {
            assert_eq!(found, vec!["id", "name", "kind"])
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn short_row_is_malformed_with_line_number() {
    let dir = TempDir::new().unwrap();
    let (n, e) = fixture(&dir, &["1,A,person", "2,B"], &[]);
    let err = load_graph(&n, &e, EdgePolicy::Reject).unwrap_err();
    match err {
        DataSourceError::Malformed { line, .. } => assert_eq!(line, 3),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn duplicate_node_id_rejected() {
    let dir = TempDir::new().unwrap();
    let (n, e) = fixture(&dir, &["1,A,person", "1,B,skill"], &[]);
    let err = load_graph(&n, &e, EdgePolicy::Reject).unwrap_err();
    assert!(matches!(err, DataSourceError::DuplicateNode { ref id } if id == "1"));
}

#[test]
fn dangling_edge_fails_fast_by_default() {
    let dir = TempDir::new().unwrap();
    let (n, e) = fixture(&dir, &["1,A,person"], &["1,42,knows"]);
    let err = load_graph(&n, &e, EdgePolicy::default()).unwrap_err();
    assert!(err.to_string().contains("unknown node '42'"));
}

#[test]
fn dangling_edge_dropped_under_drop_policy() {
    let dir = TempDir::new().unwrap();
    let (n, e) = fixture(&dir, &["1,A,person", "2,B,skill"], &["1,2,has", "2,42,knows"]);
    let loaded = load_graph(&n, &e, EdgePolicy::Drop).unwrap();
    assert_eq!(loaded.dataset.edges.len(), 1);
    assert_eq!(loaded.warnings.len(), 1);
    assert_eq!(loaded.warnings[0].missing, "42");
}

#[test]
fn schema_report_flags_mismatch() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.csv");
    write_csv(&good, &NODE_COLUMNS, &["1,A,person"]);
    assert!(validate_schema(&good, &NODE_COLUMNS).unwrap().ok);

    let bad = dir.path().join("bad.csv");
    write_csv(&bad, &["source", "target"], &["1,2"]);
    let report = validate_schema(&bad, &EDGE_COLUMNS).unwrap();
    assert!(!report.ok);
    assert!(report.message.starts_with("schema mismatch"));
}

#[test]
fn manifest_counts_and_hashes() {
    let dir = TempDir::new().unwrap();
    let (n, e) = fixture(&dir, &["1,A,person", "2,B,skill"], &["1,2,has", "9,2,knows"]);
    let manifest = build_manifest(&n, &e).unwrap();
    assert_eq!(manifest.node_count, 2);
    assert_eq!(manifest.edge_count, 1);
    assert_eq!(manifest.dropped_edges, 1);
    assert_eq!(manifest.nodes_sha256, file_sha256(&n).unwrap());
    assert_eq!(manifest.nodes_sha256.len(), 64);
    assert_ne!(manifest.nodes_sha256, manifest.edges_sha256);
}

#[test]
fn shipped_data_files_resolve() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let loaded =
        load_graph(&root.join("nodes.csv"), &root.join("edges.csv"), EdgePolicy::Reject).unwrap();
    assert!(!loaded.dataset.nodes.is_empty());
    assert!(!loaded.dataset.edges.is_empty());
}
