//! Flat-file graph loader: `nodes.csv` + `edges.csv`.
//!
//! Files are comma delimited with a header line. Blank lines and `#` comment
//! lines are skipped; fields may be double-quoted to carry commas.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::errors::DataSourceError;
use crate::logging::{log_dataset_loaded, log_integrity_warning, ts_now, ProfileScope};
use crate::model::{GraphDataset, GraphEdge, GraphNode};

pub const NODE_COLUMNS: [&str; 3] = ["id", "label", "type"];
pub const EDGE_COLUMNS: [&str; 3] = ["source", "target", "relation"];

/// What to do with an edge whose endpoint is not a declared node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Fail the whole load with `DataSourceError::DanglingEdge`.
    #[default]
    Reject,
    /// Drop the edge and report an `IntegrityWarning`.
    Drop,
}

impl EdgePolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "reject" => Some(EdgePolicy::Reject),
            "drop" => Some(EdgePolicy::Drop),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityWarning {
    pub source: String,
    pub target: String,
    pub missing: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedGraph {
    pub dataset: GraphDataset,
    pub warnings: Vec<IntegrityWarning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaReport {
    pub columns: Vec<String>,
    pub expected: Vec<String>,
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphManifest {
    pub nodes_path: String,
    pub edges_path: String,
    pub nodes_sha256: String,
    pub edges_sha256: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub dropped_edges: usize,
    pub warnings: Vec<IntegrityWarning>,
    pub generated_at: String,
}

// =============================================================================
// Loading
// =============================================================================

/// Load both files and resolve edges against the declared node ids.
pub fn load_graph(
    nodes_path: &Path,
    edges_path: &Path,
    policy: EdgePolicy,
) -> Result<LoadedGraph, DataSourceError> {
    let _scope = ProfileScope::new("data", "load_graph");
    let nodes = load_nodes(nodes_path)?;
    let edges = load_edges(edges_path)?;
    let loaded = resolve_edges(nodes, edges, policy)?;
    log_dataset_loaded(
        "knowledge_graph",
        loaded.dataset.nodes.len(),
        loaded.dataset.edges.len(),
        loaded.warnings.len(),
    );
    Ok(loaded)
}

pub fn load_nodes(path: &Path) -> Result<Vec<GraphNode>, DataSourceError> {
    let rows = read_table(path, &NODE_COLUMNS)?;
    let mut seen = HashSet::new();
    let mut nodes = Vec::with_capacity(rows.len());
    for (line, fields) in rows {
        let id = &fields[0];
        if id.is_empty() {
            return Err(malformed(path, line, "empty node id"));
        }
        if !seen.insert(id.clone()) {
            return Err(DataSourceError::DuplicateNode { id: id.clone() });
        }
        let label = if fields[1].is_empty() { id } else { &fields[1] };
        nodes.push(GraphNode::new(id, label, &fields[2]));
    }
    Ok(nodes)
}

pub fn load_edges(path: &Path) -> Result<Vec<GraphEdge>, DataSourceError> {
    let rows = read_table(path, &EDGE_COLUMNS)?;
    let mut edges = Vec::with_capacity(rows.len());
    for (line, fields) in rows {
        if fields[0].is_empty() || fields[1].is_empty() {
            return Err(malformed(path, line, "edge endpoint is empty"));
        }
        edges.push(GraphEdge::new(&fields[0], &fields[1], Some(&fields[2])));
    }
    Ok(edges)
}

/// Check every edge endpoint against the node ids, applying `policy` to misses.
pub fn resolve_edges(
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    policy: EdgePolicy,
) -> Result<LoadedGraph, DataSourceError> {
    let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let mut kept = Vec::with_capacity(edges.len());
    let mut warnings = Vec::new();

    for edge in edges {
        let missing = [&edge.source, &edge.target]
            .into_iter()
            .find(|id| !ids.contains(id.as_str()))
            .cloned();
        match (missing, policy) {
            (None, _) => kept.push(edge),
            (Some(missing), EdgePolicy::Reject) => {
                return Err(DataSourceError::DanglingEdge {
                    source_id: edge.source,
                    target_id: edge.target,
                    missing,
                });
            }
            (Some(missing), EdgePolicy::Drop) => {
                let warning = IntegrityWarning {
                    source: edge.source,
                    target: edge.target,
                    missing,
                };
                log_integrity_warning(&warning);
                warnings.push(warning);
            }
        }
    }

    Ok(LoadedGraph {
        dataset: GraphDataset { nodes, edges: kept },
        warnings,
    })
}

// =============================================================================
// Schema / manifest
// =============================================================================

pub fn validate_schema(path: &Path, expected: &[&str]) -> Result<SchemaReport, DataSourceError> {
    let header = read_header(path)?;
    let expected = expected.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let ok = header == expected;
    let message = if ok {
        "schema ok".to_string()
    } else {
        format!("schema mismatch: got {:?} expected {:?}", header, expected)
    };
    Ok(SchemaReport {
        columns: header,
        expected,
        ok,
        message,
    })
}

pub fn read_header(path: &Path) -> Result<Vec<String>, DataSourceError> {
    let content = read_file(path)?;
    for (idx, line) in content.lines().enumerate() {
        if is_skippable(line) {
            continue;
        }
        return split_fields(line)
            .map(|cols| cols.into_iter().map(|c| c.to_lowercase()).collect())
            .map_err(|reason| malformed(path, idx + 1, &reason));
    }
    Ok(Vec::new())
}

/// Validate both files and summarize them. Dangling edges are reported, not fatal.
pub fn build_manifest(
    nodes_path: &Path,
    edges_path: &Path,
) -> Result<GraphManifest, DataSourceError> {
    let loaded = load_graph(nodes_path, edges_path, EdgePolicy::Drop)?;
    Ok(GraphManifest {
        nodes_path: nodes_path.display().to_string(),
        edges_path: edges_path.display().to_string(),
        nodes_sha256: file_sha256(nodes_path)?,
        edges_sha256: file_sha256(edges_path)?,
        node_count: loaded.dataset.nodes.len(),
        edge_count: loaded.dataset.edges.len(),
        dropped_edges: loaded.warnings.len(),
        warnings: loaded.warnings,
        generated_at: ts_now(),
    })
}

pub fn file_sha256(path: &Path) -> Result<String, DataSourceError> {
    let mut file = File::open(path).map_err(|e| DataSourceError::from_io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file
            .read(&mut buf)
            .map_err(|e| DataSourceError::from_io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

pub fn default_manifest_path(data_dir: &Path) -> PathBuf {
    data_dir.join("graph.manifest.json")
}

// =============================================================================
// Table parsing
// =============================================================================

/// File contents with a leading UTF-8 byte order mark removed.
fn read_file(path: &Path) -> Result<String, DataSourceError> {
    let content = fs::read_to_string(path).map_err(|e| DataSourceError::from_io(path, e))?;
    match content.strip_prefix('\u{feff}') {
        Some(rest) => Ok(rest.to_string()),
        None => Ok(content),
    }
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn malformed(path: &Path, line: usize, reason: &str) -> DataSourceError {
    DataSourceError::Malformed {
        path: path.to_path_buf(),
        line,
        reason: reason.to_string(),
    }
}

/// Rows after the header, tagged with their 1-based line number.
fn read_table(
    path: &Path,
    expected: &[&str],
) -> Result<Vec<(usize, Vec<String>)>, DataSourceError> {
    let content = read_file(path)?;
    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if is_skippable(line) {
            continue;
        }
        let fields = split_fields(line).map_err(|reason| malformed(path, line_no, &reason))?;
        if header.is_none() {
            let found: Vec<String> = fields.iter().map(|c| c.to_lowercase()).collect();
            if found != expected {
                return Err(DataSourceError::SchemaMismatch {
                    path: path.to_path_buf(),
                    expected: expected.iter().map(|s| s.to_string()).collect(),
                    found,
                });
            }
            header = Some(found);
            continue;
        }
        if fields.len() != expected.len() {
            return Err(malformed(
                path,
                line_no,
                &format!("expected {} columns, got {}", expected.len(), fields.len()),
            ));
        }
        rows.push((line_no, fields));
    }

    if header.is_none() {
        return Err(DataSourceError::SchemaMismatch {
            path: path.to_path_buf(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
            found: Vec::new(),
        });
    }
    Ok(rows)
}

fn split_fields(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(current.trim().to_string());
    Ok(fields)
}
