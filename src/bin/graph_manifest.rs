use portfolio::config::Config;
use portfolio::data::{
    build_manifest, default_manifest_path, validate_schema, EDGE_COLUMNS, NODE_COLUMNS,
};
use std::fs;

fn main() {
    let cfg = Config::from_env();
    let nodes_path = cfg.nodes_path();
    let edges_path = cfg.edges_path();

    for (path, expected) in [(&nodes_path, &NODE_COLUMNS[..]), (&edges_path, &EDGE_COLUMNS[..])] {
        let schema = match validate_schema(path, expected) {
            Ok(s) => s,
            Err(err) => {
                eprintln!("schema check failed: {}", err);
                std::process::exit(1);
            }
        };
        if !schema.ok {
            eprintln!("{}: {}", path.display(), schema.message);
            eprintln!("expected columns: {:?}", expected);
            std::process::exit(2);
        }
    }

    let manifest = match build_manifest(&nodes_path, &edges_path) {
        Ok(m) => m,
        Err(err) => {
            eprintln!("graph check failed: {}", err);
            std::process::exit(3);
        }
    };

    let out_path = default_manifest_path(&cfg.data_dir);
    let payload = match serde_json::to_string_pretty(&manifest) {
        Ok(p) => p,
        Err(err) => {
            eprintln!("failed to encode manifest: {}", err);
            std::process::exit(4);
        }
    };
    if let Err(err) = fs::write(&out_path, payload) {
        eprintln!("failed to write {}: {}", out_path.display(), err);
        std::process::exit(4);
    }
    println!(
        "wrote manifest {} ({} nodes, {} edges, {} dropped)",
        out_path.display(),
        manifest.node_count,
        manifest.edge_count,
        manifest.dropped_edges
    );
}
