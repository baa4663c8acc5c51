//! The two node-link pages: the inline toy graph and the CSV-backed knowledge graph.

use crate::config::{Config, Selections};
use crate::data::load_graph;
use crate::datasets::toy_graph;
use crate::errors::RenderError;
use crate::filter::filter_graph;
use crate::logging::log_filter_applied;
use crate::pages::{finish, PageOutcome, PageView, GRAPH_VIEWER, KNOWLEDGE_GRAPH};
use crate::visual::{build_graph_spec, EmbedHints, GraphStyle, Renderer, VisualSpec};

pub const VIEWER_TITLE: &str = "Knowledge Graph Viewer";
pub const KNOWLEDGE_TITLE: &str = "Knowledge Graph";

pub fn graph_viewer(cfg: &Config, renderer: &dyn Renderer) -> Result<PageOutcome, RenderError> {
    let style = GraphStyle::titled(VIEWER_TITLE)
        .with_height(cfg.graph_height_px)
        .with_embed(EmbedHints {
            height_px: cfg.graph_height_px.saturating_add(50),
            scrolling: true,
        });
    let artifact = renderer.render(&VisualSpec::Graph(build_graph_spec(&toy_graph(), &style)))?;
    Ok(finish(
        GRAPH_VIEWER,
        PageOutcome::Rendered(PageView {
            title: VIEWER_TITLE.to_string(),
            notes: Vec::new(),
            artifact,
        }),
    ))
}

pub fn knowledge_graph(
    cfg: &Config,
    selections: &Selections,
    renderer: &dyn Renderer,
) -> Result<PageOutcome, RenderError> {
    let loaded = match load_graph(&cfg.nodes_path(), &cfg.edges_path(), cfg.edge_policy) {
        Ok(loaded) => loaded,
        Err(err) => {
            return Ok(finish(
                KNOWLEDGE_GRAPH,
                PageOutcome::Unavailable {
                    title: KNOWLEDGE_TITLE.to_string(),
                    message: format!("Knowledge graph data could not be loaded: {}", err),
                },
            ));
        }
    };

    let dataset = filter_graph(&loaded.dataset, &selections.node_kinds);
    log_filter_applied(KNOWLEDGE_GRAPH, loaded.dataset.nodes.len(), dataset.nodes.len());

    let style = GraphStyle::titled(KNOWLEDGE_TITLE).with_height(cfg.graph_height_px);
    let artifact = renderer.render(&VisualSpec::Graph(build_graph_spec(&dataset, &style)))?;
    let notes = loaded
        .warnings
        .iter()
        .map(|w| {
            format!(
                "Skipped edge {} -> {}: unknown node '{}'",
                w.source, w.target, w.missing
            )
        })
        .collect();

    Ok(finish(
        KNOWLEDGE_GRAPH,
        PageOutcome::Rendered(PageView {
            title: KNOWLEDGE_TITLE.to_string(),
            notes,
            artifact,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::{ArtifactKind, HtmlRenderer};
    use std::path::PathBuf;

    #[test]
    fn test_viewer_embed_scrolls() {
        let outcome = graph_viewer(&Config::default(), &HtmlRenderer::new()).unwrap();
        let artifact = outcome.artifact().unwrap();
        assert_eq!(artifact.kind, ArtifactKind::Graph);
        assert_eq!(artifact.embed.height_px, 650);
        assert!(artifact.embed.scrolling);
        assert!(artifact.html.contains("My Certifications"));
    }

    #[test]
    fn test_viewer_embed_height_saturates() {
        let cfg = Config {
            graph_height_px: u32::MAX - 10,
            ..Config::default()
        };
        let outcome = graph_viewer(&cfg, &HtmlRenderer::new()).unwrap();
        assert_eq!(outcome.artifact().unwrap().embed.height_px, u32::MAX);
    }

    #[test]
    fn test_missing_files_are_unavailable() {
        let cfg = Config {
            data_dir: PathBuf::from("/nonexistent/portfolio-data"),
            ..Config::default()
        };
        let outcome = knowledge_graph(&cfg, &Selections::default(), &HtmlRenderer::new()).unwrap();
        match outcome {
            PageOutcome::Unavailable { message, .. } => assert!(message.contains("is missing")),
            other => panic!("unexpected outcome {}", other.label()),
        }
    }
}
