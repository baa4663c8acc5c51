//! Page pipelines: load, filter, aggregate, build, render.
//!
//! Each page returns a `PageOutcome`. An empty filter result and an unreadable
//! data file are both ordinary outcomes here, so the host page only decides how
//! to show them.

pub mod certifications;
pub mod education;
pub mod graphs;

use serde::Serialize;

use crate::config::{Config, Selections};
use crate::data::load_graph;
use crate::datasets::{certification_records, education_records};
use crate::errors::RenderError;
use crate::filter::{
    category_options, year_bounds, CertificationField, EducationField, NodeField, OptionOrder,
};
use crate::logging::log_page_outcome;
use crate::visual::{Artifact, Renderer};

pub use certifications::certifications;
pub use education::{education, timeline, TimelineEntry};
pub use graphs::{graph_viewer, knowledge_graph};

pub const GRAPH_VIEWER: &str = "graph_viewer";
pub const EDUCATION: &str = "education";
pub const KNOWLEDGE_GRAPH: &str = "knowledge_graph";
pub const CERTIFICATIONS: &str = "certifications";

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub title: String,
    /// Markdown fragments shown around the artifact.
    pub notes: Vec<String>,
    pub artifact: Artifact,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Rendered(PageView),
    /// Filters matched nothing. `notes` are still shown above the notice.
    NoData {
        title: String,
        notes: Vec<String>,
        notice: String,
    },
    /// The page's data source could not be loaded.
    Unavailable { title: String, message: String },
}

impl PageOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            PageOutcome::Rendered(_) => "rendered",
            PageOutcome::NoData { .. } => "no_data",
            PageOutcome::Unavailable { .. } => "unavailable",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            PageOutcome::Rendered(view) => &view.title,
            PageOutcome::NoData { title, .. } | PageOutcome::Unavailable { title, .. } => title,
        }
    }

    pub fn artifact(&self) -> Option<&Artifact> {
        match self {
            PageOutcome::Rendered(view) => Some(&view.artifact),
            _ => None,
        }
    }
}

fn finish(page: &str, outcome: PageOutcome) -> PageOutcome {
    let detail = match &outcome {
        PageOutcome::Rendered(view) => view.artifact.kind.as_str().to_string(),
        PageOutcome::NoData { notice, .. } => notice.clone(),
        PageOutcome::Unavailable { message, .. } => message.clone(),
    };
    log_page_outcome(page, outcome.label(), &detail);
    outcome
}

/// Run all four pages with fresh datasets.
pub fn render_all(
    cfg: &Config,
    selections: &Selections,
    renderer: &dyn Renderer,
) -> Vec<(&'static str, Result<PageOutcome, RenderError>)> {
    vec![
        (GRAPH_VIEWER, graph_viewer(cfg, renderer)),
        (
            EDUCATION,
            education(
                &education_records(),
                selections,
                &education::style_for(cfg),
                renderer,
            ),
        ),
        (KNOWLEDGE_GRAPH, knowledge_graph(cfg, selections, renderer)),
        (
            CERTIFICATIONS,
            certifications(&certification_records(), selections, renderer),
        ),
    ]
}

/// Choices offered by the sidebar widgets, each list led by `"All"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarOptions {
    pub degrees: Vec<String>,
    /// Slider bounds as `[lo, hi]`.
    pub years: Option<(i32, i32)>,
    pub issuers: Vec<String>,
    pub areas: Vec<String>,
    /// Empty when the graph files cannot be loaded.
    pub node_kinds: Vec<String>,
}

pub fn sidebar_options(cfg: &Config) -> SidebarOptions {
    let education = education_records();
    let certs = certification_records();
    let node_kinds = match load_graph(&cfg.nodes_path(), &cfg.edges_path(), cfg.edge_policy) {
        Ok(loaded) => category_options(&loaded.dataset.nodes, NodeField::Kind, OptionOrder::Sorted),
        Err(_) => Vec::new(),
    };
    SidebarOptions {
        degrees: category_options(&education, EducationField::DegreeLevel, OptionOrder::FirstSeen),
        years: year_bounds(&education).map(|r| (r.lo(), r.hi())),
        issuers: category_options(&certs, CertificationField::Issuer, OptionOrder::FirstSeen),
        areas: category_options(&certs, CertificationField::Area, OptionOrder::FirstSeen),
        node_kinds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_sidebar_options_from_page_data() {
        let cfg = Config {
            data_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"),
            ..Config::default()
        };
        let options = sidebar_options(&cfg);
        assert_eq!(
            options.degrees,
            vec!["All", "Bachelor", "Master", "Doctor", "Career Education"]
        );
        assert_eq!(options.years, Some((2001, 2023)));
        assert_eq!(options.issuers[0], "All");
        assert!(options.issuers.contains(&"Udemy".to_string()));
        assert_eq!(
            options.node_kinds,
            vec!["All", "certification", "education", "person", "project", "skill"]
        );
    }

    #[test]
    fn test_sidebar_options_without_graph_files() {
        let cfg = Config {
            data_dir: PathBuf::from("/nonexistent/portfolio-data"),
            ..Config::default()
        };
        let options = sidebar_options(&cfg);
        assert!(options.node_kinds.is_empty());
        assert_eq!(options.areas[0], "All");
    }
}
