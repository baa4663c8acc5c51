//! Visual builders and the renderer seam.
//!
//! Builders are pure functions from records to an immutable, serializable spec.
//! A `Renderer` turns a spec into an embeddable `Artifact`; tests can swap in
//! their own renderer and assert on specs without producing HTML.

pub mod bar;
pub mod geo;
pub mod graph;
pub mod render;

use serde::Serialize;

use crate::errors::RenderError;

pub use bar::{build_bar_chart_spec, BarChartSpec, BarStyle};
pub use geo::{build_geo_arc_spec, GeoArcSpec, GeoStyle, ARC_PALETTE};
pub use graph::{build_graph_spec, ColorMap, GraphSpec, GraphStyle};
pub use render::HtmlRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Graph,
    GeoArc,
    BarChart,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Graph => "graph",
            ArtifactKind::GeoArc => "geo_arc",
            ArtifactKind::BarChart => "bar_chart",
        }
    }
}

/// Sizing hints for the host page; the artifact itself fills its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmbedHints {
    pub height_px: u32,
    pub scrolling: bool,
}

impl Default for EmbedHints {
    fn default() -> Self {
        Self {
            height_px: 600,
            scrolling: false,
        }
    }
}

/// A self-contained document ready to embed.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub title: String,
    pub html: String,
    pub embed: EmbedHints,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisualSpec {
    Graph(GraphSpec),
    GeoArc(GeoArcSpec),
    Bar(BarChartSpec),
}

impl VisualSpec {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            VisualSpec::Graph(_) => ArtifactKind::Graph,
            VisualSpec::GeoArc(_) => ArtifactKind::GeoArc,
            VisualSpec::Bar(_) => ArtifactKind::BarChart,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            VisualSpec::Graph(s) => &s.title,
            VisualSpec::GeoArc(s) => &s.title,
            VisualSpec::Bar(s) => &s.title,
        }
    }

    pub fn embed(&self) -> EmbedHints {
        match self {
            VisualSpec::Graph(s) => s.embed,
            VisualSpec::GeoArc(s) => s.embed,
            VisualSpec::Bar(s) => s.embed,
        }
    }
}

pub trait Renderer {
    fn render(&self, spec: &VisualSpec) -> Result<Artifact, RenderError>;
}

/// A borrowed slice proven to hold at least one element.
#[derive(Debug, Clone, Copy)]
pub struct NonEmpty<'a, T> {
    items: &'a [T],
}

impl<'a, T> NonEmpty<'a, T> {
    pub fn new(items: &'a [T]) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    pub fn first(&self) -> &'a T {
        &self.items[0]
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
