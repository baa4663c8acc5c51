//! Node-link graph spec.

use serde::Serialize;

use crate::model::GraphDataset;
use crate::visual::EmbedHints;

pub const NEUTRAL_COLOR: &str = "#D3D3D3";

/// Node kind -> fill color, with a neutral fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    entries: Vec<(String, String)>,
    fallback: String,
}

impl ColorMap {
    pub fn new(fallback: &str) -> Self {
        Self {
            entries: Vec::new(),
            fallback: fallback.to_string(),
        }
    }

    pub fn with(mut self, kind: &str, color: &str) -> Self {
        self.entries.retain(|(k, _)| k != kind);
        self.entries.push((kind.to_string(), color.to_string()));
        self
    }

    pub fn color_for(&self, kind: &str) -> &str {
        self.entries
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, c)| c.as_str())
            .unwrap_or(self.fallback.as_str())
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        ColorMap::new(NEUTRAL_COLOR)
            .with("person", "#FF7F50")
            .with("education", "#87CEFA")
            .with("certification", "#DA70D6")
            .with("skill", "#90EE90")
            .with("project", "#FFD700")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Canvas {
    pub height: String,
    pub width: String,
    pub bgcolor: String,
    pub font_color: String,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            height: "600px".to_string(),
            width: "100%".to_string(),
            bgcolor: "#ffffff".to_string(),
            font_color: "black".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphStyle {
    pub title: String,
    pub canvas: Canvas,
    pub colors: ColorMap,
    pub embed: EmbedHints,
}

impl GraphStyle {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            canvas: Canvas::default(),
            colors: ColorMap::default(),
            embed: EmbedHints::default(),
        }
    }

    /// Canvas height in pixels; the embed frame follows it.
    pub fn with_height(mut self, height_px: u32) -> Self {
        self.canvas.height = format!("{}px", height_px);
        self.embed.height_px = height_px;
        self
    }

    pub fn with_embed(mut self, embed: EmbedHints) -> Self {
        self.embed = embed;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisNode {
    pub id: String,
    pub label: String,
    pub title: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisEdge {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSpec {
    pub title: String,
    pub canvas: Canvas,
    pub nodes: Vec<VisNode>,
    pub edges: Vec<VisEdge>,
    #[serde(skip)]
    pub embed: EmbedHints,
}

pub fn build_graph_spec(dataset: &GraphDataset, style: &GraphStyle) -> GraphSpec {
    let nodes = dataset
        .nodes
        .iter()
        .map(|n| VisNode {
            id: n.id.clone(),
            label: n.label.clone(),
            title: n.hover_text().to_string(),
            color: style.colors.color_for(&n.kind).to_string(),
        })
        .collect();
    let edges = dataset
        .edges
        .iter()
        .map(|e| VisEdge {
            from: e.source.clone(),
            to: e.target.clone(),
            title: e.relation.clone(),
        })
        .collect();

    GraphSpec {
        title: style.title.clone(),
        canvas: style.canvas.clone(),
        nodes,
        edges,
        embed: style.embed,
    }
}
