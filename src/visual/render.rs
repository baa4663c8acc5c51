//! Self-contained HTML rendering of visual specs.
//!
//! Each spec kind has a template; the spec is serialized to JSON and injected
//! into an inline script that drives a browser-side widget library.

use serde_json::{json, Value};

use crate::errors::RenderError;
use crate::logging::{log_rendered, ProfileScope};
use crate::visual::{Artifact, BarChartSpec, Renderer, VisualSpec};

const GRAPH_TEMPLATE: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>__TITLE__</title>
<script src="https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js"></script>
<style>html,body{margin:0;padding:0}#canvas{border:1px solid lightgray}</style>
</head>
<body>
<div id="canvas"></div>
<script>
const spec = __SPEC__;
const el = document.getElementById("canvas");
el.style.height = spec.canvas.height;
el.style.width = spec.canvas.width;
el.style.background = spec.canvas.bgcolor;
new vis.Network(
  el,
  { nodes: new vis.DataSet(spec.nodes), edges: new vis.DataSet(spec.edges) },
  { nodes: { shape: "dot", font: { color: spec.canvas.font_color } }, physics: { stabilization: true } }
);
</script>
</body>
</html>
"##;

const GEO_TEMPLATE: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>__TITLE__</title>
<script src="https://unpkg.com/deck.gl@8.9.35/dist.min.js"></script>
<script src="https://api.tiles.mapbox.com/mapbox-gl-js/v1.13.3/mapbox-gl.js"></script>
<link href="https://api.tiles.mapbox.com/mapbox-gl-js/v1.13.3/mapbox-gl.css" rel="stylesheet">
<style>html,body{margin:0;padding:0;width:100%;height:100%}#map{position:absolute;inset:0}</style>
</head>
<body>
<div id="map"></div>
<script>
const spec = __SPEC__;
const arcs = new deck.ArcLayer({
  id: "arcs",
  data: spec.arcs,
  getSourcePosition: d => [d.from_lon, d.from_lat],
  getTargetPosition: d => [d.to_lon, d.to_lat],
  getSourceColor: d => d.color,
  getTargetColor: d => d.color,
  getWidth: spec.arc_layer.width,
  widthScale: spec.arc_layer.width_scale,
  widthMinPixels: spec.arc_layer.width_min_pixels,
  widthMaxPixels: spec.arc_layer.width_max_pixels,
  autoHighlight: true,
  pickable: true
});
const icons = new deck.IconLayer({
  id: "icons",
  data: spec.icons,
  getIcon: d => d.icon,
  getSize: spec.icon_layer.size,
  sizeScale: spec.icon_layer.size_scale,
  getPosition: d => [d.lon, d.lat],
  pickable: true
});
new deck.DeckGL({
  container: "map",
  mapStyle: spec.map_style,
  initialViewState: spec.view,
  controller: true,
  layers: [icons, arcs],
  getTooltip: ({ object }) => object && object.degree && {
    html: spec.tooltip.html
      .replace("{degree}", object.degree)
      .replace("{institution}", object.institution)
      .replace("{dates}", object.dates),
    style: { backgroundColor: spec.tooltip.background_color, color: spec.tooltip.color }
  }
});
</script>
</body>
</html>
"##;

const BAR_TEMPLATE: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>__TITLE__</title>
<script src="https://cdn.jsdelivr.net/npm/vega@5"></script>
<script src="https://cdn.jsdelivr.net/npm/vega-lite@5"></script>
<script src="https://cdn.jsdelivr.net/npm/vega-embed@6"></script>
</head>
<body>
<div id="chart"></div>
<script>
vegaEmbed("#chart", __SPEC__, { actions: false });
</script>
</body>
</html>
"##;

/// Default renderer: one HTML document per spec.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, spec: &VisualSpec) -> Result<Artifact, RenderError> {
        let _scope = ProfileScope::new("render", "html");
        let (template, payload) = match spec {
            VisualSpec::Graph(s) => (GRAPH_TEMPLATE, serde_json::to_value(s)?),
            VisualSpec::GeoArc(s) => (GEO_TEMPLATE, serde_json::to_value(s)?),
            VisualSpec::Bar(s) => (BAR_TEMPLATE, vega_lite(s)),
        };
        let html = template
            .replace("__TITLE__", &escape_html(spec.title()))
            .replace("__SPEC__", &script_json(&payload)?);

        let kind = spec.kind();
        log_rendered(kind.as_str(), spec.title(), html.len());
        Ok(Artifact {
            kind,
            title: spec.title().to_string(),
            html,
            embed: spec.embed(),
        })
    }
}

/// Vega-Lite document for a bar chart spec.
pub fn vega_lite(spec: &BarChartSpec) -> Value {
    let mut encoding = json!({
        "x": { "field": spec.x.field, "type": "nominal", "title": spec.x.title },
        "y": { "field": spec.y.field, "type": "quantitative", "title": spec.y.title },
        "tooltip": spec.tooltip.iter().map(|f| json!({ "field": f })).collect::<Vec<_>>(),
    });
    if let Some(color) = &spec.color {
        encoding["color"] = json!({ "field": color, "type": "nominal" });
    }
    json!({
        "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
        "title": spec.title,
        "width": spec.width,
        "height": spec.height,
        "data": { "values": spec.rows },
        "mark": "bar",
        "encoding": encoding,
    })
}

/// JSON safe to place inside a `<script>` element.
fn script_json(value: &Value) -> Result<String, RenderError> {
    let raw = serde_json::to_string(value)?;
    Ok(raw.replace("</", "<\\/"))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
