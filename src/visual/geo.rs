//! Geographic arc map: one arc per consecutive record pair plus one icon per record.

use serde::Serialize;

use crate::model::{EducationRecord, IconRef};
use crate::visual::{EmbedHints, NonEmpty};

/// Orange, green, blue; arc `i` takes `ARC_PALETTE[i % 3]`.
pub const ARC_PALETTE: [[u8; 3]; 3] = [[255, 140, 0], [0, 128, 0], [30, 144, 255]];

#[derive(Debug, Clone, PartialEq)]
pub struct GeoStyle {
    pub title: String,
    pub map_style: String,
    pub zoom: f64,
    pub pitch: f64,
    pub embed: EmbedHints,
}

impl Default for GeoStyle {
    fn default() -> Self {
        Self {
            title: "Education Journey".to_string(),
            map_style: "mapbox://styles/mapbox/light-v9".to_string(),
            zoom: 2.0,
            pitch: 45.0,
            embed: EmbedHints {
                height_px: 500,
                scrolling: false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcSegment {
    pub from_lon: f64,
    pub from_lat: f64,
    pub to_lon: f64,
    pub to_lat: f64,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconMarker {
    pub lon: f64,
    pub lat: f64,
    pub icon: IconRef,
    pub degree: String,
    pub institution: String,
    pub dates: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcLayerStyle {
    pub width: f64,
    pub width_scale: f64,
    pub width_min_pixels: f64,
    pub width_max_pixels: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IconLayerStyle {
    pub size: f64,
    pub size_scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub html: String,
    pub background_color: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoArcSpec {
    pub title: String,
    pub map_style: String,
    pub view: ViewState,
    pub arcs: Vec<ArcSegment>,
    pub icons: Vec<IconMarker>,
    pub arc_layer: ArcLayerStyle,
    pub icon_layer: IconLayerStyle,
    pub tooltip: Tooltip,
    #[serde(skip)]
    pub embed: EmbedHints,
}

/// Build the map for a non-empty, already ordered record sequence.
/// The initial view is centered on the first record.
pub fn build_geo_arc_spec(records: NonEmpty<'_, EducationRecord>, style: &GeoStyle) -> GeoArcSpec {
    let items = records.as_slice();
    let arcs = items
        .windows(2)
        .enumerate()
        .map(|(i, pair)| ArcSegment {
            from_lon: pair[0].lon,
            from_lat: pair[0].lat,
            to_lon: pair[1].lon,
            to_lat: pair[1].lat,
            color: ARC_PALETTE[i % ARC_PALETTE.len()],
        })
        .collect();
    let icons = items
        .iter()
        .map(|r| IconMarker {
            lon: r.lon,
            lat: r.lat,
            icon: r.icon.clone(),
            degree: r.degree.clone(),
            institution: r.institution.clone(),
            dates: r.dates_label(),
        })
        .collect();

    let first = records.first();
    GeoArcSpec {
        title: style.title.clone(),
        map_style: style.map_style.clone(),
        view: ViewState {
            latitude: first.lat,
            longitude: first.lon,
            zoom: style.zoom,
            pitch: style.pitch,
        },
        arcs,
        icons,
        arc_layer: ArcLayerStyle {
            width: 7.0,
            width_scale: 0.0001,
            width_min_pixels: 4.0,
            width_max_pixels: 25.0,
        },
        icon_layer: IconLayerStyle {
            size: 4.0,
            size_scale: 15.0,
        },
        tooltip: Tooltip {
            html: "<b>{degree}</b><br>{institution}<br>{dates}".to_string(),
            background_color: "black".to_string(),
            color: "white".to_string(),
        },
        embed: style.embed,
    }
}
