use std::cmp::Reverse;

use crate::config::{Config, Selections};
use crate::errors::RenderError;
use crate::filter::{filter, year_bounds, EducationField, FilterSpec};
use crate::logging::log_filter_applied;
use crate::model::EducationRecord;
use crate::pages::{finish, PageOutcome, PageView, EDUCATION};
use crate::visual::{build_geo_arc_spec, GeoStyle, NonEmpty, Renderer, VisualSpec};

pub const TITLE: &str = "Education Journey";
pub const NO_DATA: &str = "No education records match the selected filters.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub degree: String,
    pub institution: String,
    pub dates: String,
}

impl TimelineEntry {
    pub fn to_markdown(&self) -> String {
        format!("### {}\n**{}**  \n_{}_", self.degree, self.institution, self.dates)
    }
}

pub fn style_for(cfg: &Config) -> GeoStyle {
    GeoStyle {
        map_style: cfg.map_style.clone(),
        ..GeoStyle::default()
    }
}

/// Most recent studies first; equal start years keep their source order.
pub fn timeline(records: &[EducationRecord]) -> Vec<TimelineEntry> {
    let mut sorted: Vec<&EducationRecord> = records.iter().collect();
    sorted.sort_by_key(|r| Reverse(r.start_year));
    sorted
        .into_iter()
        .map(|r| TimelineEntry {
            degree: r.degree.clone(),
            institution: r.institution.clone(),
            dates: r.dates_label(),
        })
        .collect()
}

pub fn education(
    records: &[EducationRecord],
    selections: &Selections,
    style: &GeoStyle,
    renderer: &dyn Renderer,
) -> Result<PageOutcome, RenderError> {
    let mut spec =
        FilterSpec::new().with_category(EducationField::DegreeLevel, selections.degrees.clone());
    if let Some(range) = selections.years.or_else(|| year_bounds(records)) {
        spec = spec.with_range(range);
    }
    let filtered = filter(records, &spec);
    log_filter_applied(EDUCATION, records.len(), filtered.len());

    let Some(non_empty) = NonEmpty::new(&filtered) else {
        return Ok(finish(
            EDUCATION,
            PageOutcome::NoData {
                title: TITLE.to_string(),
                notes: Vec::new(),
                notice: NO_DATA.to_string(),
            },
        ));
    };

    let artifact = renderer.render(&VisualSpec::GeoArc(build_geo_arc_spec(non_empty, style)))?;
    let mut notes = vec!["## Timeline".to_string()];
    notes.extend(timeline(&filtered).iter().map(TimelineEntry::to_markdown));

    Ok(finish(
        EDUCATION,
        PageOutcome::Rendered(PageView {
            title: TITLE.to_string(),
            notes,
            artifact,
        }),
    ))
}
