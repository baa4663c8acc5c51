use crate::aggregate::{aggregate, GroupBy};
use crate::config::Selections;
use crate::errors::RenderError;
use crate::filter::{filter, CertificationField, FilterSpec};
use crate::logging::{log_aggregated, log_filter_applied};
use crate::model::CertificationRecord;
use crate::pages::{finish, PageOutcome, PageView, CERTIFICATIONS};
use crate::visual::{build_bar_chart_spec, BarStyle, Renderer, VisualSpec};

pub const TITLE: &str = "Certifications";
pub const NO_DATA: &str = "No certifications match the selected filters.";

/// Markdown table of the filtered rows.
pub fn table(records: &[CertificationRecord]) -> Vec<String> {
    let mut lines = vec![
        "| Certification | Issuer | Issue Date | Expiry Date | Area |".to_string(),
        "|---|---|---|---|---|".to_string(),
    ];
    lines.extend(records.iter().map(|r| {
        format!(
            "| {} | {} | {} | {} | {} |",
            r.name,
            r.issuer,
            r.issued,
            r.expires.map(|e| e.to_string()).unwrap_or_default(),
            r.area
        )
    }));
    lines
}

pub fn certifications(
    records: &[CertificationRecord],
    selections: &Selections,
    renderer: &dyn Renderer,
) -> Result<PageOutcome, RenderError> {
    let spec = FilterSpec::new()
        .with_category(CertificationField::Issuer, selections.issuers.clone())
        .with_category(CertificationField::Area, selections.areas.clone());
    let filtered = filter(records, &spec);
    log_filter_applied(CERTIFICATIONS, records.len(), filtered.len());

    let mut notes = vec![format!("### Showing {} certifications", filtered.len())];
    notes.extend(table(&filtered));

    if filtered.is_empty() {
        return Ok(finish(
            CERTIFICATIONS,
            PageOutcome::NoData {
                title: TITLE.to_string(),
                notes,
                notice: NO_DATA.to_string(),
            },
        ));
    }

    let groups = aggregate(
        &filtered,
        GroupBy::Pair(CertificationField::Issuer, CertificationField::Area),
    );
    log_aggregated(filtered.len(), groups.len());
    let chart = build_bar_chart_spec(&groups, &BarStyle::certifications());
    let artifact = renderer.render(&VisualSpec::Bar(chart))?;

    Ok(finish(
        CERTIFICATIONS,
        PageOutcome::Rendered(PageView {
            title: TITLE.to_string(),
            notes,
            artifact,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::certification_records;
    use crate::filter::CategoryFilter;
    use crate::visual::HtmlRenderer;

    #[test]
    fn test_table_renders_missing_expiry_blank() {
        let lines = table(&certification_records()[3..]);
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[2],
            "| Credit Risk Modeling in Python 2021 | Udemy | 2021-12 |  | Risk Modeling |"
        );
    }

    #[test]
    fn test_unmatched_area_is_no_data() {
        let selections = Selections {
            areas: CategoryFilter::subset(["Quantum Computing"]),
            ..Selections::default()
        };
        let outcome =
            certifications(&certification_records(), &selections, &HtmlRenderer::new()).unwrap();
        assert!(outcome.artifact().is_none());
        match outcome {
            PageOutcome::NoData { notes, notice, .. } => {
                assert_eq!(notes[0], "### Showing 0 certifications");
                assert_eq!(notes.len(), 3);
                assert!(notes[1].starts_with("| Certification |"));
                assert_eq!(notice, NO_DATA);
            }
            other => panic!("unexpected outcome {}", other.label()),
        }
    }

    #[test]
    fn test_all_certifications_chart() {
        let outcome =
            certifications(&certification_records(), &Selections::default(), &HtmlRenderer::new())
                .unwrap();
        match outcome {
            PageOutcome::Rendered(view) => {
                assert_eq!(view.notes[0], "### Showing 4 certifications");
                assert!(view.artifact.html.contains("vegaEmbed"));
                assert!(view.artifact.html.contains("Certifications Count by Issuer and Area"));
            }
            other => panic!("unexpected outcome {}", other.label()),
        }
    }
}
