//! Grouped bar chart over aggregated counts.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::aggregate::GroupCount;
use crate::filter::CertificationField;
use crate::visual::EmbedHints;

/// Column naming and sizing. `key_columns[0]` is the category axis,
/// `key_columns[1]` (if any) splits bars by color.
#[derive(Debug, Clone, PartialEq)]
pub struct BarStyle {
    pub title: String,
    pub key_columns: Vec<String>,
    pub count_column: String,
    pub x_title: String,
    pub y_title: String,
    pub width: u32,
    pub height: u32,
    pub embed: EmbedHints,
}

impl BarStyle {
    /// Issuer on the x axis, Area as the color split.
    pub fn certifications() -> Self {
        let issuer = CertificationField::Issuer.column();
        let area = CertificationField::Area.column();
        Self {
            title: format!("Certifications Count by {} and {}", issuer, area),
            key_columns: vec![issuer.to_string(), area.to_string()],
            count_column: "Count".to_string(),
            x_title: issuer.to_string(),
            y_title: "Number of Certifications".to_string(),
            width: 700,
            height: 400,
            embed: EmbedHints {
                height_px: 460,
                scrolling: false,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub field: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x: Axis,
    pub y: Axis,
    pub color: Option<String>,
    pub tooltip: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
    #[serde(skip)]
    pub embed: EmbedHints,
}

pub fn build_bar_chart_spec(groups: &[GroupCount], style: &BarStyle) -> BarChartSpec {
    let rows = groups
        .iter()
        .map(|g| {
            let mut row = Map::new();
            for (column, value) in style.key_columns.iter().zip(&g.key) {
                row.insert(column.clone(), json!(value));
            }
            row.insert(style.count_column.clone(), json!(g.count));
            row
        })
        .collect();

    let category = style.key_columns.first().cloned().unwrap_or_default();
    let mut tooltip = style.key_columns.clone();
    tooltip.push(style.count_column.clone());

    BarChartSpec {
        title: style.title.clone(),
        width: style.width,
        height: style.height,
        x: Axis {
            field: category,
            title: style.x_title.clone(),
        },
        y: Axis {
            field: style.count_column.clone(),
            title: style.y_title.clone(),
        },
        color: style.key_columns.get(1).cloned(),
        tooltip,
        rows,
        embed: style.embed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(key: &[&str], count: usize) -> GroupCount {
        GroupCount {
            key: key.iter().map(|s| s.to_string()).collect(),
            count,
        }
    }

    #[test]
    fn test_rows_echo_key_fields() {
        let groups = vec![
            group(&["Udemy", "Risk Modeling"], 1),
            group(&["Microsoft", "Cloud"], 2),
        ];
        let spec = build_bar_chart_spec(&groups, &BarStyle::certifications());
        assert_eq!(spec.rows.len(), 2);
        assert_eq!(spec.rows[1]["Issuer"], "Microsoft");
        assert_eq!(spec.rows[1]["Area"], "Cloud");
        assert_eq!(spec.rows[1]["Count"], 2);
        assert_eq!(spec.x.field, "Issuer");
        assert_eq!(spec.y.title, "Number of Certifications");
        assert_eq!(spec.color.as_deref(), Some("Area"));
        assert_eq!(spec.tooltip, vec!["Issuer", "Area", "Count"]);
        assert_eq!(spec.title, "Certifications Count by Issuer and Area");
    }

    #[test]
    fn test_single_key_has_no_color_split() {
        let style = BarStyle {
            key_columns: vec!["Issuer".to_string()],
            ..BarStyle::certifications()
        };
        let spec = build_bar_chart_spec(&[group(&["Udemy"], 1)], &style);
        assert_eq!(spec.color, None);
        assert_eq!(spec.tooltip, vec!["Issuer", "Count"]);
    }

    #[test]
    fn test_empty_groups_yield_empty_chart() {
        let spec = build_bar_chart_spec(&[], &BarStyle::certifications());
        assert!(spec.rows.is_empty());
        assert_eq!(spec.width, 700);
        assert_eq!(spec.height, 400);
    }
}
