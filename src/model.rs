//! Record types shared by the dashboard pages.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

// =============================================================================
// Education
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DegreeLevel {
    Bachelor,
    Master,
    Doctor,
    CareerEducation,
}

impl DegreeLevel {
    pub const ALL: [DegreeLevel; 4] = [
        DegreeLevel::Bachelor,
        DegreeLevel::Master,
        DegreeLevel::Doctor,
        DegreeLevel::CareerEducation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DegreeLevel::Bachelor => "Bachelor",
            DegreeLevel::Master => "Master",
            DegreeLevel::Doctor => "Doctor",
            DegreeLevel::CareerEducation => "Career Education",
        }
    }
}

impl fmt::Display for DegreeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DegreeLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DegreeLevel::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == s.trim())
            .ok_or_else(|| format!("unknown degree level: {}", s))
    }
}

impl Serialize for DegreeLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Map marker image for a record. Icons are referenced, never loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconRef {
    pub url: String,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "anchorY")]
    pub anchor_y: u32,
}

impl IconRef {
    /// Square 128px marker anchored at its bottom edge.
    pub fn marker(url: &str) -> Self {
        Self {
            url: url.to_string(),
            width: 128,
            height: 128,
            anchor_y: 128,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationRecord {
    pub institution: String,
    pub degree: String,
    pub start_year: i32,
    pub end_year: i32,
    pub degree_level: DegreeLevel,
    pub lat: f64,
    pub lon: f64,
    pub icon: IconRef,
}

impl EducationRecord {
    /// Builds a record, rejecting a date range that ends before it starts.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        institution: &str,
        degree: &str,
        start_year: i32,
        end_year: i32,
        degree_level: DegreeLevel,
        lat: f64,
        lon: f64,
        icon: IconRef,
    ) -> Result<Self, String> {
        if start_year > end_year {
            return Err(format!(
                "{}: start year {} is after end year {}",
                institution, start_year, end_year
            ));
        }
        Ok(Self {
            institution: institution.to_string(),
            degree: degree.to_string(),
            start_year,
            end_year,
            degree_level,
            lat,
            lon,
            icon,
        })
    }

    pub fn dates_label(&self) -> String {
        format!("{} – {}", self.start_year, self.end_year)
    }
}

// =============================================================================
// Certifications
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, String> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or_else(|| format!("invalid year-month: {}-{:02}", year, month))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use chrono::Datelike;
        let date = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map_err(|e| format!("bad year-month '{}': {}", s, e))?;
        Ok(Self {
            year: date.year(),
            month: date.month(),
        })
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificationRecord {
    pub name: String,
    pub issuer: String,
    pub area: String,
    pub issued: YearMonth,
    pub expires: Option<YearMonth>,
}

// =============================================================================
// Graphs
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    /// Node type, drives color and filtering.
    pub kind: String,
    /// Hover text; falls back to `kind`.
    pub title: Option<String>,
}

impl GraphNode {
    pub fn new(id: &str, label: &str, kind: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: kind.to_string(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn hover_text(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub relation: Option<String>,
}

impl GraphEdge {
    pub fn new(source: &str, target: &str, relation: Option<&str>) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            relation: relation.filter(|r| !r.is_empty()).map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphDataset {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphDataset {
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_level_round_trip_names() {
        for level in DegreeLevel::ALL {
            assert_eq!(level.as_str().parse::<DegreeLevel>().unwrap(), level);
        }
        assert!("Diploma".parse::<DegreeLevel>().is_err());
    }

    #[test]
    fn test_education_rejects_inverted_dates() {
        let icon = IconRef::marker("https://example.org/x.png");
        let err = EducationRecord::new("U", "D", 2010, 2005, DegreeLevel::Master, 0.0, 0.0, icon);
        assert!(err.is_err());
    }

    #[test]
    fn test_dates_label_uses_en_dash() {
        let icon = IconRef::marker("u");
        let r = EducationRecord::new("U", "D", 2001, 2005, DegreeLevel::Bachelor, 0.0, 0.0, icon)
            .unwrap();
        assert_eq!(r.dates_label(), "2001 – 2005");
    }

    #[test]
    fn test_year_month_parse_and_display() {
        let ym: YearMonth = "2024-09".parse().unwrap();
        assert_eq!(ym, YearMonth { year: 2024, month: 9 });
        assert_eq!(ym.to_string(), "2024-09");
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!(YearMonth::new(2024, 0).is_err());
    }

    #[test]
    fn test_year_month_serializes_as_string() {
        let ym = YearMonth::new(2027, 1).unwrap();
        assert_eq!(serde_json::to_string(&ym).unwrap(), "\"2027-01\"");
    }

    #[test]
    fn test_node_hover_defaults_to_kind() {
        let n = GraphNode::new("1", "A", "person");
        assert_eq!(n.hover_text(), "person");
        assert_eq!(n.with_title("Me").hover_text(), "Me");
    }

    #[test]
    fn test_empty_relation_is_none() {
        assert_eq!(GraphEdge::new("a", "b", Some("")).relation, None);
        assert_eq!(GraphEdge::new("a", "b", Some("has")).relation.as_deref(), Some("has"));
    }
}
