//! Inline datasets for the pages that do not read from disk.
//!
//! Each call builds a fresh collection so tests and pages never share state.

use crate::model::{
    CertificationRecord, DegreeLevel, EducationRecord, GraphDataset, GraphEdge, GraphNode,
    IconRef, YearMonth,
};

#[allow(clippy::too_many_arguments)]
fn education(
    institution: &str,
    degree: &str,
    start_year: i32,
    end_year: i32,
    degree_level: DegreeLevel,
    lat: f64,
    lon: f64,
    icon_url: &str,
) -> EducationRecord {
    EducationRecord {
        institution: institution.to_string(),
        degree: degree.to_string(),
        start_year,
        end_year,
        degree_level,
        lat,
        lon,
        icon: IconRef::marker(icon_url),
    }
}

/// Education journey in chronological order.
pub fn education_records() -> Vec<EducationRecord> {
    vec![
        education(
            "Northwest University of Politics and Law, China",
            "BSc International Economics and Trade",
            2001,
            2005,
            DegreeLevel::Bachelor,
            34.2736,
            108.9416,
            "assets/nwuppl_logo.png",
        ),
        education(
            "Humboldt University of Berlin, Germany",
            "Master in Economics and Management",
            2005,
            2008,
            DegreeLevel::Master,
            52.5179,
            13.3923,
            "assets/humboldt_logo.png",
        ),
        education(
            "Umeå University, Sweden",
            "Ph.D. in Economics",
            2009,
            2016,
            DegreeLevel::Doctor,
            63.8258,
            20.2630,
            "assets/umea_logo.png",
        ),
        education(
            "IT Högskolan, Gothenburg, Sweden",
            "Developer in AI and Machine Learning",
            2021,
            2023,
            DegreeLevel::CareerEducation,
            57.7089,
            11.9746,
            "assets/iths_logo.png",
        ),
    ]
}

fn certification(
    name: &str,
    issuer: &str,
    area: &str,
    issued: (i32, u32),
    expires: Option<(i32, u32)>,
) -> CertificationRecord {
    CertificationRecord {
        name: name.to_string(),
        issuer: issuer.to_string(),
        area: area.to_string(),
        issued: YearMonth {
            year: issued.0,
            month: issued.1,
        },
        expires: expires.map(|(year, month)| YearMonth { year, month }),
    }
}

pub fn certification_records() -> Vec<CertificationRecord> {
    vec![
        certification(
            "Microsoft Certified: Azure Data Engineer Associate",
            "Microsoft",
            "Cloud/Data Engineering",
            (2024, 9),
            None,
        ),
        certification(
            "Databricks Certified Machine Learning Professional",
            "Databricks",
            "Machine Learning",
            (2025, 1),
            Some((2027, 1)),
        ),
        certification(
            "Matillion Associate Certification",
            "Matillion",
            "Data Engineering",
            (2024, 8),
            Some((2027, 8)),
        ),
        certification(
            "Credit Risk Modeling in Python 2021",
            "Udemy",
            "Risk Modeling",
            (2021, 12),
            None,
        ),
    ]
}

/// Small hub-and-spoke graph shown on the graph viewer page.
pub fn toy_graph() -> GraphDataset {
    GraphDataset {
        nodes: vec![
            GraphNode::new("Yuna", "Yuna", "person").with_title("Me"),
            GraphNode::new("Education", "Education", "education").with_title("My Education"),
            GraphNode::new("Certifications", "Certifications", "certification")
                .with_title("My Certifications"),
            GraphNode::new("Data Engineer", "Data Engineer", "role").with_title("Job Role"),
        ],
        edges: vec![
            GraphEdge::new("Yuna", "Education", None),
            GraphEdge::new("Yuna", "Certifications", None),
            GraphEdge::new("Yuna", "Data Engineer", None),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_education_dates_are_ordered() {
        let records = education_records();
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.start_year <= r.end_year));
    }

    #[test]
    fn test_certification_dates_are_valid() {
        for r in certification_records() {
            assert!(YearMonth::new(r.issued.year, r.issued.month).is_ok());
            if let Some(exp) = r.expires {
                assert!(exp > r.issued);
            }
        }
    }

    #[test]
    fn test_toy_graph_edges_resolve() {
        let g = toy_graph();
        for e in &g.edges {
            assert!(g.contains_node(&e.source));
            assert!(g.contains_node(&e.target));
        }
    }

    #[test]
    fn test_factories_return_fresh_copies() {
        let mut a = education_records();
        a.clear();
        assert_eq!(education_records().len(), 4);
    }
}
