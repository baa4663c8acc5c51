use std::path::PathBuf;

use crate::data::EdgePolicy;
use crate::errors::SelectionError;
use crate::filter::{CategoryFilter, YearRange};

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    pub edge_policy: EdgePolicy,
    pub graph_height_px: u32,
    pub map_style: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values fall back to defaults.
    pub fn from_vars<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            data_dir: get("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            out_dir: get("OUT_DIR").map(PathBuf::from).unwrap_or(defaults.out_dir),
            edge_policy: get("EDGE_POLICY")
                .and_then(|v| EdgePolicy::parse(&v))
                .unwrap_or(defaults.edge_policy),
            graph_height_px: get("GRAPH_HEIGHT_PX")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.graph_height_px),
            map_style: get("MAP_STYLE").unwrap_or(defaults.map_style),
        }
    }

    pub fn nodes_path(&self) -> PathBuf {
        self.data_dir.join("nodes.csv")
    }

    pub fn edges_path(&self) -> PathBuf {
        self.data_dir.join("edges.csv")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            out_dir: PathBuf::from("out/pages"),
            edge_policy: EdgePolicy::Reject,
            graph_height_px: 600,
            map_style: "mapbox://styles/mapbox/light-v9".to_string(),
        }
    }
}

/// Sidebar widget values for every page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selections {
    pub degrees: CategoryFilter,
    /// `None` means the full span of the data.
    pub years: Option<YearRange>,
    pub issuers: CategoryFilter,
    pub areas: CategoryFilter,
    pub node_kinds: CategoryFilter,
}

impl Selections {
    pub fn from_env() -> Result<Self, SelectionError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(get: F) -> Result<Self, SelectionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let years = match get("EDU_YEARS") {
            Some(raw) if !raw.trim().is_empty() => Some(YearRange::parse(&raw)?),
            _ => None,
        };
        // Comma-separated multiselect; unset means `All`.
        let list = |key: &str| get(key).map(|raw| parse_list(&raw)).unwrap_or_default();
        Ok(Self {
            degrees: list("EDU_DEGREES"),
            years,
            issuers: list("CERT_ISSUERS"),
            areas: list("CERT_AREAS"),
            node_kinds: list("GRAPH_TYPES"),
        })
    }
}

pub fn parse_list(raw: &str) -> CategoryFilter {
    let items: Vec<&str> = raw.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
    CategoryFilter::from_selection(&items)
}
