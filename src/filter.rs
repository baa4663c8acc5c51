//! Filter stage: category membership and year-range overlap.
//!
//! Filtering borrows the source records and returns a fresh, order-preserving
//! `Vec`, so one loaded collection can be re-filtered for every selection change.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::errors::SelectionError;
use crate::model::{CertificationRecord, EducationRecord, GraphDataset, GraphNode};

/// Selection value that disables a category predicate.
pub const ALL_SENTINEL: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    SubsetOf(BTreeSet<String>),
}

impl CategoryFilter {
    /// Interpret a raw multiselect value. Any `"All"` entry wins over the rest.
    pub fn from_selection<S: AsRef<str>>(selection: &[S]) -> Self {
        if selection.iter().any(|s| s.as_ref() == ALL_SENTINEL) {
            return CategoryFilter::All;
        }
        Self::subset(selection.iter().map(|s| s.as_ref()))
    }

    pub fn subset<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        CategoryFilter::SubsetOf(values.into_iter().map(|s| s.as_ref().to_string()).collect())
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::SubsetOf(allowed) => allowed.contains(value),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

/// Inclusive year window chosen by the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    lo: i32,
    hi: i32,
}

impl YearRange {
    pub fn new(lo: i32, hi: i32) -> Result<Self, SelectionError> {
        if lo > hi {
            return Err(SelectionError::InvertedRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// Parse `"2001-2023"`.
    pub fn parse(raw: &str) -> Result<Self, SelectionError> {
        let bad = || SelectionError::BadRange(raw.to_string());
        let (lo, hi) = raw.trim().split_once('-').ok_or_else(bad)?;
        let lo = lo.trim().parse().map_err(|_| bad())?;
        let hi = hi.trim().parse().map_err(|_| bad())?;
        Self::new(lo, hi)
    }

    pub fn lo(&self) -> i32 {
        self.lo
    }

    pub fn hi(&self) -> i32 {
        self.hi
    }

    /// True when `[start, end]` shares at least one year with the window.
    pub fn overlaps(&self, span: YearSpan) -> bool {
        span.start <= self.hi && span.end >= self.lo
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSpan {
    pub start: i32,
    pub end: i32,
}

// =============================================================================
// Filterable records
// =============================================================================

/// A record exposing categorical fields and, optionally, a year span.
pub trait Filterable {
    type Field: Copy + Eq + fmt::Debug;

    fn category(&self, field: Self::Field) -> &str;

    /// Records without a span are never excluded by a range selection.
    fn span(&self) -> Option<YearSpan> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    DegreeLevel,
    Institution,
}

impl Filterable for EducationRecord {
    type Field = EducationField;

    fn category(&self, field: EducationField) -> &str {
        match field {
            EducationField::DegreeLevel => self.degree_level.as_str(),
            EducationField::Institution => &self.institution,
        }
    }

    fn span(&self) -> Option<YearSpan> {
        Some(YearSpan {
            start: self.start_year,
            end: self.end_year,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificationField {
    Issuer,
    Area,
}

impl CertificationField {
    pub fn column(&self) -> &'static str {
        match self {
            CertificationField::Issuer => "Issuer",
            CertificationField::Area => "Area",
        }
    }
}

impl Filterable for CertificationRecord {
    type Field = CertificationField;

    fn category(&self, field: CertificationField) -> &str {
        match field {
            CertificationField::Issuer => &self.issuer,
            CertificationField::Area => &self.area,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeField {
    Kind,
}

impl Filterable for GraphNode {
    type Field = NodeField;

    fn category(&self, field: NodeField) -> &str {
        match field {
            NodeField::Kind => &self.kind,
        }
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Category predicates (AND-combined) plus an optional year window.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec<F> {
    categories: Vec<(F, CategoryFilter)>,
    range: Option<YearRange>,
}

impl<F> Default for FilterSpec<F> {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            range: None,
        }
    }
}

impl<F> FilterSpec<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, field: F, filter: CategoryFilter) -> Self {
        self.categories.push((field, filter));
        self
    }

    pub fn with_range(mut self, range: YearRange) -> Self {
        self.range = Some(range);
        self
    }
}

pub fn filter<R>(records: &[R], spec: &FilterSpec<R::Field>) -> Vec<R>
where
    R: Filterable + Clone,
{
    records
        .iter()
        .filter(|r| matches(*r, spec))
        .cloned()
        .collect()
}

fn matches<R: Filterable>(record: &R, spec: &FilterSpec<R::Field>) -> bool {
    let categories_ok = spec
        .categories
        .iter()
        .all(|(field, cf)| cf.matches(record.category(*field)));
    let range_ok = match (spec.range, record.span()) {
        (Some(range), Some(span)) => range.overlaps(span),
        _ => true,
    };
    categories_ok && range_ok
}

/// Keep nodes whose kind passes, and only edges between surviving nodes.
pub fn filter_graph(dataset: &GraphDataset, kinds: &CategoryFilter) -> GraphDataset {
    let spec = FilterSpec::new().with_category(NodeField::Kind, kinds.clone());
    let nodes = filter(&dataset.nodes, &spec);
    let kept: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let edges = dataset
        .edges
        .iter()
        .filter(|e| kept.contains(e.source.as_str()) && kept.contains(e.target.as_str()))
        .cloned()
        .collect();
    GraphDataset { nodes, edges }
}

// =============================================================================
// Widget options
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionOrder {
    FirstSeen,
    Sorted,
}

/// `["All", distinct values...]` for a multiselect widget.
pub fn category_options<R: Filterable>(
    records: &[R],
    field: R::Field,
    order: OptionOrder,
) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for r in records {
        let v = r.category(field);
        if !values.iter().any(|seen| seen == v) {
            values.push(v.to_string());
        }
    }
    if order == OptionOrder::Sorted {
        values.sort();
    }
    let mut options = Vec::with_capacity(values.len() + 1);
    options.push(ALL_SENTINEL.to_string());
    options.extend(values);
    options
}

/// Earliest start and latest end across records, the slider's default window.
pub fn year_bounds<R: Filterable>(records: &[R]) -> Option<YearRange> {
    let spans: Vec<YearSpan> = records.iter().filter_map(|r| r.span()).collect();
    let lo = spans.iter().map(|s| s.start).min()?;
    let hi = spans.iter().map(|s| s.end).max()?;
    YearRange::new(lo, hi).ok()
}
