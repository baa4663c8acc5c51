//! Group-and-count over categorical fields, the bar chart's input.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::filter::Filterable;

/// One or two grouping fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy<F> {
    One(F),
    Pair(F, F),
}

impl<F: Copy> GroupBy<F> {
    pub fn fields(&self) -> Vec<F> {
        match *self {
            GroupBy::One(a) => vec![a],
            GroupBy::Pair(a, b) => vec![a, b],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub key: Vec<String>,
    pub count: usize,
}

/// Count records per distinct key tuple. Only non-empty groups are emitted,
/// ordered by key tuple.
pub fn aggregate<R: Filterable>(records: &[R], group_by: GroupBy<R::Field>) -> Vec<GroupCount> {
    let fields = group_by.fields();
    let mut counts: BTreeMap<Vec<String>, usize> = BTreeMap::new();
    for record in records {
        let key = fields
            .iter()
            .map(|f| record.category(*f).to_string())
            .collect::<Vec<_>>();
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::{certification_records, education_records};
    use crate::filter::{CertificationField, EducationField};
    use crate::model::CertificationRecord;

    #[test]
    fn test_pair_groups_cover_all_rows() {
        let certs = certification_records();
        let groups = aggregate(
            &certs,
            GroupBy::Pair(CertificationField::Issuer, CertificationField::Area),
        );
        assert_eq!(groups.len(), 4);
        assert_eq!(groups.iter().map(|g| g.count).sum::<usize>(), certs.len());
        assert_eq!(groups[0].key, vec!["Databricks", "Machine Learning"]);
    }

    #[test]
    fn test_single_key_merges_duplicates() {
        let mut certs = certification_records();
        certs.push(certs[0].clone());
        let groups = aggregate(&certs, GroupBy::One(CertificationField::Issuer));
        let microsoft = groups.iter().find(|g| g.key == vec!["Microsoft"]).unwrap();
        assert_eq!(microsoft.count, 2);
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        let none: Vec<CertificationRecord> = Vec::new();
        assert!(aggregate(&none, GroupBy::One(CertificationField::Area)).is_empty());
    }

    #[test]
    fn test_education_by_level() {
        let groups = aggregate(&education_records(), GroupBy::One(EducationField::DegreeLevel));
        assert!(groups.iter().all(|g| g.count == 1));
    }
}
