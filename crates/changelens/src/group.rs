// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Grouping impact records by category

use crate::classify::Category;
use crate::impact::ImpactRecord;

/// Impact records regrouped by category
///
/// Categories keep the order in which they were first seen and each group
/// keeps the records' original relative order. A record carrying several
/// categories appears in each of their groups.
#[derive(Debug, Clone, Default)]
pub struct CategoryGrouping<'a> {
    groups: Vec<(Category, Vec<&'a ImpactRecord>)>,
}

impl<'a> CategoryGrouping<'a> {
    /// Group `records` by category
    #[must_use]
    pub fn build(records: &'a [ImpactRecord]) -> Self {
        let mut grouping = Self::default();
        for record in records {
            for &category in &record.categories {
                grouping.push(category, record);
            }
        }
        grouping
    }

    fn push(&mut self, category: Category, record: &'a ImpactRecord) {
        match self.groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, members)) => members.push(record),
            None => self.groups.push((category, vec![record])),
        }
    }

    /// Records carrying `category`, empty if none do
    #[must_use]
    pub fn get(&self, category: Category) -> &[&'a ImpactRecord] {
        self.groups
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, members)| members.as_slice())
            .unwrap_or_default()
    }

    /// Iterate groups in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[&'a ImpactRecord])> {
        self.groups
            .iter()
            .map(|(category, members)| (*category, members.as_slice()))
    }

    /// Number of distinct categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no record carried any category
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
