use std::collections::BTreeMap;

use doclib_types::{Category, DocumentRecord};

/// Per-category document counts, used for the number shown before new
/// entries.
///
/// This is a cache of registry cardinality. It is rebuilt from the full
/// list on every load and never trusted across a reload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryCounters {
    counts: BTreeMap<Category, usize>,
}

impl CategoryCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count `records` per category, replacing any previous state.
    pub fn rebuild(&mut self, records: &[DocumentRecord]) {
        self.counts.clear();
        for record in records {
            *self.counts.entry(record.category).or_default() += 1;
        }
    }

    pub fn get(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Bump one category and return its new count.
    pub fn increment(&mut self, category: Category) -> usize {
        let count = self.counts.entry(category).or_default();
        *count += 1;
        *count
    }

    pub fn set(&mut self, category: Category, count: usize) {
        self.counts.insert(category, count);
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doclib_types::{FileReference, Timestamp};

    fn record(category: Category, i: usize) -> DocumentRecord {
        DocumentRecord::new(
            format!("doc {i}"),
            category,
            FileReference::new(format!("/uploads/{i}.pdf")),
            Timestamp::now(),
        )
    }

    #[test]
    fn rebuild_counts_per_category() {
        let records = vec![
            record(Category::TouchComp, 1),
            record(Category::ProceduresInternal, 2),
            record(Category::TouchComp, 3),
        ];
        let mut counters = CategoryCounters::new();
        counters.increment(Category::ProceduresInternal);
        counters.increment(Category::ProceduresInternal);

        counters.rebuild(&records);
        assert_eq!(counters.get(Category::TouchComp), 2);
        assert_eq!(counters.get(Category::ProceduresInternal), 1);
        assert_eq!(counters.total(), 3);
    }

    #[test]
    fn increment_touches_one_category() {
        let mut counters = CategoryCounters::new();
        assert_eq!(counters.increment(Category::TouchComp), 1);
        assert_eq!(counters.increment(Category::TouchComp), 2);
        assert_eq!(counters.get(Category::ProceduresInternal), 0);
    }
}
