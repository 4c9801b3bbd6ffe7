use crate::domain::model::{Category, CategoryCounts, InputRecord};
use std::cmp::Reverse;

/// Count category aliases across every record, filtered or not.
///
/// Each `(record, category)` pair counts once, so an alias listed twice in the
/// same record counts twice.
pub fn compute_category_counts(records: &[InputRecord]) -> CategoryCounts {
    records
        .iter()
        .flat_map(|record| record.categories.iter())
        .map(|category| category.alias.as_str())
        .collect()
}

/// Order categories by global frequency, most frequent first.
///
/// The sort is stable: equally frequent categories keep their input order.
pub fn rank_categories(categories: &mut [Category], counts: &CategoryCounts) {
    categories.sort_by_key(|category| Reverse(counts.get(&category.alias)));
}
