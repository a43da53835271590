use std::collections::{BTreeMap, HashMap};

/// separator between entries of the `alternate_category` column
pub const ALTERNATE_CATEGORY_DELIMITER: char = '|';

/// builds the ordered category tags of a row: the primary category (verbatim)
/// followed by each trimmed alternate token, left to right.
///
/// tags are not deduplicated or case-normalized, and empty alternate tokens
/// are kept, so the result is the literal stored taxonomy of the row.
pub fn category_tags(primary: Option<&str>, alternate: Option<&str>) -> Vec<String> {
    let mut tags = Vec::new();
    if let Some(primary) = primary {
        tags.push(primary.to_string());
    }
    if let Some(alternate) = alternate {
        tags.extend(
            alternate
                .split(ALTERNATE_CATEGORY_DELIMITER)
                .map(|category| category.trim().to_string()),
        );
    }
    tags
}

/// running per-tag counts over a set of rows.
#[derive(Debug, Clone, Default)]
pub struct CategoryCensus {
    counts: HashMap<String, usize>,
    records: usize,
}

impl CategoryCensus {
    pub fn new() -> Self {
        Self::default()
    }

    /// records one row, counting each of its tags once per occurrence.
    pub fn add_record(&mut self, tags: &[String]) {
        for tag in tags {
            *self.counts.entry(tag.clone()).or_insert(0) += 1;
        }
        self.records += 1;
    }

    pub fn record_count(&self) -> usize {
        self.records
    }

    pub fn distinct_categories(&self) -> usize {
        self.counts.len()
    }

    pub fn count(&self, category: &str) -> usize {
        self.counts.get(category).copied().unwrap_or_default()
    }

    /// counts ordered by category name
    pub fn into_counts(self) -> BTreeMap<String, usize> {
        self.counts.into_iter().collect()
    }
}
