use std::collections::HashMap;

/// Per-table access counts, iterated in order of first occurrence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableAccessCounts {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl TableAccessCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one access of `table`
    pub fn record(&mut self, table: &str) {
        match self.counts.get_mut(table) {
            Some(count) => *count += 1,
            None => {
                self.order.push(table.to_string());
                self.counts.insert(table.to_string(), 1);
            }
        }
    }

    pub fn get(&self, table: &str) -> usize {
        self.counts.get(table).copied().unwrap_or(0)
    }

    /// Number of distinct tables
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn total_accesses(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.order
            .iter()
            .map(move |table| (table.as_str(), self.get(table)))
    }
}

impl<S: AsRef<str>> Extend<S> for TableAccessCounts {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for table in iter {
            self.record(table.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for TableAccessCounts {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counts = Self::new();
        counts.extend(iter);
        counts
    }
}
