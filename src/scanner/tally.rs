// Word frequency counter with a most-common-first listing.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Occurrence counts keyed by word, remembering first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, word: &str) {
        self.add_count(word, 1);
    }

    pub fn add_count(&mut self, word: &str, count: usize) {
        if count == 0 {
            return;
        }
        match self.counts.get_mut(word) {
            Some(existing) => *existing += count,
            None => {
                self.order.push(word.to_string());
                self.counts.insert(word.to_string(), count);
            }
        }
    }

    /// Add every count of `other`, in its first-seen order
    pub fn merge(&mut self, other: &Tally) {
        for (word, count) in other.iter() {
            self.add_count(word, count);
        }
    }

    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.order
            .iter()
            .map(|word| (word.as_str(), self.counts[word]))
    }

    /// Entries by descending count; ties keep first-seen order
    pub fn most_common(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    /// `"fuck (3), damn (1)"`
    pub fn format_listing(&self) -> String {
        self.most_common()
            .iter()
            .map(|(word, count)| format!("{word} ({count})"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<S: AsRef<str>> FromIterator<S> for Tally {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for word in iter {
            tally.add(word.as_ref());
        }
        tally
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for (word, count) in self.iter() {
            map.serialize_entry(word, &count)?;
        }
        map.end()
    }
}
