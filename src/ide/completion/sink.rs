//! Where a session delivers its candidates.

use super::item::LookupItem;

/// Receives candidates from a session as they become available.
///
/// A session hands over candidates in batches: local results first, slower
/// non-imported results later, so hosts can show something early.
pub trait CompletionSink {
    fn accept(&mut self, batch: Vec<LookupItem>);

    /// A hint shown below the popup (e.g. how to see more results).
    fn advertise(&mut self, text: &str);
}

/// A [`CompletionSink`] that keeps everything it receives.
#[derive(Clone, Debug, Default)]
pub struct CompletionResultSet {
    batches: Vec<Vec<LookupItem>>,
    advertisement: Option<String>,
}

impl CompletionResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> &[Vec<LookupItem>] {
        &self.batches
    }

    /// All items in delivery order.
    pub fn items(&self) -> impl Iterator<Item = &LookupItem> {
        self.batches.iter().flatten()
    }

    pub fn lookup_strings(&self) -> Vec<&str> {
        self.items().map(|item| item.lookup.as_str()).collect()
    }

    /// The first item with the given lookup string.
    pub fn find(&self, lookup: &str) -> Option<&LookupItem> {
        self.items().find(|item| item.lookup == lookup)
    }

    /// Index of the batch that delivered `lookup`.
    pub fn batch_of(&self, lookup: &str) -> Option<usize> {
        self.batches
            .iter()
            .position(|batch| batch.iter().any(|item| item.lookup == lookup))
    }

    pub fn advertisement(&self) -> Option<&str> {
        self.advertisement.as_deref()
    }

    pub fn len(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CompletionSink for CompletionResultSet {
    fn accept(&mut self, batch: Vec<LookupItem>) {
        if !batch.is_empty() {
            self.batches.push(batch);
        }
    }

    fn advertise(&mut self, text: &str) {
        self.advertisement = Some(text.to_owned());
    }
}
