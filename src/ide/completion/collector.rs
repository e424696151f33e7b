//! Deduplicating, prefix-filtering candidate collector.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tracing::trace;

use super::item::{CandidateKey, LookupItem};
use super::matcher::PrefixMatcher;
use super::sink::CompletionSink;
use crate::hir::Symbol;

/// Ordered set of candidates gathered by one session.
///
/// The first candidate added under a [`CandidateKey`] wins; later duplicates
/// are dropped. Candidates whose lookup string does not match the prefix
/// are rejected. Flushing hands the candidates added since the previous
/// flush to the sink, so output is append-only.
#[derive(Debug)]
pub struct Collector {
    matcher: PrefixMatcher,
    items: IndexMap<CandidateKey, LookupItem, FxBuildHasher>,
    flushed: usize,
}

impl Collector {
    pub fn new(matcher: PrefixMatcher) -> Self {
        Self {
            matcher,
            items: IndexMap::default(),
            flushed: 0,
        }
    }

    pub fn matcher(&self) -> &PrefixMatcher {
        &self.matcher
    }

    /// Add a candidate; `false` when it was rejected or already present.
    pub fn add(&mut self, item: LookupItem) -> bool {
        if !self.matcher.prefix_matches(&item.lookup) {
            return false;
        }
        match self.items.entry(item.key()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(item);
                true
            }
        }
    }

    /// Add every item, returning how many were new.
    pub fn add_all(&mut self, items: impl IntoIterator<Item = LookupItem>) -> usize {
        items
            .into_iter()
            .map(|item| self.add(item))
            .filter(|&added| added)
            .count()
    }

    pub fn add_symbol(&mut self, symbol: &Symbol, suppress_auto_insertion: bool) -> bool {
        self.add(LookupItem::from_symbol(symbol).with_suppressed_auto_insertion(suppress_auto_insertion))
    }

    /// Emit the candidates added since the last flush. Returns how many
    /// were emitted.
    pub fn flush(&mut self, sink: &mut dyn CompletionSink) -> usize {
        let pending: Vec<LookupItem> = self.items.values().skip(self.flushed).cloned().collect();
        let count = pending.len();
        if count > 0 {
            sink.accept(pending);
            self.flushed = self.items.len();
        }
        trace!(count, "flushed candidates");
        count
    }

    pub fn items(&self) -> impl Iterator<Item = &LookupItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of candidates not yet flushed.
    pub fn pending(&self) -> usize {
        self.items.len() - self.flushed
    }
}
