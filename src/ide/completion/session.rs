//! State and queries shared by every completion strategy.

use once_cell::unsync::OnceCell;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};
use uuid::Uuid;

use crate::base::TextSize;
use crate::hir::{
    ClassKind, KindMask, ResolutionResult, ResolvedReference, SearchScope, Symbol,
};
use crate::syntax::{self, SyntaxNode, SyntaxToken};

use super::CompletionParameters;
use super::collaborators::{Collaborators, VisibilityFilter};
use super::collector::Collector;
use super::config::CompletionSessionConfiguration;
use super::error::{CompletionError, IndexError};
use super::matcher::PrefixMatcher;
use super::sink::CompletionSink;

/// Prefix length from which extensions are searched even without the
/// non-imported switch.
pub const EXTENSIONS_PREFIX_THRESHOLD: usize = 3;

pub struct SessionBase<'a> {
    pub(super) id: Uuid,
    pub(super) file: SyntaxNode,
    pub(super) offset: TextSize,
    pub(super) configuration: CompletionSessionConfiguration,
    pub(super) collaborators: Collaborators<'a>,
    pub(super) collector: Collector,
    pub(super) search_scope: SearchScope,
    cancel: CancellationToken,
    /// Resolution runs at most once per session.
    resolved: OnceCell<Option<(ResolvedReference, ResolutionResult)>>,
}

impl<'a> SessionBase<'a> {
    pub fn new(parameters: CompletionParameters, collaborators: Collaborators<'a>) -> Self {
        let CompletionParameters {
            position,
            file,
            source_root,
            invocation_count,
            cancel,
            ..
        } = parameters;

        let text = file.text().to_string();
        let matcher = PrefixMatcher::new(syntax::find_identifier_prefix(&text, position.offset));

        Self {
            id: Uuid::new_v4(),
            file,
            offset: position.offset,
            configuration: CompletionSessionConfiguration::from_invocation_count(invocation_count),
            collaborators,
            collector: Collector::new(matcher),
            search_scope: SearchScope::for_completion(source_root, position.file),
            cancel,
            resolved: OnceCell::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn configuration(&self) -> CompletionSessionConfiguration {
        self.configuration
    }

    pub fn matcher(&self) -> &PrefixMatcher {
        self.collector.matcher()
    }

    pub fn collector(&self) -> &Collector {
        &self.collector
    }

    /// The token the caret touches, if any.
    pub fn token(&self) -> Option<SyntaxToken> {
        syntax::token_at(&self.file, self.offset)
    }

    fn resolved(&self) -> Option<&(ResolvedReference, ResolutionResult)> {
        self.resolved
            .get_or_init(|| {
                self.collaborators
                    .resolver
                    .resolve_reference_at(&self.file, self.offset)
            })
            .as_ref()
    }

    pub fn reference(&self) -> Option<&ResolvedReference> {
        self.resolved().map(|(reference, _)| reference)
    }

    pub fn resolution(&self) -> Option<&ResolutionResult> {
        self.resolved().map(|(_, resolution)| resolution)
    }

    /// Fail with [`CompletionError::Cancelled`] once the host gave up.
    pub fn checkpoint(&self) -> Result<(), CompletionError> {
        if self.cancel.is_cancelled() {
            Err(CompletionError::Cancelled)
        } else {
            Ok(())
        }
    }

    // ========================================================================
    // POLICY
    // ========================================================================

    /// Whether `symbol` may be offered from the caret's position.
    ///
    /// Visible when inaccessible declarations were asked for, when the
    /// symbol has no visibility concept, when there is no enclosing
    /// declaration to judge from, or when the oracle cannot tell.
    pub fn is_visible_descriptor(&self, symbol: &Symbol) -> bool {
        if self.configuration.complete_non_accessible_declarations {
            return true;
        }
        if symbol.visibility.is_none() {
            return true;
        }
        let from = self.reference().and_then(|reference| {
            self.resolution()
                .and_then(|resolution| resolution.containing_declaration(reference.syntax()))
        });
        match from {
            Some(from) => self
                .collaborators
                .visibility
                .is_visible(symbol, from)
                .unwrap_or(true),
            None => true,
        }
    }

    /// Top-level declarations need an unqualified name and the
    /// non-imported switch.
    pub fn should_run_top_level_completion(&self) -> bool {
        self.configuration.complete_non_imported_declarations
            && self
                .reference()
                .is_some_and(|reference| !reference.is_qualified_selector())
    }

    pub fn should_run_extensions_completion(&self) -> bool {
        self.configuration.complete_non_imported_declarations
            || self.matcher().prefix_len() >= EXTENSIONS_PREFIX_THRESHOLD
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Symbols visible from the reference, of the given kinds, matching the
    /// prefix and passing the visibility policy.
    pub fn reference_variants(&self, kind_mask: KindMask) -> Vec<Symbol> {
        let Some((reference, resolution)) = self.resolved() else {
            return Vec::new();
        };
        self.collaborators.scope_symbols.visible_symbols(
            reference,
            resolution,
            kind_mask,
            self.matcher(),
            self,
        )
    }

    fn index_answer(&self, query: &'static str, answer: Result<Vec<Symbol>, IndexError>) -> Vec<Symbol> {
        match answer.map_err(CompletionError::from) {
            Ok(symbols) => {
                let visible: Vec<Symbol> = symbols
                    .into_iter()
                    .filter(|symbol| self.is_visible_descriptor(symbol))
                    .collect();
                trace!(query, count = visible.len(), "index answered");
                visible
            }
            Err(error) => {
                warn!(query, %error, "index query failed; continuing without its results");
                Vec::new()
            }
        }
    }

    pub fn top_level_callables(&self) -> Vec<Symbol> {
        let answer = self
            .collaborators
            .index
            .top_level_callables(&self.search_scope, self.matcher());
        self.index_answer("top_level_callables", answer)
    }

    pub fn top_level_objects(&self) -> Vec<Symbol> {
        let answer = self
            .collaborators
            .index
            .top_level_objects(&self.search_scope, self.matcher());
        self.index_answer("top_level_objects", answer)
    }

    /// Extensions applicable to the reference's receivers.
    pub fn extensions(&self) -> Vec<Symbol> {
        let Some((reference, resolution)) = self.resolved() else {
            return Vec::new();
        };
        let receivers = resolution.applicable_receivers(reference.syntax());
        let answer =
            self.collaborators
                .index
                .extensions(&self.search_scope, self.matcher(), &receivers);
        self.index_answer("extensions", answer)
    }

    /// Add every visible class-like declaration accepted by `kind_filter`.
    /// These never auto-insert.
    pub fn add_all_classes(&mut self, kind_filter: &dyn Fn(ClassKind) -> bool) -> usize {
        let answer = self.collaborators.index.all_type_declarations(
            &self.search_scope,
            self.matcher(),
            kind_filter,
            &*self,
        );
        let classes = self.index_answer("all_type_declarations", answer);
        let mut added = 0;
        for class in &classes {
            if self.collector.add_symbol(class, true) {
                added += 1;
            }
        }
        added
    }

    pub fn flush(&mut self, sink: &mut dyn CompletionSink) -> usize {
        self.collector.flush(sink)
    }
}

impl VisibilityFilter for SessionBase<'_> {
    fn is_visible(&self, symbol: &Symbol) -> bool {
        self.is_visible_descriptor(symbol)
    }
}
