//! Code completion sessions.
//!
//! A [`CompletionSession`] answers one completion request. It resolves the
//! reference under the caret once, then runs the phases of its
//! [`CompletionStrategy`], pushing candidates through a deduplicating
//! [`Collector`] into the host's [`CompletionSink`].
//!
//! ## Usage
//!
//! ```ignore
//! let collaborators = Collaborators::from_model(&model, &builtins);
//! let mut session = CompletionSession::new(parameters, collaborators);
//! let mut results = CompletionResultSet::new();
//! let found = session.complete(&mut results);
//! ```

mod basic;
mod collaborators;
mod collector;
mod config;
mod error;
mod expected_type;
mod item;
mod keywords;
mod matcher;
mod named_args;
mod session;
mod sink;
mod smart;

use tokio_util::sync::CancellationToken;
use tracing::{debug, debug_span, warn};
use uuid::Uuid;

use crate::base::FilePosition;
use crate::hir::SourceRoot;
use crate::syntax::SyntaxNode;

pub use basic::SECOND_INVOCATION_ADVERTISEMENT;
pub use collaborators::{
    Collaborators, DeclarationFilter, GlobalIndex, KeywordCompletion, ReferenceResolver,
    ScopeSymbols, SmartCompletionOracle, SmartResult, VisibilityFilter, VisibilityOracle,
};
pub use collector::Collector;
pub use config::CompletionSessionConfiguration;
pub use error::{CompletionError, IndexError};
pub use expected_type::ExpectedTypeCompletion;
pub use item::{CandidateKey, CompletionItemKind, LookupItem};
pub use keywords::StandardKeywords;
pub use matcher::PrefixMatcher;
pub use named_args::is_only_named_argument_expected;
pub use session::{EXTENSIONS_PREFIX_THRESHOLD, SessionBase};
pub use sink::{CompletionResultSet, CompletionSink};
pub use smart::DESCRIPTOR_KIND_MASK;

/// How candidates are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompletionStrategy {
    /// Everything that fits the caret structurally.
    #[default]
    Basic,
    /// Only what fits the type expected at the caret.
    Smart,
}

/// One completion request.
#[derive(Clone, Debug)]
pub struct CompletionParameters {
    /// The caret in the physical file under edit.
    pub position: FilePosition,
    /// Syntax tree of the forked copy of that file, same offsets.
    pub file: SyntaxNode,
    /// Files the editor resolves the file against.
    pub source_root: SourceRoot,
    /// How many times completion was invoked in a row.
    pub invocation_count: u32,
    pub strategy: CompletionStrategy,
    pub cancel: CancellationToken,
}

impl CompletionParameters {
    pub fn new(position: FilePosition, file: SyntaxNode, source_root: SourceRoot) -> Self {
        Self {
            position,
            file,
            source_root,
            invocation_count: 1,
            strategy: CompletionStrategy::Basic,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_invocation_count(mut self, invocation_count: u32) -> Self {
        self.invocation_count = invocation_count;
        self
    }

    pub fn with_strategy(mut self, strategy: CompletionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

pub struct CompletionSession<'a> {
    strategy: CompletionStrategy,
    base: SessionBase<'a>,
}

impl<'a> CompletionSession<'a> {
    pub fn new(parameters: CompletionParameters, collaborators: Collaborators<'a>) -> Self {
        Self {
            strategy: parameters.strategy,
            base: SessionBase::new(parameters, collaborators),
        }
    }

    pub fn id(&self) -> Uuid {
        self.base.id()
    }

    pub fn strategy(&self) -> CompletionStrategy {
        self.strategy
    }

    pub fn base(&self) -> &SessionBase<'a> {
        &self.base
    }

    /// Run the session, delivering candidates to `sink`.
    ///
    /// Returns whether any candidate was produced. Cancellation stops the
    /// remaining phases; what was gathered so far is still delivered.
    pub fn complete(&mut self, sink: &mut dyn CompletionSink) -> bool {
        let span = debug_span!(
            "completion",
            session = %self.base.id(),
            strategy = ?self.strategy,
            prefix = self.base.matcher().prefix(),
        );
        let _guard = span.enter();

        let outcome = match self.strategy {
            CompletionStrategy::Basic => basic::complete(&mut self.base, sink),
            CompletionStrategy::Smart => smart::complete(&mut self.base, sink),
        };
        match outcome {
            Ok(()) => {}
            Err(CompletionError::Cancelled) => debug!("completion cancelled"),
            Err(error) => warn!(%error, "completion phase failed"),
        }

        let flushed = self.base.flush(sink);
        debug!(flushed, total = self.base.collector().len(), "completion finished");
        !self.base.collector().is_empty()
    }
}
