//! Shared fixtures for completion scenarios.
//!
//! Every fixture models the same editing situation: the user edits
//! `main.ql` (the physical file), the resolver analyses a forked copy of it,
//! and `util.ql` is another file of the project that nothing imports.

#![allow(dead_code)]

use quill::base::{FileId, FilePosition, TextRange, TextSize};
use quill::hir::{
    Binding, BuiltIns, ClassKind, ScopeId, SemanticModel, SourceRoot, Symbol, SymbolId,
    SymbolKind, TypeName,
};
use quill::ide::completion::{
    Collaborators, CompletionParameters, CompletionResultSet, CompletionSession,
    CompletionStrategy,
};
use quill::syntax::{COMPLETION_MARKER, SyntaxKind, SyntaxNode, TreeBuilder};

/// The physical file under edit; its indexed content is stale.
pub const ORIGINAL: FileId = FileId(0);
/// A project file nothing imports.
pub const LIBRARY: FileId = FileId(1);
/// The synthetic copy of `ORIGINAL` the resolver analyses.
pub const FORK: FileId = FileId(100);

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn source_root() -> SourceRoot {
    let mut root = SourceRoot::new();
    root.insert(ORIGINAL, "/src/main.ql");
    root.insert(LIBRARY, "/src/util.ql");
    root
}

// ============================================================================
// SYNTAX
// ============================================================================

/// What the caret is typing.
#[derive(Clone, Copy, Debug)]
pub enum Typed<'a> {
    /// An identifier prefix, caret after it.
    Prefix(&'a str),
    /// Nothing yet: the host spliced the marker in after the caret.
    Nothing,
}

fn reference(b: &mut TreeBuilder, typed: Typed<'_>) {
    match typed {
        Typed::Prefix(text) => {
            b.typed_name_ref(text);
        }
        Typed::Nothing => {
            b.start(SyntaxKind::NameRef)
                .mark_cursor()
                .ident(COMPLETION_MARKER)
                .finish();
        }
    }
}

fn function_body(b: &mut TreeBuilder, statement: impl FnOnce(&mut TreeBuilder)) {
    b.start(SyntaxKind::SourceFile)
        .start(SyntaxKind::FunctionDecl)
        .keyword("fun")
        .ws()
        .ident("main")
        .start(SyntaxKind::ParameterList)
        .token(SyntaxKind::LParen, "(")
        .token(SyntaxKind::RParen, ")")
        .finish()
        .ws()
        .start(SyntaxKind::Block)
        .token(SyntaxKind::LBrace, "{")
        .ws();
    statement(b);
    b.ws().token(SyntaxKind::RBrace, "}").finish().finish().finish();
}

/// `fun main() { <typed> }`
pub fn statement(typed: Typed<'_>) -> (SyntaxNode, TextSize) {
    let mut b = TreeBuilder::new();
    function_body(&mut b, |b| reference(b, typed));
    let caret = b.cursor().expect("caret");
    (b.finish_tree(), caret)
}

/// `fun main() { <receiver>.<typed> }`
pub fn qualified(receiver: &str, typed: Typed<'_>) -> (SyntaxNode, TextSize) {
    let mut b = TreeBuilder::new();
    function_body(&mut b, |b| {
        b.start(SyntaxKind::DotQualifiedExpr)
            .name_ref(receiver)
            .token(SyntaxKind::Dot, ".");
        reference(b, typed);
        b.finish();
    });
    let caret = b.cursor().expect("caret");
    (b.finish_tree(), caret)
}

/// `fun main() { val x: <typed> }`
pub fn type_position(typed: Typed<'_>) -> (SyntaxNode, TextSize) {
    let mut b = TreeBuilder::new();
    function_body(&mut b, |b| {
        b.start(SyntaxKind::PropertyDecl)
            .keyword("val")
            .ws()
            .ident("x")
            .token(SyntaxKind::Colon, ":")
            .ws()
            .start(SyntaxKind::TypeReference);
        reference(b, typed);
        b.finish().finish();
    });
    let caret = b.cursor().expect("caret");
    (b.finish_tree(), caret)
}

/// `fun main() { draw(x = 1, <typed>) }`
pub fn call_after_named_argument(typed: Typed<'_>) -> (SyntaxNode, TextSize) {
    let mut b = TreeBuilder::new();
    function_body(&mut b, |b| {
        b.start(SyntaxKind::CallExpr)
            .name_ref("draw")
            .start(SyntaxKind::ValueArgumentList)
            .token(SyntaxKind::LParen, "(")
            .start(SyntaxKind::ValueArgument)
            .start(SyntaxKind::ValueArgumentName)
            .name_ref("x")
            .finish()
            .ws()
            .token(SyntaxKind::Eq, "=")
            .ws()
            .token(SyntaxKind::Literal, "1")
            .finish()
            .token(SyntaxKind::Comma, ",")
            .ws()
            .start(SyntaxKind::ValueArgument);
        reference(b, typed);
        b.finish().token(SyntaxKind::RParen, ")").finish().finish();
    });
    let caret = b.cursor().expect("caret");
    (b.finish_tree(), caret)
}

// ============================================================================
// SEMANTICS
// ============================================================================

/// A semantic model for `main.ql` plus the project around it.
pub struct Project {
    pub model: SemanticModel,
    pub builtins: BuiltIns,
    /// File-level scope of the fork (declarations and imports).
    pub file_scope: ScopeId,
    /// Scope of `main`'s body.
    pub body: ScopeId,
    pub main: SymbolId,
}

impl Project {
    /// `fun main()` in the fork, with nothing declared yet.
    pub fn new() -> Self {
        let mut model = SemanticModel::new();
        let main = model.declare(FORK, |id| Symbol::new(id, "main", SymbolKind::Function));
        let file_scope = model.add_scope(None, None);
        let body = model.add_scope(Some(file_scope), Some(main));
        model.bring_into_scope(file_scope, main);
        Self {
            model,
            builtins: BuiltIns::default(),
            file_scope,
            body,
            main,
        }
    }

    /// Declare a local of `main`.
    pub fn local(&mut self, name: &str, ty: &str) -> SymbolId {
        let id = self.model.declare(FORK, |id| {
            Symbol::new(id, name, SymbolKind::LocalVariable)
                .with_type(ty)
                .with_container(self.main)
        });
        self.model.bring_into_scope(self.body, id);
        id
    }

    /// Declare a symbol in the fork's file scope.
    pub fn file_level(&mut self, build: impl FnOnce(SymbolId) -> Symbol) -> SymbolId {
        let id = self.model.declare(FORK, build);
        self.model.bring_into_scope(self.file_scope, id);
        id
    }

    /// Declare a symbol in `util.ql` without importing it.
    pub fn library(&mut self, build: impl FnOnce(SymbolId) -> Symbol) -> SymbolId {
        self.model.declare(LIBRARY, build)
    }

    /// Import a symbol into the fork's file scope.
    pub fn import(&mut self, id: SymbolId) {
        self.model.bring_into_scope(self.file_scope, id);
    }

    /// Declare a symbol in the stale physical file.
    pub fn stale(&mut self, build: impl FnOnce(SymbolId) -> Symbol) -> SymbolId {
        self.model.declare(ORIGINAL, build)
    }

    /// Resolve every reference in `file` inside `main`'s body.
    pub fn bind(&mut self, file: &SyntaxNode, configure: impl FnOnce(Binding) -> Binding) {
        let binding = Binding::new(TextRange::up_to(file.text_range().end()), self.body);
        self.model.bind(configure(binding));
    }

    pub fn collaborators(&self) -> Collaborators<'_> {
        Collaborators::from_model(&self.model, &self.builtins)
    }
}

pub fn class(id: SymbolId, name: &str, kind: ClassKind) -> Symbol {
    Symbol::new(id, name, SymbolKind::Class(kind))
}

pub fn function(id: SymbolId, name: &str, returns: &str) -> Symbol {
    Symbol::new(id, name, SymbolKind::Function).with_type(TypeName::from(returns))
}

pub fn parameters(file: &SyntaxNode, caret: TextSize) -> CompletionParameters {
    CompletionParameters::new(FilePosition::new(ORIGINAL, caret), file.clone(), source_root())
}

/// Run one session and collect what it delivers.
pub fn run(
    collaborators: Collaborators<'_>,
    parameters: CompletionParameters,
) -> (bool, CompletionResultSet) {
    let mut session = CompletionSession::new(parameters, collaborators);
    let mut results = CompletionResultSet::new();
    let found = session.complete(&mut results);
    (found, results)
}

pub fn complete(
    project: &Project,
    file: &SyntaxNode,
    caret: TextSize,
    invocation_count: u32,
    strategy: CompletionStrategy,
) -> (bool, CompletionResultSet) {
    let parameters = parameters(file, caret)
        .with_invocation_count(invocation_count)
        .with_strategy(strategy);
    run(project.collaborators(), parameters)
}
