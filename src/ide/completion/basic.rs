//! Basic completion: everything that fits the caret structurally.

use tracing::trace;

use crate::hir::{ClassKind, KindMask};
use crate::syntax::{self, SyntaxToken};

use super::error::CompletionError;
use super::item::LookupItem;
use super::named_args;
use super::session::SessionBase;
use super::sink::CompletionSink;

/// Shown while the non-imported switch is off.
pub const SECOND_INVOCATION_ADVERTISEMENT: &str =
    "Press completion again to see non-imported declarations";

/// The caret names the start of a type (`val x: Fo|`, not `a.Fo|`).
fn is_types_only(token: &SyntaxToken, name_ref: &syntax::SyntaxNode) -> bool {
    syntax::enclosing_type_reference(token)
        .and_then(|type_ref| syntax::first_name_segment(&type_ref))
        .is_some_and(|first| &first == name_ref)
}

pub(super) fn complete(
    base: &mut SessionBase<'_>,
    sink: &mut dyn CompletionSink,
) -> Result<(), CompletionError> {
    let token = base.token();
    let named_only = token
        .as_ref()
        .is_some_and(named_args::is_only_named_argument_expected);

    if !named_only {
        let reference_phase_ran = complete_reference(base, token.as_ref())?;

        base.checkpoint()?;
        let keywords = base.collaborators.keywords;
        keywords.complete(&base.file, base.offset, &mut base.collector);

        if let Some(types_only) = reference_phase_ran {
            complete_non_imported(base, sink, types_only)?;
        }
    }

    base.checkpoint()?;
    if let Some(token) = &token {
        let added = named_args::complete(token, base.collaborators.resolver, &mut base.collector);
        trace!(added, "named arguments");
    }
    Ok(())
}

/// Returns `Some(types_only)` when the caret is on a reference outside a
/// modifier list, after adding what its scope offers.
fn complete_reference(
    base: &mut SessionBase<'_>,
    token: Option<&SyntaxToken>,
) -> Result<Option<bool>, CompletionError> {
    base.checkpoint()?;
    let Some(token) = token else {
        return Ok(None);
    };
    let Some(reference) = base.reference() else {
        return Ok(None);
    };
    if syntax::is_in_modifier_list(token) {
        return Ok(None);
    }

    let types_only = is_types_only(token, reference.syntax());
    let mask = if types_only {
        KindMask::TYPES | KindMask::PACKAGES
    } else {
        KindMask::ALL
    };

    let variants = base.reference_variants(mask);
    let mut added = 0;
    for symbol in &variants {
        if base.collector.add_symbol(symbol, false) {
            added += 1;
        }
    }
    if types_only {
        let unit = LookupItem::from_symbol(base.collaborators.builtins.unit());
        base.collector.add(unit);
    }
    trace!(added, types_only, "reference variants");
    Ok(Some(types_only))
}

fn complete_non_imported(
    base: &mut SessionBase<'_>,
    sink: &mut dyn CompletionSink,
    types_only: bool,
) -> Result<(), CompletionError> {
    base.checkpoint()?;
    let unqualified = base
        .reference()
        .is_some_and(|reference| !reference.is_qualified_selector());
    if !base.configuration.complete_non_imported_declarations && unqualified {
        sink.advertise(SECOND_INVOCATION_ADVERTISEMENT);
    }

    // local results go out before the slow index scans
    base.flush(sink);

    if base.should_run_top_level_completion() {
        base.checkpoint()?;
        let added = if types_only {
            base.add_all_classes(&|kind: ClassKind| !kind.is_singleton())
        } else {
            base.add_all_classes(&|kind: ClassKind| kind != ClassKind::EnumEntry)
        };
        trace!(added, "all classes");

        if !types_only {
            base.checkpoint()?;
            let callables = base.top_level_callables();
            for symbol in &callables {
                base.collector.add_symbol(symbol, true);
            }
        }
    }

    if !types_only && base.should_run_extensions_completion() {
        base.checkpoint()?;
        let extensions = base.extensions();
        for symbol in &extensions {
            base.collector.add_symbol(symbol, true);
        }
        trace!(count = extensions.len(), "extensions");
    }
    Ok(())
}
