//! Smart completion: only what fits the type expected at the caret.

use tracing::{debug, trace};

use crate::hir::{KindMask, Symbol};

use super::collaborators::{DeclarationFilter, SmartCompletionOracle, SmartResult};
use super::error::CompletionError;
use super::session::SessionBase;
use super::sink::CompletionSink;

/// Declaration kinds smart completion filters. SAM constructors are left
/// out: the oracle offers them itself when they fit.
pub const DESCRIPTOR_KIND_MASK: KindMask = KindMask::ORDINARY_FUNCTIONS
    .union(KindMask::EXTENSION_FUNCTIONS)
    .union(KindMask::VARIABLES)
    .union(KindMask::ENUM_ENTRIES);

pub(super) fn complete(
    base: &mut SessionBase<'_>,
    sink: &mut dyn CompletionSink,
) -> Result<(), CompletionError> {
    base.checkpoint()?;
    let smart = base.collaborators.smart;
    let Some(result) = run_oracle(base, smart) else {
        debug!("smart completion not applicable here");
        return Ok(());
    };

    let added = base.collector.add_all(result.additional_items);
    trace!(added, "smart additional items");

    let Some(filter) = result.declaration_filter else {
        return Ok(());
    };

    base.checkpoint()?;
    let variants = base.reference_variants(DESCRIPTOR_KIND_MASK);
    add_filtered(base, &filter, &variants);
    base.flush(sink);

    if base.should_run_top_level_completion() {
        base.checkpoint()?;
        let callables = base.top_level_callables();
        add_filtered(base, &filter, &callables);

        base.checkpoint()?;
        let objects = base.top_level_objects();
        add_filtered(base, &filter, &objects);
    }

    if base.should_run_extensions_completion() {
        base.checkpoint()?;
        let extensions = base.extensions();
        add_filtered(base, &filter, &extensions);
    }
    Ok(())
}

fn run_oracle<'a>(
    base: &SessionBase<'_>,
    smart: &'a dyn SmartCompletionOracle,
) -> Option<SmartResult<'a>> {
    let reference = base.reference()?;
    let resolution = base.resolution()?;
    smart.run(reference, resolution, base, &base.file)
}

fn add_filtered(base: &mut SessionBase<'_>, filter: &DeclarationFilter<'_>, symbols: &[Symbol]) {
    let items = symbols.iter().flat_map(|symbol| filter(symbol));
    let added = base.collector.add_all(items);
    trace!(candidates = symbols.len(), added, "smart filter");
}
