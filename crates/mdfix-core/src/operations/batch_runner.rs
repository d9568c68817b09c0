use super::patch_executor::apply_patch_set;
use crate::types::{FilePatchSet, PatchOutcome, Summary};
use log::{info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub dry_run: bool,
}

/// Runs each patch set once, in order. A failing entry is recorded and the
/// batch moves on; `on_outcome` sees every outcome as soon as it exists.
pub fn run<F>(patch_sets: &[FilePatchSet], options: RunOptions, mut on_outcome: F) -> Summary
where
    F: FnMut(&PatchOutcome),
{
    info!(
        "Running {} patch set(s){}",
        patch_sets.len(),
        if options.dry_run { " (dry run)" } else { "" }
    );

    let mut summary = Summary::default();

    for patch_set in patch_sets {
        let outcome = apply_patch_set(patch_set, options.dry_run);
        if let Some(e) = outcome.error() {
            warn!("Skipping {:?}: {}", patch_set.path, e);
        }
        on_outcome(&outcome);
        summary.record(outcome);
    }

    info!(
        "Done: {} changed, {} unchanged, {} errored",
        summary.changed, summary.unchanged, summary.errored
    );

    summary
}
