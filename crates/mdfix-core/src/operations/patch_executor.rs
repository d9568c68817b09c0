use super::file_operations::{read_text, write_text};
use crate::types::{FilePatchSet, PatchOutcome};
use log::debug;

/// Applies every rule of `patch_set` to its file in memory and writes the
/// result back once, only if it differs from what was read. With `dry_run`
/// the write is skipped but the outcome still reports the change.
pub fn apply_patch_set(patch_set: &FilePatchSet, dry_run: bool) -> PatchOutcome {
    let path = patch_set.path.as_path();

    let original = match read_text(path) {
        Ok(content) => content,
        Err(e) => return PatchOutcome::errored(path, e, dry_run),
    };

    let mut content = original.clone();
    let mut replacements = 0;

    for (i, rule) in patch_set.rules.iter().enumerate() {
        let (next, count) = rule.apply(&content);
        debug!(
            "{:?} rule #{} ({}) {:?}: {} replacement(s)",
            path,
            i + 1,
            if rule.matcher.is_pattern() { "pattern" } else { "literal" },
            rule.matcher.as_str(),
            count
        );
        content = next;
        replacements += count;
    }

    if content == original {
        return PatchOutcome::unchanged(path, dry_run);
    }

    if !dry_run {
        if let Err(e) = write_text(path, &content) {
            return PatchOutcome::errored(path, e, dry_run);
        }
    }

    PatchOutcome::changed(path, replacements, dry_run)
}
