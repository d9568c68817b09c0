pub mod discover;
pub mod error;
pub mod matcher;
pub mod operations;
pub mod types;

pub use discover::find_files;
pub use error::{FixError, RuleError};
pub use matcher::Matcher;
pub use operations::{apply_patch_set, run, RunOptions};
pub use types::{FilePatchSet, PatchOutcome, PatchRule, PatchStatus, Summary};
