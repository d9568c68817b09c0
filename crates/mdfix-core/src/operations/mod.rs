pub mod batch_runner;
pub mod file_operations;
pub mod patch_executor;

pub use batch_runner::{run, RunOptions};
pub use patch_executor::apply_patch_set;
