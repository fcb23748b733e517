pub mod repo;

pub use repo::{global_user_email, GitRepo};

use crate::error::Result;
use crate::model::CommitRecord;
use std::path::Path;

/// Anything that can list the commits of one repository.
pub trait CommitSource {
    /// Where the commits come from, used in error messages and output.
    fn location(&self) -> &Path;

    fn commits(&self) -> Result<Vec<CommitRecord>>;
}
