use crate::calendar::Today;
use crate::error::Result;
use crate::git::CommitSource;
use crate::model::{CommitCounts, CommitRecord};
use tracing::debug;

/// Count commits per day across `sources`, keeping only `email`'s commits
/// when a filter is given.
///
/// The first source that fails aborts the whole aggregation.
pub fn aggregate<S: CommitSource>(sources: &[S], email: Option<&str>, today: Today) -> Result<CommitCounts> {
    let mut counts = CommitCounts::new();
    for source in sources {
        let commits = source.commits()?;
        let added = add_commits(&mut counts, &commits, email, today);
        debug!(
            repo = %source.location().display(),
            scanned = commits.len(),
            counted = added,
            "aggregated repository"
        );
    }
    Ok(counts)
}

/// Fold one repository's commits into `counts`, returning how many landed.
pub fn add_commits(counts: &mut CommitCounts, commits: &[CommitRecord], email: Option<&str>, today: Today) -> usize {
    let mut added = 0;
    for commit in commits {
        if let Some(wanted) = email {
            if commit.author_email != wanted {
                continue;
            }
        }
        if let Some(days_ago) = today.days_ago(&commit.timestamp) {
            counts.record(days_ago);
            added += 1;
        }
    }
    added
}
