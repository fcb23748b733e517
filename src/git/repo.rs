use super::CommitSource;
use crate::error::{GitcalError, Result};
use crate::model::CommitRecord;
use chrono::{DateTime, FixedOffset};
use gix::{discover, ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository containing `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let requested = path.as_ref();
        let repo = discover(requested).map_err(|e| GitcalError::repo_access(requested, e))?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        debug!(path = %path.display(), "opened repository");

        Ok(Self { repo, path })
    }

    /// Open the repository containing the current directory.
    pub fn open_current() -> Result<Self> {
        Self::open(std::env::current_dir()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every commit reachable from HEAD, newest first along each parent chain.
    pub fn collect_commits(&self) -> Result<Vec<CommitRecord>> {
        let mut head = self
            .repo
            .head()
            .map_err(|e| GitcalError::repo_access(&self.path, e))?;
        let head_commit = head
            .peel_to_commit_in_place()
            .map_err(|e| GitcalError::repo_access(&self.path, format!("no commit history ({e})")))?;

        let mut commits = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Reading {}", self.path.display()));

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let author = commit.author()?;
            let time = author
                .time()
                .map_err(|e| GitcalError::InvalidDate(format!("commit {commit_id}: {e}")))?;
            let timestamp = to_datetime(time.seconds, time.offset)?;

            commits.push(CommitRecord::new(author.email.to_string(), timestamp));

            for pid in commit.parent_ids() {
                stack.push_back(pid.into());
            }

            pb.inc(1);
        }

        pb.finish_and_clear();
        debug!(path = %self.path.display(), commits = commits.len(), "walked history");
        Ok(commits)
    }
}

impl CommitSource for GitRepo {
    fn location(&self) -> &Path {
        self.path()
    }

    fn commits(&self) -> Result<Vec<CommitRecord>> {
        self.collect_commits()
    }
}

fn to_datetime(seconds: i64, offset: i32) -> Result<DateTime<FixedOffset>> {
    let tz = FixedOffset::east_opt(offset)
        .ok_or_else(|| GitcalError::InvalidDate(format!("Invalid offset: {offset}")))?;
    DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.with_timezone(&tz))
        .ok_or_else(|| GitcalError::InvalidDate(format!("Invalid timestamp: {seconds}")))
}

/// `user.email` from the user's global git configuration, if set.
pub fn global_user_email() -> Result<Option<String>> {
    let config = gix::config::File::from_globals()
        .map_err(|e| GitcalError::Config(format!("cannot read global git config: {e}")))?;
    Ok(config
        .string("user.email")
        .map(|email| email.to_string().trim().to_string())
        .filter(|email| !email.is_empty()))
}
