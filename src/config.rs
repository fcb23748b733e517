use crate::cli::{ColorMode, GraphArgs};
use crate::error::{GitcalError, Result};
use crate::graph::output::{CellContent, RenderOptions, WeekdayLabels};
use std::path::PathBuf;

/// Which repositories feed the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoSelection {
    /// One repository, given explicitly.
    Path(PathBuf),
    /// Every repository in the stored list.
    Stored,
    /// The repository around the current directory, else the stored list.
    CurrentOrStored,
}

/// Settings for one graph run, resolved once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOptions {
    pub email: Option<String>,
    pub selection: RepoSelection,
    pub render: RenderOptions,
    pub json: bool,
}

impl GraphOptions {
    pub fn from_args(args: &GraphArgs) -> Result<Self> {
        Self::resolve(args, crate::git::global_user_email)
    }

    /// `self_email` is only consulted for `--self`.
    pub fn resolve<F>(args: &GraphArgs, self_email: F) -> Result<Self>
    where
        F: FnOnce() -> Result<Option<String>>,
    {
        let content = CellContent::from_flags(args.count, args.days)?;

        let email = if args.use_self {
            let email = self_email()?.ok_or_else(|| {
                GitcalError::Config("--self needs user.email in your global git config".to_string())
            })?;
            Some(email)
        } else {
            args.email.clone()
        };

        let selection = match (&args.path, args.all) {
            (Some(path), _) => RepoSelection::Path(path.clone()),
            (None, true) => RepoSelection::Stored,
            (None, false) => RepoSelection::CurrentOrStored,
        };

        let colors = match args.color {
            ColorMode::Auto => console::colors_enabled(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        };

        Ok(Self {
            email,
            selection,
            render: RenderOptions {
                content,
                labels: if args.weekdays {
                    WeekdayLabels::Full
                } else {
                    WeekdayLabels::Compact
                },
                colors,
            },
            json: args.json,
        })
    }
}
