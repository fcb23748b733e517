use super::{aggregate, output_graph, output_json, Grid};
use crate::calendar::Today;
use crate::cli::{CommonArgs, GraphArgs};
use crate::config::{GraphOptions, RepoSelection};
use crate::git::GitRepo;
use crate::repos::RepoList;
use anyhow::Context;
use tracing::debug;

pub fn exec(common: &CommonArgs, args: &GraphArgs) -> anyhow::Result<()> {
    let options = GraphOptions::from_args(args)?;
    let today = Today::capture();

    let repos = open_repositories(common, &options.selection)?;
    let counts = aggregate(&repos, options.email.as_deref(), today)
        .context("Failed to aggregate commits")?;
    debug!(repos = repos.len(), commits = counts.total(), "aggregation finished");

    let grid = Grid::build(&counts, today);

    if options.json {
        let names: Vec<String> = repos
            .iter()
            .map(|r| r.path().to_string_lossy().to_string())
            .collect();
        output_json(&counts, &grid, &names, options.email.as_deref())?;
    } else {
        output_graph(&grid, &options.render)?;
    }

    Ok(())
}

fn open_repositories(common: &CommonArgs, selection: &RepoSelection) -> anyhow::Result<Vec<GitRepo>> {
    match selection {
        RepoSelection::Path(path) => {
            let repo = GitRepo::open(path).context("Failed to open git repository")?;
            Ok(vec![repo])
        }
        RepoSelection::Stored => open_stored(common),
        RepoSelection::CurrentOrStored => match GitRepo::open_current() {
            Ok(repo) => Ok(vec![repo]),
            Err(e) => {
                debug!(error = %e, "current directory is not a repository, using the stored list");
                open_stored(common)
            }
        },
    }
}

fn open_stored(common: &CommonArgs) -> anyhow::Result<Vec<GitRepo>> {
    let file = common.repos_file()?;
    let list = RepoList::load(&file);
    debug!(file = %file.display(), repos = list.len(), "using stored repositories");

    list.paths()
        .iter()
        .map(|path| GitRepo::open(path).context("Failed to open stored repository"))
        .collect()
}
