use crate::error::{GitcalError, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gitcal")]
#[command(about = "Contribution calendar of your commits across local git repositories")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[clap(flatten)]
    pub graph: GraphArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct CommonArgs {
    #[arg(long, global = true, env = "GITCAL_REPOS", help = "File listing stored repositories [default: ~/.gitcal]")]
    pub repos_file: Option<PathBuf>,
}

impl CommonArgs {
    pub fn repos_file(&self) -> Result<PathBuf> {
        match &self.repos_file {
            Some(path) => Ok(path.clone()),
            None => crate::repos::default_path(),
        }
    }
}

#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphArgs {
    #[arg(short, long, help = "Only count commits authored by this email (exact match)")]
    pub email: Option<String>,

    #[arg(short = 's', long = "self", conflicts_with = "email", help = "Use user.email from your global git config")]
    pub use_self: bool,

    #[arg(short, long, help = "Show the commit count in each cell")]
    pub count: bool,

    #[arg(short, long, help = "Show the day of the month in each cell")]
    pub days: bool,

    #[arg(short, long, help = "Label every weekday in the gutter")]
    pub weekdays: bool,

    #[arg(short, long, help = "Repository to analyze")]
    pub path: Option<PathBuf>,

    #[arg(short, long, conflicts_with = "path", help = "Analyze every stored repository")]
    pub all: bool,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,

    #[arg(long, value_enum, default_value_t = ColorMode::Auto, help = "When to color the graph")]
    pub color: ColorMode,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the contribution graph (the default)
    Stats {
        #[clap(flatten)]
        graph: GraphArgs,
    },
    /// Scan a folder for git repositories and remember them
    #[command(alias = "scan")]
    Add {
        #[arg(help = "Folder to scan recursively")]
        folder: PathBuf,
    },
    /// Print version and build information
    Version,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Stats { .. } => "stats",
            Commands::Add { .. } => "add",
            Commands::Version => "version",
        }
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Graph options belong to the bare invocation or to `stats`; given
    /// before any subcommand they would otherwise be ignored.
    pub fn check_option_placement(&self) -> Result<()> {
        match &self.command {
            Some(command) if self.graph != GraphArgs::default() => Err(GitcalError::Config(format!(
                "graph options must follow the subcommand, e.g. `gitcal {} --count`",
                command.name()
            ))),
            _ => Ok(()),
        }
    }

    pub fn execute(self) -> anyhow::Result<()> {
        self.check_option_placement()?;
        match self.command {
            None => crate::graph::exec(&self.common, &self.graph),
            Some(Commands::Stats { graph }) => crate::graph::exec(&self.common, &graph),
            Some(Commands::Add { folder }) => crate::scan::exec(&self.common, &folder),
            Some(Commands::Version) => {
                print!("{}", version_text());
                Ok(())
            }
        }
    }
}

/// Version line plus whatever build metadata was baked in.
pub fn version_text() -> String {
    let mut text = format!("gitcal version {}\n", env!("CARGO_PKG_VERSION"));
    if let Some(date) = option_env!("GITCAL_BUILD_DATE") {
        text.push_str(&format!("Built on {date}\n"));
    }
    if let Some(hash) = option_env!("GITCAL_COMMIT_HASH") {
        text.push_str(&format!("Commit {hash}\n"));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_renders_the_graph() {
        let cli = Cli::try_parse_from(["gitcal", "-e", "u@x.com", "-c"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.graph.email.as_deref(), Some("u@x.com"));
        assert!(cli.graph.count);
    }

    #[test]
    fn scan_is_an_alias_for_add() {
        let cli = Cli::try_parse_from(["gitcal", "scan", "/src"]).unwrap();
        match cli.command {
            Some(Commands::Add { folder }) => assert_eq!(folder, PathBuf::from("/src")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn self_and_email_conflict() {
        assert!(Cli::try_parse_from(["gitcal", "--self", "--email", "a@b.c"]).is_err());
    }

    #[test]
    fn graph_options_before_a_subcommand_are_rejected() {
        let cli = Cli::try_parse_from(["gitcal", "-c", "stats"]).unwrap();
        let err = cli.check_option_placement().unwrap_err();
        assert!(err.to_string().contains("gitcal stats --count"), "{err}");

        let cli = Cli::try_parse_from(["gitcal", "--json", "version"]).unwrap();
        assert!(cli.check_option_placement().is_err());
    }

    #[test]
    fn graph_options_after_stats_are_accepted() {
        let cli = Cli::try_parse_from(["gitcal", "stats", "-c"]).unwrap();
        assert!(cli.check_option_placement().is_ok());
        match cli.command {
            Some(Commands::Stats { graph }) => assert!(graph.count),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["gitcal", "-c"]).unwrap();
        assert!(cli.check_option_placement().is_ok());
    }

    #[test]
    fn version_text_starts_with_the_package_version() {
        assert!(version_text().starts_with(&format!("gitcal version {}", env!("CARGO_PKG_VERSION"))));
    }
}
