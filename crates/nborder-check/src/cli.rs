//! Command line surface of `check-notebooks-in-order`

use crate::batch::RunnerConfig;
use crate::options::OrderPolicy;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::Level;

/// Build the command definition
#[must_use]
pub fn command() -> Command {
    Command::new("check-notebooks-in-order")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Check that Jupyter notebooks were executed top to bottom")
        .arg(
            Arg::new("strip-on-fail")
                .long("strip-on-fail")
                .action(ArgAction::SetTrue)
                .overrides_with("no-strip-on-fail")
                .help("Strip all output from notebooks that fail the check"),
        )
        .arg(
            Arg::new("no-strip-on-fail")
                .long("no-strip-on-fail")
                .action(ArgAction::SetTrue)
                .overrides_with("strip-on-fail")
                .help("Leave failing notebooks untouched (default)"),
        )
        .arg(
            Arg::new("policy")
                .long("policy")
                .default_value("strict")
                .value_parser(["strict", "sorted"])
                .help("strict: counts must be exactly 1..N; sorted: counts must only increase"),
        )
        .arg(
            Arg::new("jobs")
                .long("jobs")
                .short('j')
                .default_value("1")
                .value_parser(value_parser!(u64).range(1..))
                .help("Number of notebooks to check concurrently"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .conflicts_with("quiet")
                .help("Increase log verbosity (repeatable)"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .help("Only log errors"),
        )
        .arg(
            Arg::new("filenames")
                .value_name("FILENAMES")
                .num_args(0..)
                .value_parser(value_parser!(PathBuf))
                .help("Notebooks to check"),
        )
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// Notebooks to check
    pub filenames: Vec<PathBuf>,
    /// Runner configuration built from the flags
    pub config: RunnerConfig,
    /// Log level for the stderr subscriber
    pub log_level: Level,
}

impl CliArgs {
    /// Extract arguments from matches produced by [`command`]
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let filenames = matches
            .get_many::<PathBuf>("filenames")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        let policy = matches
            .get_one::<String>("policy")
            .and_then(|name| name.parse().ok())
            .unwrap_or(OrderPolicy::Strict);

        let jobs = matches
            .get_one::<u64>("jobs")
            .and_then(|jobs| usize::try_from(*jobs).ok())
            .unwrap_or(1);

        let config = RunnerConfig::new()
            .with_policy(policy)
            .with_strip_on_fail(matches.get_flag("strip-on-fail"))
            .with_jobs(jobs);

        let log_level = if matches.get_flag("quiet") {
            Level::ERROR
        } else {
            match matches.get_count("verbose") {
                0 => Level::WARN,
                1 => Level::INFO,
                2 => Level::DEBUG,
                _ => Level::TRACE,
            }
        };

        Self {
            filenames,
            config,
            log_level,
        }
    }

    /// Parse from an argument list (first item is the program name)
    ///
    /// # Errors
    /// Invalid arguments, or `--help` / `--version` requests
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;
        Ok(Self::from_matches(&matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = CliArgs::try_parse_from(["prog", "a.ipynb", "b.ipynb"]).unwrap();
        assert_eq!(args.filenames, vec![PathBuf::from("a.ipynb"), PathBuf::from("b.ipynb")]);
        assert_eq!(args.config, RunnerConfig::default());
        assert_eq!(args.log_level, Level::WARN);
    }

    #[test]
    fn no_filenames_allowed() {
        let args = CliArgs::try_parse_from(["prog"]).unwrap();
        assert!(args.filenames.is_empty());
    }

    #[test]
    fn strip_on_fail_last_flag_wins() {
        let args = CliArgs::try_parse_from(["prog", "--strip-on-fail"]).unwrap();
        assert!(args.config.strip_on_fail);

        let args =
            CliArgs::try_parse_from(["prog", "--strip-on-fail", "--no-strip-on-fail"]).unwrap();
        assert!(!args.config.strip_on_fail);

        let args =
            CliArgs::try_parse_from(["prog", "--no-strip-on-fail", "--strip-on-fail"]).unwrap();
        assert!(args.config.strip_on_fail);
    }

    #[test]
    fn policy_and_jobs() {
        let args = CliArgs::try_parse_from(["prog", "--policy", "sorted", "-j", "4"]).unwrap();
        assert_eq!(args.config.policy, OrderPolicy::Sorted);
        assert_eq!(args.config.jobs, 4);
    }

    #[test]
    fn rejects_zero_jobs_and_unknown_policy() {
        assert!(CliArgs::try_parse_from(["prog", "--jobs", "0"]).is_err());
        assert!(CliArgs::try_parse_from(["prog", "--policy", "loose"]).is_err());
    }

    #[test]
    fn verbosity_levels() {
        let args = CliArgs::try_parse_from(["prog", "-vv"]).unwrap();
        assert_eq!(args.log_level, Level::DEBUG);

        let args = CliArgs::try_parse_from(["prog", "-q"]).unwrap();
        assert_eq!(args.log_level, Level::ERROR);

        assert!(CliArgs::try_parse_from(["prog", "-q", "-v"]).is_err());
    }
}
