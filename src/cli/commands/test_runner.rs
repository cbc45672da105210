//! Implementation of the `deploy-cfg test-runner` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::generate::runner::{TestRunner, DEFAULT_CONFIG, DEFAULT_SECTION};

#[derive(Args, Debug)]
pub struct TestRunnerArgs {
    /// Test configuration file
    #[arg(default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Extra options passed to ant, as a single argument
    #[arg(allow_hyphen_values = true)]
    pub ant_opts: Option<String>,

    /// Section holding the test settings
    #[arg(long, short, default_value = DEFAULT_SECTION)]
    pub section: String,

    /// Directory for run_tests.sh (defaults to the config file's directory)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Setting to forward as -Dkey=value; replaces the default list (repeatable)
    #[arg(long = "option", value_name = "KEY")]
    pub options: Vec<String>,
}

impl From<TestRunnerArgs> for TestRunner {
    fn from(args: TestRunnerArgs) -> Self {
        let mut runner = TestRunner::new(args.config);
        runner.section = args.section;
        runner.ant_opts = args.ant_opts.unwrap_or_default();
        runner.out_dir = args.out_dir;
        if !args.options.is_empty() {
            runner.options = args.options;
        }
        runner
    }
}

pub fn execute(args: TestRunnerArgs) -> Result<()> {
    let runner = TestRunner::from(args);
    println!("Using test config file {}", runner.config.display());

    let path = runner.generate().context("failed to generate test runner")?;

    println!(
        "Wrote test runner with target \"{}\" to: {}",
        runner.ant_target,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::runner::DEFAULT_OPTIONS;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: TestRunnerArgs,
    }

    #[test]
    fn test_defaults() {
        let runner = TestRunner::from(TestCli::parse_from(["test-runner"]).args);

        assert_eq!(runner.config, PathBuf::from(DEFAULT_CONFIG));
        assert_eq!(runner.section, DEFAULT_SECTION);
        assert_eq!(runner.ant_opts, "");
        assert_eq!(runner.options.len(), DEFAULT_OPTIONS.len());
    }

    #[test]
    fn test_explicit_options_replace_defaults() {
        let args = TestCli::parse_from([
            "test-runner",
            "--option",
            "test.temp-dir",
            "--section",
            "T",
            "my.cfg",
            "-v",
        ])
        .args;
        let runner = TestRunner::from(args);

        assert_eq!(runner.config, PathBuf::from("my.cfg"));
        assert_eq!(runner.ant_opts, "-v");
        assert_eq!(runner.options, vec!["test.temp-dir".to_string()]);
        assert_eq!(runner.section, "T");
    }
}
