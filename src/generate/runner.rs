//! `run_tests.sh` generation from a test config section.

use std::path::{Path, PathBuf};

use super::{shell_quote, write_executable};
use crate::config::{ConfigDocument, ConfigSection};
use crate::Error;

pub const DEFAULT_CONFIG: &str = "test.cfg";
pub const DEFAULT_SECTION: &str = "NarrativeMethodStoreTest";
pub const RUNNER_FILE: &str = "run_tests.sh";

/// Test settings forwarded to ant as `-Dkey=value` when present.
pub const DEFAULT_OPTIONS: [&str; 8] = [
    "test.temp-dir",
    "test.remove-temp-dir",
    "test.method-spec-git-repo",
    "test.method-spec-git-repo-branch",
    "test.method-spec-git-repo-refresh-rate",
    "test.method-spec-cache-size",
    "test.auth-service-url",
    "test.auth-service-url-allow-insecure",
];

const HEADER: &str = "# Generated file - do not check into git";
const ANT: &str = "ant";

#[derive(Debug, Clone)]
pub struct TestRunner {
    pub config: PathBuf,
    pub section: String,
    pub ant_target: String,
    /// Extra ant arguments, inserted verbatim after the target.
    pub ant_opts: String,
    pub options: Vec<String>,
    /// Defaults to the directory holding the config file.
    pub out_dir: Option<PathBuf>,
}

impl TestRunner {
    pub fn new(config: impl Into<PathBuf>) -> Self {
        Self {
            config: config.into(),
            section: DEFAULT_SECTION.to_string(),
            ant_target: "test".to_string(),
            ant_opts: String::new(),
            options: DEFAULT_OPTIONS.iter().map(|o| o.to_string()).collect(),
            out_dir: None,
        }
    }

    /// Renders the runner script. Options missing from `section` are skipped.
    pub fn render(&self, section: &ConfigSection) -> String {
        let mut command = format!("{ANT} {}", self.ant_target);
        if !self.ant_opts.trim().is_empty() {
            command.push(' ');
            command.push_str(self.ant_opts.trim());
        }
        for option in &self.options {
            if let Some(value) = section.get(option) {
                command.push(' ');
                command.push_str(&shell_quote(&format!("-D{option}={value}")));
            }
        }
        format!("{HEADER}\n{command}\n")
    }

    pub fn output_path(&self) -> PathBuf {
        let dir = match &self.out_dir {
            Some(dir) => dir.as_path(),
            None => match self.config.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            },
        };
        dir.join(RUNNER_FILE)
    }

    /// Loads the config, renders the runner and writes it. Returns the script path.
    pub fn generate(&self) -> Result<PathBuf, Error> {
        let doc = ConfigDocument::load(&self.config)?;
        let section = doc.section(&self.section)?;
        let script = self.render(section);

        let path = self.output_path();
        write_executable(&path, &script)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, Format};

    const TEST_CFG: &str = "\
[NarrativeMethodStoreTest]
test.temp-dir = /tmp/nms
test.method-spec-git-repo = https://github.com/kbase/narrative_method_specs
test.method-spec-cache-size = 500
unrelated = x
";

    #[test]
    fn test_render_includes_present_options_in_order() {
        let doc = ConfigDocument::parse(TEST_CFG, Format::Ini).unwrap();
        let runner = TestRunner::new("test.cfg");

        let script = runner.render(doc.section(DEFAULT_SECTION).unwrap());

        assert_eq!(
            script,
            "# Generated file - do not check into git\n\
             ant test -Dtest.temp-dir=/tmp/nms \
             -Dtest.method-spec-git-repo=https://github.com/kbase/narrative_method_specs \
             -Dtest.method-spec-cache-size=500\n"
        );
    }

    #[test]
    fn test_render_with_ant_opts_and_quoting() {
        let doc =
            ConfigDocument::parse("[t]\ntest.temp-dir = /tmp/a dir\n", Format::Ini).unwrap();
        let mut runner = TestRunner::new("test.cfg");
        runner.ant_opts = "-v".to_string();

        let script = runner.render(doc.section("t").unwrap());

        assert!(script.ends_with("ant test -v '-Dtest.temp-dir=/tmp/a dir'\n"));
    }

    #[test]
    fn test_output_path_defaults_to_config_dir() {
        assert_eq!(
            TestRunner::new("/repo/test/test.cfg").output_path(),
            PathBuf::from("/repo/test/run_tests.sh")
        );
        assert_eq!(
            TestRunner::new("test.cfg").output_path(),
            PathBuf::from("./run_tests.sh")
        );

        let mut runner = TestRunner::new("/repo/test/test.cfg");
        runner.out_dir = Some(PathBuf::from("/out"));
        assert_eq!(runner.output_path(), PathBuf::from("/out/run_tests.sh"));
    }

    #[test]
    fn test_generate_writes_runner() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join(DEFAULT_CONFIG);
        std::fs::write(&cfg, TEST_CFG).unwrap();

        let path = TestRunner::new(&cfg).generate().unwrap();

        assert_eq!(path, dir.path().join(RUNNER_FILE));
        let script = std::fs::read_to_string(&path).unwrap();
        assert!(script.contains("-Dtest.method-spec-cache-size=500"));
        assert!(!script.contains("unrelated"));
    }

    #[test]
    fn test_generate_missing_section_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join(DEFAULT_CONFIG);
        std::fs::write(&cfg, "[Other]\ntest.temp-dir = /tmp\n").unwrap();

        let err = TestRunner::new(&cfg).generate().unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingSection { ref section, .. })
                if section == DEFAULT_SECTION
        ));
        assert!(!dir.path().join(RUNNER_FILE).exists());
    }

    #[test]
    fn test_generate_missing_config() {
        let err = TestRunner::new("/nonexistent/test.cfg").generate().unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NotFound(_))));
    }
}
