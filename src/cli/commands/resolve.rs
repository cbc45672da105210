//! Implementation of the `deploy-cfg resolve` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::{ConfigDocument, Overrides, ResolutionRequest};

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Configuration file (INI, or TOML by `.toml` extension)
    #[arg(long, short)]
    pub config: PathBuf,

    /// Section to read
    #[arg(long, short)]
    pub section: String,

    /// Key that must be present (repeatable)
    #[arg(long = "require", short = 'r', value_name = "KEY")]
    pub required: Vec<String>,

    /// Optional key, with an optional default (repeatable)
    #[arg(long = "optional", short = 'o', value_name = "KEY[=DEFAULT]")]
    pub optional: Vec<String>,

    /// Override a requested key (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Also take overrides for requested keys from PREFIX__KEY environment variables
    #[arg(long, env = "DEPLOY_CFG_ENV_PREFIX")]
    pub env_prefix: Option<String>,

    /// Append where each value came from (override, section or default)
    #[arg(long)]
    pub show_origin: bool,
}

impl ResolveArgs {
    fn request(&self) -> ResolutionRequest {
        let request = self
            .required
            .iter()
            .fold(ResolutionRequest::new(), |req, key| req.require(key.as_str()));
        self.optional
            .iter()
            .fold(request, |req, spec| match spec.split_once('=') {
                Some((key, default)) => req.optional(key, Some(default)),
                None => req.optional(spec.as_str(), None::<String>),
            })
            .all_overridable()
    }

    /// Environment overrides for requested keys, then `--set` on top.
    ///
    /// Unrelated `PREFIX__*` variables are dropped; every `--set` key must be requested.
    fn overrides<I>(&self, request: &ResolutionRequest, env_vars: I) -> Result<Overrides>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut overrides = match &self.env_prefix {
            Some(prefix) => Overrides::from_vars(prefix, env_vars),
            None => Overrides::new(),
        };
        overrides.retain(|key| request.specs().iter().any(|spec| spec.key() == key));

        let mut explicit = Overrides::new();
        for assignment in &self.overrides {
            explicit.push_assignment(assignment)?;
        }
        overrides.merge(explicit);
        Ok(overrides)
    }
}

pub fn execute(args: ResolveArgs) -> Result<()> {
    for line in resolve_lines(&args, std::env::vars())? {
        println!("{line}");
    }
    Ok(())
}

fn resolve_lines<I>(args: &ResolveArgs, env_vars: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = (String, String)>,
{
    let request = args.request();
    let overrides = args.overrides(&request, env_vars)?;
    let doc = ConfigDocument::load(&args.config)?;
    let resolved = request.resolve(doc.section(&args.section)?, &overrides)?;

    Ok(resolved
        .iter()
        .map(|(key, value)| match resolved.origin(key) {
            Some(origin) if args.show_origin => format!("{key}={value} ({origin})"),
            _ => format!("{key}={value}"),
        })
        .collect())
}
