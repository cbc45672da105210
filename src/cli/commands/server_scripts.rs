//! Implementation of the `deploy-cfg server-scripts` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::generate::server::{build_server_scripts, ServerDeployment};

#[derive(Args, Debug)]
pub struct ServerScriptsArgs {
    /// Directory the service is installed in
    pub service_dir: PathBuf,
    /// Web archive to deploy
    pub war: PathBuf,
    /// Directory that receives the generated scripts
    pub target: PathBuf,
    pub java_home: PathBuf,
    /// Deployment configuration file
    pub deploy_cfg: PathBuf,
    /// Path to the application server's asadmin tool
    pub asadmin: PathBuf,
    /// Server domain, also the config section to read
    pub domain: String,
    /// Port, overriding the config's `port`
    pub port: Option<String>,
}

impl From<ServerScriptsArgs> for ServerDeployment {
    fn from(args: ServerScriptsArgs) -> Self {
        ServerDeployment {
            service_dir: args.service_dir,
            war: args.war,
            target: args.target,
            java_home: args.java_home,
            deploy_cfg: args.deploy_cfg,
            asadmin: args.asadmin,
            domain: args.domain,
            port: args.port,
        }
    }
}

pub fn execute(args: ServerScriptsArgs) -> Result<()> {
    let deployment = ServerDeployment::from(args);
    let written = build_server_scripts(&deployment).with_context(|| {
        format!(
            "failed to build server control scripts for domain {}",
            deployment.domain
        )
    })?;

    for path in written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
