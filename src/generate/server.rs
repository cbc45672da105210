//! `start_service` / `stop_service` scripts for a deployed web service.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{shell_quote, write_executable};
use crate::config::{
    ConfigDocument, ConfigError, ConfigSection, KeySpec, Overrides, ResolutionRequest,
};
use crate::Error;

pub const PORT: &str = "port";
pub const THREADS: &str = "server-threads";
pub const MIN_MEMORY: &str = "min-memory";
pub const MAX_MEMORY: &str = "max-memory";

pub const START_SCRIPT: &str = "start_service";
pub const STOP_SCRIPT: &str = "stop_service";

/// Where the service lives and how to reach its application server.
#[derive(Debug, Clone)]
pub struct ServerDeployment {
    pub service_dir: PathBuf,
    pub war: PathBuf,
    pub target: PathBuf,
    pub java_home: PathBuf,
    pub deploy_cfg: PathBuf,
    pub asadmin: PathBuf,
    /// Application server domain; also the config section to read.
    pub domain: String,
    /// Port given on the command line, preferred over the config value.
    pub port: Option<String>,
}

/// Launch parameters read from the service's config section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerParams {
    pub port: u16,
    #[serde(rename = "server-threads")]
    pub threads: u32,
    /// Initial heap, in megabytes.
    #[serde(rename = "min-memory")]
    pub min_memory: u32,
    /// Maximum heap, in megabytes.
    #[serde(rename = "max-memory")]
    pub max_memory: u32,
}

/// The keys a server launch needs. Only the port may be overridden.
pub fn server_request() -> ResolutionRequest {
    ResolutionRequest::new()
        .key(KeySpec::required(PORT).overridable())
        .require(THREADS)
        .require(MIN_MEMORY)
        .require(MAX_MEMORY)
}

impl ServerParams {
    pub fn resolve(section: &ConfigSection, port: Option<&str>) -> Result<Self, ConfigError> {
        let mut overrides = Overrides::new();
        overrides.insert_opt(PORT, port.map(str::to_string));
        server_request().resolve(section, &overrides)?.deserialize()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerScripts {
    pub start: String,
    pub stop: String,
}

impl ServerScripts {
    pub fn render(deployment: &ServerDeployment, params: &ServerParams) -> Self {
        let domain_dir = deployment.target.join("glassfish_domain");
        let admin = format!(
            "{} --admin {} --domain {} --domain-dir {}",
            q(&deployment.service_dir.join("glassfish_administer_service.py")),
            q(&deployment.asadmin),
            shell_quote(&deployment.domain),
            q(&domain_dir),
        );

        let env = format!(
            "#!/bin/sh\nexport JAVA_HOME={java}\nexport PATH={java}/bin:$PATH\n\
             export KB_DEPLOYMENT_CONFIG={cfg}\n",
            java = q(&deployment.java_home),
            cfg = q(&deployment.deploy_cfg),
        );

        let start = format!(
            "{env}python {admin} --war {war} --port {port} --threads {threads} \
             --Xms {min} --Xmx {max} --noparallelgc --properties KB_DEPLOYMENT_CONFIG={cfg}\n",
            war = q(&deployment.war),
            port = params.port,
            threads = params.threads,
            min = params.min_memory,
            max = params.max_memory,
            cfg = q(&deployment.deploy_cfg),
        );
        let stop = format!("{env}python {admin} --port {port}\n", port = params.port);

        Self { start, stop }
    }

    /// Writes both scripts into `dir`, returning their paths.
    pub fn write(&self, dir: &Path) -> Result<Vec<PathBuf>, Error> {
        let mut written = Vec::with_capacity(2);
        for (name, contents) in [(START_SCRIPT, &self.start), (STOP_SCRIPT, &self.stop)] {
            let path = dir.join(name);
            write_executable(&path, contents)?;
            written.push(path);
        }
        Ok(written)
    }
}

fn q(path: &Path) -> String {
    shell_quote(&path.to_string_lossy())
}

/// Resolves the deployment's config section and writes the control scripts
/// into its target directory. Nothing is written unless resolution succeeds.
pub fn build_server_scripts(deployment: &ServerDeployment) -> Result<Vec<PathBuf>, Error> {
    let doc = ConfigDocument::load(&deployment.deploy_cfg)?;
    let section = doc.section(&deployment.domain)?;
    let params = ServerParams::resolve(section, deployment.port.as_deref())?;

    ServerScripts::render(deployment, &params).write(&deployment.target)
}
